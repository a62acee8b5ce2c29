//! Card sequences: an ordered batch of cards played as one atomic move.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, WildKind};

/// An ordered run of cards a player intends to play together.
///
/// A sequence is internally chained: each card after the first must satisfy
/// `Card::can_sequence` against its predecessor under the active combo-mode
/// flag. At most one Exchange wildcard may appear.
///
/// Plays are typically one to three cards, so the storage is inline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSequence {
    cards: SmallVec<[Card; 4]>,
}

impl CardSequence {
    /// Create a sequence from cards in play order.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: SmallVec::from_vec(cards),
        }
    }

    /// Create a single-card sequence.
    #[must_use]
    pub fn single(card: Card) -> Self {
        let mut cards = SmallVec::new();
        cards.push(card);
        Self { cards }
    }

    /// Number of cards in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when the sequence holds no cards. An empty sequence is never
    /// valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The leading card.
    #[must_use]
    pub fn first(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Iterate over the cards in play order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The cards in play order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Append another sequence's cards (combo chain accumulation).
    pub fn extend_from(&mut self, other: &CardSequence) {
        self.cards.extend(other.cards.iter().copied());
    }

    /// Whether the leading card opens a combo chain.
    #[must_use]
    pub fn is_combo_start_sequence(&self) -> bool {
        self.first().is_some_and(Card::is_combo_start)
    }

    /// Total draw penalty carried by the sequence.
    #[must_use]
    pub fn draw_value(&self) -> usize {
        self.cards.iter().map(Card::draw_value).sum()
    }

    /// Validate internal consistency.
    ///
    /// `combo_mode` is OR'd with whether this sequence itself starts a
    /// combo, then each adjacent pair is checked with `Card::can_sequence`
    /// under that flag. False on the first violation, on an empty
    /// sequence, or on more than one Exchange card.
    #[must_use]
    pub fn is_valid(&self, combo_mode: bool) -> bool {
        if self.cards.is_empty() {
            return false;
        }

        let exchanges = self
            .cards
            .iter()
            .filter(|c| matches!(c, Card::Wild(w) if w.kind == WildKind::Exchange))
            .count();
        if exchanges > 1 {
            return false;
        }

        let combo = combo_mode || self.is_combo_start_sequence();
        self.cards
            .windows(2)
            .all(|pair| pair[1].can_sequence(&pair[0], combo))
    }

    /// Whether the whole sequence is a legal play on top of `previous`.
    #[must_use]
    pub fn can_play(&self, previous: &Card, combo_mode: bool) -> bool {
        if !self.is_valid(combo_mode) {
            return false;
        }
        self.cards[0].can_play(previous, combo_mode)
    }

    /// Whether the whole sequence is a legal out-of-turn jump-in on top of
    /// `previous`.
    #[must_use]
    pub fn can_jump_in(&self, previous: &Card, combo_mode: bool) -> bool {
        if !self.is_valid(combo_mode) {
            return false;
        }
        self.cards[0].can_jump_in(previous)
    }
}
