//! Player identification, hands, and seat state.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Seats are fixed for the life of a match, so a
//! `PlayerId` is stable across serialization boundaries.
//!
//! ## Hand
//!
//! A player's owned card collection. Hands are order-preserving and allow
//! duplicates (cards are distinguishable physical pieces, not values).
//! Hands are only mutated through deck and engine operations.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardSequence};

/// Seat index of a player in the fixed turn order.
///
/// Seats are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a match with `player_count` seats.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player's owned card collection.
///
/// Cards played from a hand are matched structurally: normal cards by color
/// and kind, wildcards by kind alone (a wildcard in hand has no color or
/// target until it is played).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding the given cards.
    #[must_use]
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when the hand holds no cards (the external win condition).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The held cards, in acquisition order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over the held cards.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Add a card to the hand.
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove the first card matching `played` as a physical piece.
    ///
    /// Returns the removed card, or `None` if no held card matches.
    pub fn remove_matching(&mut self, played: &Card) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.is_same_piece(played))?;
        Some(self.cards.remove(pos))
    }

    /// Check that every card of `sequence` is held, respecting multiplicity.
    #[must_use]
    pub fn contains_sequence(&self, sequence: &CardSequence) -> bool {
        let mut used = vec![false; self.cards.len()];
        'wanted: for wanted in sequence.iter() {
            for (i, card) in self.cards.iter().enumerate() {
                if !used[i] && card.is_same_piece(wanted) {
                    used[i] = true;
                    continue 'wanted;
                }
            }
            return false;
        }
        true
    }
}

/// A match participant: a hand plus turn-order eligibility.
///
/// `active` flags a player still eligible for turn order participation.
/// It is reserved for future elimination logic and never mutated by the
/// current engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Player {
    /// The player's owned hand.
    pub hand: Hand,

    /// Still participating in turn order.
    pub active: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hand: Hand::new(),
            active: true,
        }
    }
}
