//! Deck lifecycle: draw pile, discard pile, and the active combo chain.
//!
//! The top of each pile is the end of its `Vec`. The deck owns the match
//! RNG so that every shuffle is reproducible from the match seed.
//!
//! ## Replenishment
//!
//! When the draw pile runs dry, the discard pile is flipped over: every
//! card except the single top discard becomes the new draw pile in freshly
//! randomized order, and wildcards shed the color/target they acquired on
//! play. One card must therefore always remain visible in the discard
//! pile, which `can_draw_cards` enforces for callers.

use tracing::debug;

use crate::cards::{Card, CardSequence, Color, NormalKind, WildKind};
use crate::core::error::EngineError;
use crate::core::rng::GameRng;

/// Number of cards in the canonical deck: 25 per color plus 12 wildcards.
pub const DECK_SIZE: usize = 112;

/// Owns the shuffled draw/discard piles and the accumulating combo chain.
#[derive(Clone, Debug)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    current_combo: Option<CardSequence>,
    rng: GameRng,
}

impl Deck {
    /// Create an empty deck with a seeded RNG. Call
    /// `randomize_draw_pile` before dealing.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            current_combo: None,
            rng: GameRng::new(seed),
        }
    }

    /// Restore a deck from explicit piles (replays, tests, snapshots).
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>, seed: u64) -> Self {
        Self {
            draw_pile,
            discard_pile,
            current_combo: None,
            rng: GameRng::new(seed),
        }
    }

    /// The canonical card multiset, unshuffled.
    ///
    /// Per color: one 0, two each of 1-9, two each of Skip/Reverse/DrawTwo.
    /// Wildcards: DrawFour x4, Spy x3, one each of
    /// Democracy/Dictator/Everybody/Polluter/Exchange.
    #[must_use]
    pub fn canonical_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);

        for color in Color::ALL {
            cards.push(Card::number(color, 0));
            for number in 1..=9 {
                cards.push(Card::number(color, number));
                cards.push(Card::number(color, number));
            }
            for kind in [NormalKind::Skip, NormalKind::Reverse, NormalKind::DrawTwo] {
                cards.push(Card::normal(color, kind));
                cards.push(Card::normal(color, kind));
            }
        }

        for _ in 0..4 {
            cards.push(Card::wild(WildKind::DrawFour));
        }
        for _ in 0..3 {
            cards.push(Card::wild(WildKind::Spy));
        }
        for kind in [
            WildKind::Democracy,
            WildKind::Dictator,
            WildKind::Everybody,
            WildKind::Polluter,
            WildKind::Exchange,
        ] {
            cards.push(Card::wild(kind));
        }

        debug_assert_eq!(cards.len(), DECK_SIZE);
        cards
    }

    /// Rebuild the full canonical deck as the draw pile and shuffle it
    /// uniformly in place. Discards are left untouched.
    pub fn randomize_draw_pile(&mut self) {
        self.draw_pile = Self::canonical_cards();
        self.rng.shuffle(&mut self.draw_pile);
    }

    /// Draw the top card, flipping the discard pile over first if the draw
    /// pile is empty.
    ///
    /// `DeckExhausted` is defensive: under the one-visible-discard
    /// invariant a reshuffle always yields at least one card.
    pub fn draw_card(&mut self) -> Result<Card, EngineError> {
        if self.draw_pile.is_empty() {
            self.flip_discard_into_draw();
        }
        self.draw_pile.pop().ok_or(EngineError::DeckExhausted)
    }

    /// Deal `n` cards off the top.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        (0..n).map(|_| self.draw_card()).collect()
    }

    /// Whether `n` cards can be drawn while leaving at least one card
    /// visible as "last played".
    #[must_use]
    pub fn can_draw_cards(&self, n: usize) -> bool {
        self.draw_pile.len() + self.discard_pile.len() > n + 1
    }

    /// The most recently played card.
    ///
    /// Panics on an empty discard pile, which cannot happen after the
    /// initial flip (precondition).
    #[must_use]
    pub fn last_card(&self) -> &Card {
        self.discard_pile
            .last()
            .expect("discard pile empty: no card has been flipped yet")
    }

    /// Put a played card on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Slide a card under the draw pile (wildcard rejected by the initial
    /// flip).
    pub fn put_under(&mut self, card: Card) {
        self.draw_pile.insert(0, card);
    }

    /// Draw pile size.
    #[must_use]
    pub fn draw_pile_size(&self) -> usize {
        self.draw_pile.len()
    }

    /// Discard pile size.
    #[must_use]
    pub fn discard_pile_size(&self) -> usize {
        self.discard_pile.len()
    }

    // === Combo chain ===

    /// The accumulating combo chain, if one is active.
    #[must_use]
    pub fn current_combo(&self) -> Option<&CardSequence> {
        self.current_combo.as_ref()
    }

    /// Open a combo chain with the sequence that started it.
    ///
    /// Panics if a chain is already active (precondition: callers extend
    /// instead).
    pub fn open_combo(&mut self, sequence: CardSequence) {
        assert!(
            self.current_combo.is_none(),
            "combo chain already active; extend it instead"
        );
        self.current_combo = Some(sequence);
    }

    /// Append a play to the active combo chain.
    ///
    /// Panics if no chain is active (precondition).
    pub fn extend_combo(&mut self, sequence: &CardSequence) {
        self.current_combo
            .as_mut()
            .expect("no combo chain active to extend")
            .extend_from(sequence);
    }

    /// Take and clear the active combo chain.
    pub fn take_combo(&mut self) -> Option<CardSequence> {
        self.current_combo.take()
    }

    /// Flip all but the top discard into a freshly shuffled draw pile.
    /// The discard pile retains exactly its single top card.
    fn flip_discard_into_draw(&mut self) {
        let top = match self.discard_pile.pop() {
            Some(card) => card,
            None => return,
        };

        debug!(
            recycled = self.discard_pile.len(),
            "flipping discard pile into draw pile"
        );

        self.draw_pile.append(&mut self.discard_pile);
        for card in &mut self.draw_pile {
            card.reset_wild_state();
        }
        self.rng.shuffle(&mut self.draw_pile);
        self.discard_pile.push(top);
    }
}
