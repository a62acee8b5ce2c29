//! Game engine: the authoritative turn and combo state machine.
//!
//! The engine owns the deck and every player, validates and applies plays,
//! draws, and jump-ins, and resolves wildcard side effects. It is
//! single-threaded and synchronous: each operation is one atomic step with
//! no observable intermediate state. Agent latency and jump-in races live
//! outside; a jump-in that lost the race simply fails re-validation
//! against the updated discard top.
//!
//! Two states exist: awaiting a normal play, and combo-active. They are
//! modeled as the presence of the deck's accumulating combo chain layered
//! on the turn index.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::cards::{Card, CardSequence, NormalKind, WildKind};
use crate::core::error::EngineError;
use crate::core::player::{Hand, Player, PlayerId};
use crate::deck::Deck;
use crate::view::{ComboView, GameView, HandView};

use serde::{Deserialize, Serialize};

/// Direction of turn rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// The opposite rotation.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Configures and deals a fresh match.
pub struct GameEngineBuilder {
    player_count: usize,
    starting_hand_size: usize,
}

impl Default for GameEngineBuilder {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_hand_size: 7,
        }
    }
}

impl GameEngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of seats. The deck supports up to 10 with the default deal.
    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        assert!((2..=10).contains(&count), "player count must be 2-10");
        self.player_count = count;
        self
    }

    /// Cards dealt to each player at the start.
    #[must_use]
    pub fn starting_hand_size(mut self, size: usize) -> Self {
        assert!(size >= 1, "starting hand must hold at least 1 card");
        self.starting_hand_size = size;
        self
    }

    /// Deal the match: randomize the draw pile, deal every hand, then flip
    /// the starting discard. A wildcard flipped first goes back under the
    /// pile until a normal card comes up.
    #[must_use]
    pub fn build(self, seed: u64) -> GameEngine {
        let mut deck = Deck::new(seed);
        deck.randomize_draw_pile();

        let mut players = Vec::with_capacity(self.player_count);
        for _ in 0..self.player_count {
            let cards = deck
                .deal(self.starting_hand_size)
                .expect("fresh deck cannot run out during the deal");
            players.push(Player {
                hand: Hand::with_cards(cards),
                active: true,
            });
        }

        loop {
            let card = deck
                .draw_card()
                .expect("fresh deck cannot run out before the first flip");
            if card.is_wild() {
                deck.put_under(card);
            } else {
                deck.discard(card);
                break;
            }
        }

        GameEngine {
            players,
            turn: 0,
            direction: Direction::Clockwise,
            deck,
            revealed: FxHashSet::default(),
        }
    }
}

/// The authoritative rules engine for one ongoing match.
pub struct GameEngine {
    players: Vec<Player>,
    /// Seat index of the player whose turn it is.
    turn: usize,
    direction: Direction,
    deck: Deck,
    /// (viewer, subject) pairs revealed by Spy effects.
    revealed: FxHashSet<(PlayerId, PlayerId)>,
}

impl GameEngine {
    /// Restore an engine from explicit parts (replays, tests, snapshots).
    ///
    /// Panics unless at least two hands are given, the turn seat exists,
    /// and the deck already has a visible discard (preconditions).
    #[must_use]
    pub fn from_parts(
        hands: Vec<Vec<Card>>,
        deck: Deck,
        turn: PlayerId,
        direction: Direction,
    ) -> Self {
        assert!(hands.len() >= 2, "a match needs at least 2 players");
        assert!(turn.index() < hands.len(), "turn seat out of range");
        assert!(
            deck.discard_pile_size() > 0,
            "deck must have a visible discard card"
        );

        let players = hands
            .into_iter()
            .map(|cards| Player {
                hand: Hand::with_cards(cards),
                active: true,
            })
            .collect();

        Self {
            players,
            turn: turn.index(),
            direction,
            deck,
            revealed: FxHashSet::default(),
        }
    }

    // === Accessors ===

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::new(self.turn as u8)
    }

    /// Current play direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a combo chain is active.
    #[must_use]
    pub fn is_combo_mode(&self) -> bool {
        self.deck.current_combo().is_some()
    }

    /// The most recently played card.
    #[must_use]
    pub fn last_card(&self) -> &Card {
        self.deck.last_card()
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.players[player.index()].hand
    }

    /// A player's hand size. The external win condition is
    /// `hand_size(p) == 0`.
    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.players[player.index()].hand.len()
    }

    /// The deck (piles and combo chain).
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    // === Legality ===

    /// Whether `player` may play `sequence` right now: it must be their
    /// turn, the sequence must be valid and playable on the discard top
    /// under the current combo flag, their hand must hold every card, and
    /// an all-Exchange play of the entire hand is rejected (it would win
    /// the match with a no-op hand swap).
    #[must_use]
    pub fn can_play_cards(&self, player: PlayerId, sequence: &CardSequence) -> bool {
        player == self.current_player()
            && sequence.can_play(self.deck.last_card(), self.is_combo_mode())
            && self.hand_allows(player, sequence)
    }

    /// Whether `player` may jump in with `sequence` out of turn: the
    /// leading card must be an exact duplicate of the discard top, plus
    /// the same hand checks as a normal play.
    #[must_use]
    pub fn can_jump_in_cards(&self, player: PlayerId, sequence: &CardSequence) -> bool {
        player.index() < self.players.len()
            && sequence.can_jump_in(self.deck.last_card(), self.is_combo_mode())
            && self.hand_allows(player, sequence)
    }

    fn hand_allows(&self, player: PlayerId, sequence: &CardSequence) -> bool {
        let hand = &self.players[player.index()].hand;
        if !hand.contains_sequence(sequence) {
            return false;
        }
        !(sequence.len() == hand.len()
            && sequence
                .iter()
                .all(|c| matches!(c, Card::Wild(w) if w.kind == WildKind::Exchange)))
    }

    /// Whether `n` cards can be drawn without consuming the visible
    /// discard.
    #[must_use]
    pub fn can_draw_cards(&self, n: usize) -> bool {
        self.deck.can_draw_cards(n)
    }

    // === Operations ===

    /// Validate and apply a turn-gated play.
    pub fn play_cards(
        &mut self,
        player: PlayerId,
        sequence: &CardSequence,
    ) -> Result<(), EngineError> {
        if !self.can_play_cards(player, sequence) {
            return Err(EngineError::IllegalPlay);
        }
        debug!(player = %player, cards = sequence.len(), "play accepted");
        self.commit_play(player, sequence)
    }

    /// Validate and apply an out-of-turn jump-in. The turn is seated on
    /// the jumper before effects resolve, so play continues from their
    /// seat. A stale jump-in (another play landed first) fails here.
    pub fn jump_in_cards(
        &mut self,
        player: PlayerId,
        sequence: &CardSequence,
    ) -> Result<(), EngineError> {
        if !self.can_jump_in_cards(player, sequence) {
            return Err(EngineError::IllegalJumpIn);
        }
        debug!(player = %player, cards = sequence.len(), "jump-in accepted");
        self.turn = self.seat(player)?;
        self.commit_play(player, sequence)
    }

    /// Resolve the active combo chain against the current player: they
    /// draw the chain's total penalty and the chain is cleared. The turn
    /// does not advance; the driver decides whether the penalized player
    /// still plays.
    ///
    /// On `DeckExhausted` the chain stays active and no card moves, so the
    /// operation can be retried once the driver frees up cards.
    pub fn end_combo(&mut self) -> Result<(), EngineError> {
        let penalty = self
            .deck
            .current_combo()
            .ok_or(EngineError::NoActiveCombo)?
            .draw_value();
        if !self.deck.can_draw_cards(penalty) {
            return Err(EngineError::DeckExhausted);
        }
        self.deck.take_combo();
        let player = self.current_player();
        debug!(player = %player, penalty, "combo chain resolved");
        self.draw_cards(player, penalty)
    }

    /// Draw `n` cards into a player's hand. `DeckExhausted` if the draw
    /// would consume the visible discard.
    pub fn draw_cards(&mut self, player: PlayerId, n: usize) -> Result<(), EngineError> {
        let seat = self.seat(player)?;
        if !self.deck.can_draw_cards(n) {
            return Err(EngineError::DeckExhausted);
        }
        for _ in 0..n {
            let card = self.deck.draw_card()?;
            trace!(player = %player, "card drawn");
            self.players[seat].hand.add(card);
        }
        Ok(())
    }

    /// Direction-aware circular turn advance.
    pub fn advance_turn(&mut self) {
        let n = self.players.len();
        self.turn = match self.direction {
            Direction::Clockwise => (self.turn + 1) % n,
            Direction::CounterClockwise => (self.turn + n - 1) % n,
        };
    }

    /// Absolute seat jump.
    pub fn give_turn(&mut self, player: PlayerId) -> Result<(), EngineError> {
        self.turn = self.seat(player)?;
        Ok(())
    }

    /// Build the hidden-information snapshot for one observing seat.
    #[must_use]
    pub fn view_for(&self, observer: PlayerId) -> GameView {
        let hands = PlayerId::all(self.players.len())
            .map(|p| {
                let hand = &self.players[p.index()].hand;
                if p == observer || self.revealed.contains(&(observer, p)) {
                    HandView::Revealed {
                        cards: hand.cards().to_vec(),
                    }
                } else {
                    HandView::Hidden { count: hand.len() }
                }
            })
            .collect();

        GameView {
            observer,
            turn: self.current_player(),
            direction: self.direction,
            last_card: *self.deck.last_card(),
            combo: self.deck.current_combo().map(|c| ComboView {
                cards: c.cards().to_vec(),
                pending_draw: c.draw_value(),
            }),
            hands,
            draw_pile_size: self.deck.draw_pile_size(),
            discard_pile_size: self.deck.discard_pile_size(),
        }
    }

    // === Internals ===

    fn seat(&self, player: PlayerId) -> Result<usize, EngineError> {
        if player.index() < self.players.len() {
            Ok(player.index())
        } else {
            Err(EngineError::PlayerNotFound(player))
        }
    }

    fn opponent_of(&self, player: PlayerId) -> PlayerId {
        debug_assert_eq!(self.players.len(), 2);
        PlayerId::new(1 - player.0)
    }

    /// Targeted wildcards must carry a target and every played wildcard a
    /// color before reaching the engine. Violations are agent bugs, not
    /// recoverable play rejections.
    fn assert_play_preconditions(sequence: &CardSequence) {
        for card in sequence.iter() {
            if let Card::Wild(w) = card {
                assert!(
                    w.color.is_some(),
                    "{:?} must have a color assigned before play",
                    w.kind
                );
                if w.kind.is_targetable() {
                    assert!(w.target.is_some(), "{:?} requires a target player", w.kind);
                }
            }
        }
    }

    /// Cards the deck must supply for `sequence`'s immediate side effects.
    /// Combo plays defer their penalty to `end_combo` and need none.
    fn required_draws(&self, sequence: &CardSequence) -> usize {
        if self.is_combo_mode() || sequence.is_combo_start_sequence() {
            return 0;
        }
        match sequence.first() {
            Some(Card::Wild(w)) => match w.kind {
                WildKind::Dictator => sequence.draw_value(),
                WildKind::Everybody => sequence.draw_value() * self.players.len(),
                WildKind::Polluter => sequence.draw_value() * (self.players.len() - 1),
                _ => 0,
            },
            _ => 0,
        }
    }

    fn commit_play(&mut self, player: PlayerId, sequence: &CardSequence) -> Result<(), EngineError> {
        Self::assert_play_preconditions(sequence);

        // Every draw the effects will perform must be covered up front, so
        // a failing play leaves hands and piles untouched.
        let needed = self.required_draws(sequence);
        if needed > 0 && !self.deck.can_draw_cards(needed) {
            return Err(EngineError::DeckExhausted);
        }

        {
            let hand = &mut self.players[player.index()].hand;
            for card in sequence.iter() {
                hand.remove_matching(card)
                    .expect("validated sequence card missing from hand");
            }
        }

        let was_combo = self.is_combo_mode();
        for card in sequence.iter() {
            self.deck.discard(*card);
        }

        if was_combo {
            self.deck.extend_combo(sequence);
            debug!(player = %player, "combo chain extended");
        } else if sequence.is_combo_start_sequence() {
            self.deck.open_combo(sequence.clone());
            debug!(player = %player, "combo chain opened");
        }

        if self.is_combo_mode() {
            self.handle_cards_combo(player, sequence)
        } else {
            self.handle_cards_normal(player, sequence)
        }
    }

    /// Effect resolution outside a combo chain, keyed on the leading card.
    /// Every branch ends with the mandatory single advance; in a duel the
    /// Skip/Reverse branches first pass the turn to the opponent, so the
    /// advance brings it back to the actor.
    fn handle_cards_normal(
        &mut self,
        player: PlayerId,
        sequence: &CardSequence,
    ) -> Result<(), EngineError> {
        let leading = *sequence.first().expect("validated sequence is non-empty");

        match leading {
            Card::Normal(n) => match n.kind {
                NormalKind::Reverse => {
                    if self.players.len() == 2 {
                        self.give_turn(self.opponent_of(player))?;
                    } else if sequence.len() % 2 == 1 {
                        self.direction = self.direction.flipped();
                        debug!(direction = ?self.direction, "direction flipped");
                    }
                }
                NormalKind::Skip => {
                    if self.players.len() == 2 {
                        self.give_turn(self.opponent_of(player))?;
                    } else {
                        for _ in 0..sequence.len() {
                            self.advance_turn();
                        }
                    }
                }
                _ => {}
            },
            Card::Wild(w) => match w.kind {
                WildKind::Dictator => {
                    for card in sequence.iter() {
                        let target = card.target().expect("Dictator requires a target player");
                        self.draw_cards(target, card.draw_value())?;
                    }
                }
                WildKind::Everybody => {
                    let penalty = sequence.draw_value();
                    let everyone: Vec<PlayerId> = PlayerId::all(self.players.len()).collect();
                    for p in everyone {
                        self.draw_cards(p, penalty)?;
                    }
                }
                WildKind::Polluter => {
                    let penalty = sequence.draw_value();
                    let others: Vec<PlayerId> = PlayerId::all(self.players.len())
                        .filter(|&p| p != player)
                        .collect();
                    for p in others {
                        self.draw_cards(p, penalty)?;
                    }
                }
                WildKind::Exchange => {
                    let target = leading.target().expect("Exchange requires a target player");
                    self.swap_hands(player, target)?;
                }
                WildKind::Spy => {
                    for card in sequence.iter() {
                        let target = card.target().expect("Spy requires a target player");
                        self.revealed.insert((player, target));
                        debug!(viewer = %player, subject = %target, "hand revealed");
                    }
                }
                // Combo starts never reach the normal branch.
                WildKind::DrawFour | WildKind::Democracy => {}
            },
        }

        self.advance_turn();
        Ok(())
    }

    /// Effect resolution while a combo chain is active, including the play
    /// that opened it. An all-Spy extension cancels the chain outright.
    /// Otherwise the turn-affecting cards of the play (Reverse, Skip,
    /// Exchange) wrap the mandatory single advance: a leading Reverse
    /// applies before it (rule ordering quirk preserved intentionally),
    /// the rest apply after it in sequence order.
    fn handle_cards_combo(
        &mut self,
        player: PlayerId,
        sequence: &CardSequence,
    ) -> Result<(), EngineError> {
        let all_spies = sequence
            .iter()
            .all(|c| matches!(c, Card::Wild(w) if w.kind == WildKind::Spy));
        if all_spies {
            for card in sequence.iter() {
                let target = card.target().expect("Spy requires a target player");
                self.revealed.insert((player, target));
            }
            self.deck.take_combo();
            debug!(player = %player, "combo chain cancelled by spies");
            return Ok(());
        }

        let turn_affecting: Vec<Card> = sequence
            .iter()
            .filter(|c| Self::is_turn_affecting(c))
            .copied()
            .collect();

        let mut rest: &[Card] = &turn_affecting;
        if let Some(Card::Normal(n)) = turn_affecting.first() {
            if n.kind == NormalKind::Reverse {
                self.apply_reverse()?;
                rest = &turn_affecting[1..];
            }
        }

        self.advance_turn();

        for card in rest {
            match card {
                Card::Normal(n) if n.kind == NormalKind::Reverse => self.apply_reverse()?,
                Card::Normal(n) if n.kind == NormalKind::Skip => self.advance_turn(),
                Card::Wild(w) if w.kind == WildKind::Exchange => {
                    let target = w.target.expect("Exchange requires a target player");
                    self.swap_hands(player, target)?;
                    self.give_turn(target)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn is_turn_affecting(card: &Card) -> bool {
        match card {
            Card::Normal(n) => matches!(n.kind, NormalKind::Reverse | NormalKind::Skip),
            Card::Wild(w) => w.kind == WildKind::Exchange,
        }
    }

    fn apply_reverse(&mut self) -> Result<(), EngineError> {
        if self.players.len() == 2 {
            let opponent = self.opponent_of(self.current_player());
            self.give_turn(opponent)
        } else {
            self.direction = self.direction.flipped();
            debug!(direction = ?self.direction, "direction flipped");
            Ok(())
        }
    }

    /// Move whole-hand ownership between two seats atomically. Never a
    /// copy, never a transient shared state.
    fn swap_hands(&mut self, a: PlayerId, b: PlayerId) -> Result<(), EngineError> {
        let ai = self.seat(a)?;
        let bi = self.seat(b)?;
        if ai == bi {
            return Ok(());
        }
        let (lo, hi) = (ai.min(bi), ai.max(bi));
        let (left, right) = self.players.split_at_mut(hi);
        std::mem::swap(&mut left[lo].hand, &mut right[0].hand);
        debug!(a = %a, b = %b, "hands exchanged");
        Ok(())
    }
}
