//! # combo-uno
//!
//! Authoritative rules engine for a multiplayer turn-based card game: an
//! extended Uno variant with combo chains and targeted wildcard effects.
//!
//! ## Design Principles
//!
//! 1. **Closed card hierarchy**: `Card` is a sum type over normal cards
//!    and wildcards; every legality predicate is an exhaustive match, so
//!    new card kinds are a compile-time checklist.
//!
//! 2. **Synchronous reactor**: the engine never suspends. Agent latency,
//!    network round-trips, and jump-in races live outside; every engine
//!    operation is one atomic step.
//!
//! 3. **Two failure classes**: expected rejections of speculative input
//!    (illegal sequence, playing out of turn, stale jump-in) come back as
//!    `false` or `EngineError` so agents can re-prompt; caller bugs
//!    (missing wildcard target, self-vote) panic loudly.
//!
//! ## Modules
//!
//! - `cards`: card model and validated play sequences
//! - `core`: player/hand types, deterministic RNG, errors
//! - `deck`: draw/discard piles, reshuffling, the combo accumulator
//! - `engine`: the turn and combo state machine
//! - `agent`: the decision-maker contract
//! - `view`: hidden-information snapshots and their wire encoding

pub mod agent;
pub mod cards;
pub mod core;
pub mod deck;
pub mod engine;
pub mod view;

// Re-export commonly used types
pub use crate::cards::{Card, CardSequence, Color, NormalCard, NormalKind, WildKind, Wildcard};

pub use crate::core::{EngineError, GameRng, Hand, Player, PlayerId};

pub use crate::deck::{Deck, DECK_SIZE};

pub use crate::engine::{Direction, GameEngine, GameEngineBuilder};

pub use crate::agent::{validate_vote, PlayerAgent};

pub use crate::view::{ComboView, GameView, HandView};
