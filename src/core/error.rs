//! Engine error types.
//!
//! Two classes of failure exist, and only one is represented here:
//!
//! - **Legality rejections** are expected outcomes of speculative input
//!   (an agent attempting an illegal sequence, playing out of turn, a
//!   stale jump-in). They are reported as `false` from `can_*` predicates
//!   or as an `EngineError` so the caller can re-prompt.
//! - **Precondition violations** (missing wildcard target, empty discard
//!   pile, voting for self) are caller bugs and panic loudly instead of
//!   being reported through this enum.
//!
//! No operation is auto-retried by the engine.

use thiserror::Error;

use super::player::PlayerId;

/// Recoverable failures of engine operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The sequence is not legal against the current discard and turn state.
    #[error("play is not legal against the current discard and turn state")]
    IllegalPlay,

    /// The jump-in does not match the current discard top. Raised for stale
    /// jump-ins that lost the race against an earlier one.
    #[error("jump-in does not match the current discard top")]
    IllegalJumpIn,

    /// Drawing would leave no card visible in the discard pile.
    #[error("draw would leave no visible discard card")]
    DeckExhausted,

    /// The referenced seat does not exist at this table.
    #[error("{0} is not seated at this table")]
    PlayerNotFound(PlayerId),

    /// A combo operation was invoked with no combo chain active.
    #[error("no combo chain is active")]
    NoActiveCombo,
}
