//! Core engine types: players, hands, RNG, errors.
//!
//! These are the building blocks the rule modules sit on. Nothing in here
//! knows about card legality or turn order.

pub mod error;
pub mod player;
pub mod rng;

pub use error::EngineError;
pub use player::{Hand, Player, PlayerId};
pub use rng::GameRng;
