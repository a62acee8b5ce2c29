//! Card system: the closed card type and validated play sequences.
//!
//! ## Key Types
//!
//! - `Color`: the four suit colors
//! - `NormalCard` / `Wildcard`: the two card families
//! - `Card`: closed sum type over both families, carrying every pairwise
//!   legality predicate (playability, sequencing, jump-in)
//! - `CardSequence`: an ordered, validated run of cards forming one atomic
//!   play
//!
//! Legality predicates are pure: they read only the two cards involved and
//! the combo-mode flag, never game state.

pub mod card;
pub mod sequence;

pub use card::{Card, Color, NormalCard, NormalKind, WildKind, Wildcard};
pub use sequence::CardSequence;
