//! Player agent contract: the boundary to human and bot decision-makers.
//!
//! The engine is a pure reactor: it never schedules or waits. A driver
//! sitting above it collects decisions from agents (with whatever latency,
//! threading, or network round-trips that involves) and invokes one engine
//! operation per decision. Agents only ever see `GameView` snapshots, so
//! the hidden-information boundary holds across this trait.
//!
//! The `tell_*` notifications are one-way fan-outs the driver delivers to
//! every agent after each state change. The engine is single-threaded and
//! sequential, so delivering them in seat order after each operation keeps
//! delivery order identical to application order.

use crate::cards::{CardSequence, Color};
use crate::core::player::PlayerId;
use crate::view::GameView;

/// Decision-maker for one seat.
pub trait PlayerAgent {
    /// Choose a sequence to play, or `None` to decline. Called only when
    /// the player is not forced to draw.
    fn ask_play(&mut self, view: &GameView) -> Option<CardSequence>;

    /// Whether the player, given the option, elects to draw instead of
    /// playing.
    fn ask_draw(&mut self, view: &GameView) -> bool;

    /// Resolve the color for a just-played colorless wildcard.
    fn ask_color(&mut self, view: &GameView) -> Color;

    /// Cast a vote for Democracy resolution. Tally and tie-break policy
    /// are the driver's concern.
    fn ask_vote(&mut self, view: &GameView) -> PlayerId;

    /// A fresh state snapshot after an operation was applied.
    fn tell_state(&mut self, _view: &GameView) {}

    /// A play (or jump-in) was applied.
    fn tell_play(&mut self, _player: PlayerId, _cards: &CardSequence) {}

    /// A player drew cards.
    fn tell_draw(&mut self, _player: PlayerId, _count: usize) {}

    /// A wildcard's color was resolved.
    fn tell_color(&mut self, _player: PlayerId, _color: Color) {}

    /// A Democracy vote concluded against `target`.
    fn tell_vote_completed(&mut self, _target: PlayerId) {}
}

/// Check a Democracy vote before counting it.
///
/// Panics on a self-vote: agents are never offered themselves as an
/// option, so receiving one is an agent bug (precondition).
pub fn validate_vote(voter: PlayerId, target: PlayerId) {
    assert_ne!(voter, target, "{voter} may not vote for themselves");
}
