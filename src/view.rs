//! Read-only state snapshots across the hidden-information boundary.
//!
//! Agents never see engine internals. Between operations they receive a
//! `GameView` built for one observing seat: the observer's own hand (and
//! any hand revealed to them by a Spy) serializes in full, every other
//! hand serializes as a bare card count.
//!
//! `GameView` is plain data with serde derives; `to_bytes`/`from_bytes`
//! provide the compact wire encoding the transport layer ships around.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::player::PlayerId;
use crate::engine::Direction;

/// One player's hand as seen by a specific observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HandView {
    /// A hidden hand: only its size is public knowledge.
    Hidden { count: usize },
    /// The observer's own hand, or one revealed by a Spy effect.
    Revealed { cards: Vec<Card> },
}

impl HandView {
    /// Number of cards in the viewed hand.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            HandView::Hidden { count } => *count,
            HandView::Revealed { cards } => cards.len(),
        }
    }
}

/// The active combo chain as observable state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComboView {
    /// Cards stacked into the chain so far, in play order.
    pub cards: Vec<Card>,
    /// Penalty awaiting whoever fails to extend the chain.
    pub pending_draw: usize,
}

/// Snapshot of the match for one observing seat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    /// The seat this view was built for.
    pub observer: PlayerId,
    /// Whose turn it is.
    pub turn: PlayerId,
    /// Current play direction.
    pub direction: Direction,
    /// Top of the discard pile.
    pub last_card: Card,
    /// Active combo chain, if any.
    pub combo: Option<ComboView>,
    /// Every seat's hand, indexed by seat.
    pub hands: Vec<HandView>,
    /// Cards remaining in the draw pile.
    pub draw_pile_size: usize,
    /// Cards in the discard pile.
    pub discard_pile_size: usize,
}

impl GameView {
    /// Encode for the transport channel.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode from the transport channel.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, WildKind};

    fn sample_view() -> GameView {
        GameView {
            observer: PlayerId::new(0),
            turn: PlayerId::new(1),
            direction: Direction::CounterClockwise,
            last_card: Card::wild(WildKind::DrawFour).with_wild_color(Color::Green),
            combo: Some(ComboView {
                cards: vec![Card::wild(WildKind::DrawFour).with_wild_color(Color::Green)],
                pending_draw: 4,
            }),
            hands: vec![
                HandView::Revealed {
                    cards: vec![Card::number(Color::Red, 5)],
                },
                HandView::Hidden { count: 7 },
            ],
            draw_pile_size: 80,
            discard_pile_size: 3,
        }
    }

    #[test]
    fn test_hand_view_count() {
        assert_eq!(HandView::Hidden { count: 7 }.count(), 7);
        assert_eq!(
            HandView::Revealed {
                cards: vec![Card::number(Color::Red, 5)]
            }
            .count(),
            1
        );
    }

    #[test]
    fn test_wire_roundtrip() {
        let view = sample_view();
        let bytes = view.to_bytes().unwrap();
        let decoded = GameView::from_bytes(&bytes).unwrap();
        assert_eq!(view, decoded);
    }

    #[test]
    fn test_json_roundtrip() {
        let view = sample_view();
        let json = serde_json::to_string(&view).unwrap();
        let decoded: GameView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, decoded);
    }
}
