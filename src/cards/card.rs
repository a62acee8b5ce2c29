//! Card model: value types and pairwise legality predicates.
//!
//! The card hierarchy is a closed sum type: `Card` is either a
//! `NormalCard` (colored number/action card) or a `Wildcard` (colorless
//! until played). All legality predicates are exhaustive matches over the
//! discriminant, so adding a card kind is a compile-time checklist.
//!
//! ## Combo cards
//!
//! DrawTwo, DrawFour, and Democracy open a combo chain when played outside
//! one. Skip, Reverse, Spy, and Exchange may extend an open chain. Inside a
//! chain, wildcards are restricted further: only DrawFour, Democracy, and
//! Spy are playable, except that any combo card (including Exchange) may
//! ride directly on a played wildcard.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// The four suit colors.
///
/// Normal cards always carry a color; wildcards carry one only after being
/// played (chosen by the player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// All colors, in canonical order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
        };
        write!(f, "{name}")
    }
}

/// Kind of a normal (colored) card.
///
/// The number payload lives inside the variant, so "number is defined iff
/// the kind is Number" holds by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalKind {
    /// A number card, 0 through 9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
}

/// A colored card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalCard {
    pub color: Color,
    pub kind: NormalKind,
}

impl NormalCard {
    /// Create a normal card. Panics if a number card is out of the 0..=9
    /// range (precondition).
    #[must_use]
    pub fn new(color: Color, kind: NormalKind) -> Self {
        if let NormalKind::Number(n) = kind {
            assert!(n <= 9, "number cards range 0..=9, got {n}");
        }
        Self { color, kind }
    }
}

/// Kind of a wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildKind {
    /// Reveals the target's hand to the actor. Cancels an active combo when
    /// played as an all-Spy extension.
    Spy,
    /// Draw four; opens or extends a combo chain.
    DrawFour,
    /// Swaps hands with the target.
    Exchange,
    /// Opens a combo chain; resolved by a broadcast vote.
    Democracy,
    /// Every player draws.
    Everybody,
    /// Every player except the actor draws.
    Polluter,
    /// Each targeted player draws.
    Dictator,
}

impl WildKind {
    /// Kinds that accept a target player. Assigning a target to any other
    /// kind is a precondition violation.
    #[must_use]
    pub fn is_targetable(self) -> bool {
        matches!(self, WildKind::Spy | WildKind::Dictator | WildKind::Exchange)
    }
}

/// A wildcard. Color and target are unassigned while the card is in a hand
/// or pile and are chosen by the player on play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wildcard {
    pub kind: WildKind,
    /// Color assigned on play.
    pub color: Option<Color>,
    /// Target seat, for Spy/Dictator/Exchange only. Serialized as the
    /// stable seat index.
    pub target: Option<PlayerId>,
}

impl Wildcard {
    /// Create an unplayed wildcard of the given kind.
    #[must_use]
    pub fn new(kind: WildKind) -> Self {
        Self {
            kind,
            color: None,
            target: None,
        }
    }

    /// Assign the played color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Assign the target player.
    ///
    /// Panics if this kind does not take a target (precondition).
    #[must_use]
    pub fn with_target(mut self, target: PlayerId) -> Self {
        assert!(
            self.kind.is_targetable(),
            "{:?} does not take a target player",
            self.kind
        );
        self.target = Some(target);
        self
    }
}

/// A card: either family of the closed hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Normal(NormalCard),
    Wild(Wildcard),
}

impl Card {
    /// Shorthand for a normal card.
    #[must_use]
    pub fn normal(color: Color, kind: NormalKind) -> Self {
        Card::Normal(NormalCard::new(color, kind))
    }

    /// Shorthand for a number card.
    #[must_use]
    pub fn number(color: Color, number: u8) -> Self {
        Card::Normal(NormalCard::new(color, NormalKind::Number(number)))
    }

    /// Shorthand for an unplayed wildcard.
    #[must_use]
    pub fn wild(kind: WildKind) -> Self {
        Card::Wild(Wildcard::new(kind))
    }

    /// Assign a color to a wildcard; identity for normal cards.
    #[must_use]
    pub fn with_wild_color(self, color: Color) -> Self {
        match self {
            Card::Wild(w) => Card::Wild(w.with_color(color)),
            normal => normal,
        }
    }

    /// Assign a target to a wildcard.
    ///
    /// Panics for normal cards and for non-targetable wildcard kinds
    /// (precondition).
    #[must_use]
    pub fn with_wild_target(self, target: PlayerId) -> Self {
        match self {
            Card::Wild(w) => Card::Wild(w.with_target(target)),
            Card::Normal(n) => panic!("{n:?} is not a wildcard and takes no target"),
        }
    }

    /// The card's effective color: always present for normal cards, present
    /// for wildcards only after being played.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Normal(n) => Some(n.color),
            Card::Wild(w) => w.color,
        }
    }

    /// The wildcard target, if any.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match self {
            Card::Normal(_) => None,
            Card::Wild(w) => w.target,
        }
    }

    /// True for wildcards.
    #[must_use]
    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild(_))
    }

    /// True for anything that is not a plain number card.
    #[must_use]
    pub fn is_special(&self) -> bool {
        !matches!(
            self,
            Card::Normal(NormalCard {
                kind: NormalKind::Number(_),
                ..
            })
        )
    }

    /// Cards that open a combo chain when first played outside one.
    #[must_use]
    pub fn is_combo_start(&self) -> bool {
        match self {
            Card::Normal(n) => n.kind == NormalKind::DrawTwo,
            Card::Wild(w) => matches!(w.kind, WildKind::DrawFour | WildKind::Democracy),
        }
    }

    /// Cards eligible to extend an open combo chain.
    #[must_use]
    pub fn is_combo_card(&self) -> bool {
        if self.is_combo_start() {
            return true;
        }
        match self {
            Card::Normal(n) => matches!(n.kind, NormalKind::Skip | NormalKind::Reverse),
            Card::Wild(w) => matches!(w.kind, WildKind::Spy | WildKind::Exchange),
        }
    }

    /// Penalty cards this card contributes to a draw effect.
    #[must_use]
    pub fn draw_value(&self) -> usize {
        match self {
            Card::Normal(n) => match n.kind {
                NormalKind::DrawTwo => 2,
                _ => 0,
            },
            Card::Wild(w) => match w.kind {
                WildKind::DrawFour
                | WildKind::Democracy
                | WildKind::Everybody
                | WildKind::Polluter
                | WildKind::Dictator => 4,
                WildKind::Spy | WildKind::Exchange => 0,
            },
        }
    }

    /// Whether this card may be played on top of `previous`.
    ///
    /// Non-combo mode: the colors match, or both are normal cards of
    /// identical kind (including number), or this card is a wildcard
    /// (always playable on anything).
    ///
    /// Combo mode: this card must be a combo card. Any combo card may
    /// follow a played wildcard; otherwise wildcards must be DrawFour,
    /// Democracy, or Spy, and color or kind must match. (Exchange can
    /// therefore enter a chain only directly on top of a wildcard.)
    #[must_use]
    pub fn can_play(&self, previous: &Card, combo_mode: bool) -> bool {
        if combo_mode {
            if !self.is_combo_card() {
                return false;
            }
            if previous.is_wild() {
                return true;
            }
            if let Card::Wild(w) = self {
                if !matches!(
                    w.kind,
                    WildKind::DrawFour | WildKind::Democracy | WildKind::Spy
                ) {
                    return false;
                }
            }
            return self.colors_match(previous) || self.same_kind(previous);
        }

        self.colors_match(previous)
            || matches!((self, previous), (Card::Normal(a), Card::Normal(b)) if a.kind == b.kind)
            || self.is_wild()
    }

    /// Whether this card may be bundled after `previous` in one sequence.
    ///
    /// Non-combo mode requires an exact twin: normal cards chain only on
    /// identical kind and number, wildcards only on identical kind. Combo
    /// mode is looser and delegates to playability.
    #[must_use]
    pub fn can_sequence(&self, previous: &Card, combo_mode: bool) -> bool {
        if combo_mode {
            return self.can_play(previous, true);
        }
        match (self, previous) {
            (Card::Normal(a), Card::Normal(b)) => a.kind == b.kind,
            (Card::Wild(a), Card::Wild(b)) => a.kind == b.kind,
            _ => false,
        }
    }

    /// Whether this card may be played out of turn on top of `previous`:
    /// an exact kind+color match for normal cards, an exact kind match for
    /// wildcards.
    #[must_use]
    pub fn can_jump_in(&self, previous: &Card) -> bool {
        match (self, previous) {
            (Card::Normal(a), Card::Normal(b)) => a.kind == b.kind && a.color == b.color,
            (Card::Wild(a), Card::Wild(b)) => a.kind == b.kind,
            _ => false,
        }
    }

    /// Whether `other` is the same physical piece, ignoring the color and
    /// target a wildcard acquires on play. Used to match played cards
    /// against held ones.
    #[must_use]
    pub fn is_same_piece(&self, other: &Card) -> bool {
        match (self, other) {
            (Card::Normal(a), Card::Normal(b)) => a == b,
            (Card::Wild(a), Card::Wild(b)) => a.kind == b.kind,
            _ => false,
        }
    }

    /// Clear a wildcard's played color and target (when reshuffled back
    /// into the draw pile); identity for normal cards.
    pub fn reset_wild_state(&mut self) {
        if let Card::Wild(w) = self {
            w.color = None;
            w.target = None;
        }
    }

    fn colors_match(&self, other: &Card) -> bool {
        match (self.color(), other.color()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn same_kind(&self, other: &Card) -> bool {
        match (self, other) {
            (Card::Normal(a), Card::Normal(b)) => a.kind == b.kind,
            (Card::Wild(a), Card::Wild(b)) => a.kind == b.kind,
            _ => false,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Normal(n) => match n.kind {
                NormalKind::Number(v) => write!(f, "{} {}", n.color, v),
                kind => write!(f, "{} {:?}", n.color, kind),
            },
            Card::Wild(w) => match w.color {
                Some(color) => write!(f, "{:?} ({})", w.kind, color),
                None => write!(f, "{:?}", w.kind),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_range_enforced() {
        let card = NormalCard::new(Color::Red, NormalKind::Number(9));
        assert_eq!(card.kind, NormalKind::Number(9));
    }

    #[test]
    #[should_panic(expected = "number cards range 0..=9")]
    fn test_number_out_of_range_panics() {
        let _ = NormalCard::new(Color::Red, NormalKind::Number(10));
    }

    #[test]
    #[should_panic(expected = "does not take a target player")]
    fn test_target_on_untargetable_wildcard_panics() {
        let _ = Wildcard::new(WildKind::Everybody).with_target(PlayerId::new(1));
    }

    #[test]
    fn test_targetable_kinds() {
        assert!(WildKind::Spy.is_targetable());
        assert!(WildKind::Dictator.is_targetable());
        assert!(WildKind::Exchange.is_targetable());
        assert!(!WildKind::DrawFour.is_targetable());
        assert!(!WildKind::Democracy.is_targetable());
        assert!(!WildKind::Everybody.is_targetable());
        assert!(!WildKind::Polluter.is_targetable());
    }

    #[test]
    fn test_draw_values() {
        assert_eq!(Card::normal(Color::Red, NormalKind::DrawTwo).draw_value(), 2);
        assert_eq!(Card::wild(WildKind::DrawFour).draw_value(), 4);
        assert_eq!(Card::wild(WildKind::Democracy).draw_value(), 4);
        assert_eq!(Card::wild(WildKind::Everybody).draw_value(), 4);
        assert_eq!(Card::wild(WildKind::Polluter).draw_value(), 4);
        assert_eq!(Card::wild(WildKind::Dictator).draw_value(), 4);
        assert_eq!(Card::wild(WildKind::Spy).draw_value(), 0);
        assert_eq!(Card::wild(WildKind::Exchange).draw_value(), 0);
        assert_eq!(Card::number(Color::Blue, 7).draw_value(), 0);
        assert_eq!(Card::normal(Color::Blue, NormalKind::Skip).draw_value(), 0);
    }

    #[test]
    fn test_combo_start_cards() {
        assert!(Card::normal(Color::Red, NormalKind::DrawTwo).is_combo_start());
        assert!(Card::wild(WildKind::DrawFour).is_combo_start());
        assert!(Card::wild(WildKind::Democracy).is_combo_start());

        assert!(!Card::normal(Color::Red, NormalKind::Skip).is_combo_start());
        assert!(!Card::wild(WildKind::Spy).is_combo_start());
        assert!(!Card::number(Color::Red, 2).is_combo_start());
    }

    #[test]
    fn test_combo_cards() {
        for card in [
            Card::normal(Color::Red, NormalKind::DrawTwo),
            Card::normal(Color::Red, NormalKind::Skip),
            Card::normal(Color::Red, NormalKind::Reverse),
            Card::wild(WildKind::DrawFour),
            Card::wild(WildKind::Democracy),
            Card::wild(WildKind::Spy),
            Card::wild(WildKind::Exchange),
        ] {
            assert!(card.is_combo_card(), "{card} should be a combo card");
        }

        assert!(!Card::number(Color::Red, 5).is_combo_card());
        assert!(!Card::wild(WildKind::Everybody).is_combo_card());
        assert!(!Card::wild(WildKind::Polluter).is_combo_card());
        assert!(!Card::wild(WildKind::Dictator).is_combo_card());
    }

    #[test]
    fn test_is_special() {
        assert!(!Card::number(Color::Red, 0).is_special());
        assert!(Card::normal(Color::Red, NormalKind::Skip).is_special());
        assert!(Card::wild(WildKind::Spy).is_special());
    }

    #[test]
    fn test_can_play_color_match() {
        let prev = Card::number(Color::Red, 5);
        assert!(Card::number(Color::Red, 3).can_play(&prev, false));
        assert!(Card::normal(Color::Red, NormalKind::Skip).can_play(&prev, false));
        assert!(!Card::number(Color::Blue, 3).can_play(&prev, false));
    }

    #[test]
    fn test_can_play_kind_match() {
        let prev = Card::number(Color::Red, 5);
        assert!(Card::number(Color::Blue, 5).can_play(&prev, false));
        assert!(!Card::number(Color::Blue, 6).can_play(&prev, false));

        let prev = Card::normal(Color::Red, NormalKind::Skip);
        assert!(Card::normal(Color::Green, NormalKind::Skip).can_play(&prev, false));
    }

    #[test]
    fn test_wildcard_always_playable_outside_combo() {
        for prev in [
            Card::number(Color::Red, 5),
            Card::normal(Color::Green, NormalKind::Skip),
            Card::wild(WildKind::DrawFour).with_wild_color(Color::Blue),
        ] {
            assert!(Card::wild(WildKind::Spy).can_play(&prev, false));
            assert!(Card::wild(WildKind::Dictator).can_play(&prev, false));
        }
    }

    #[test]
    fn test_normal_card_on_played_wildcard_needs_color() {
        let prev = Card::wild(WildKind::DrawFour).with_wild_color(Color::Blue);
        assert!(Card::number(Color::Blue, 3).can_play(&prev, false));
        assert!(!Card::number(Color::Red, 3).can_play(&prev, false));
    }

    #[test]
    fn test_combo_mode_restricts_to_combo_cards() {
        let prev = Card::normal(Color::Red, NormalKind::DrawTwo);
        assert!(!Card::number(Color::Red, 5).can_play(&prev, true));
        assert!(Card::normal(Color::Red, NormalKind::Skip).can_play(&prev, true));
        assert!(Card::normal(Color::Blue, NormalKind::DrawTwo).can_play(&prev, true));
    }

    #[test]
    fn test_combo_mode_wildcard_whitelist() {
        let prev = Card::normal(Color::Red, NormalKind::DrawTwo);
        assert!(Card::wild(WildKind::DrawFour)
            .with_wild_color(Color::Red)
            .can_play(&prev, true));
        assert!(Card::wild(WildKind::Democracy)
            .with_wild_color(Color::Red)
            .can_play(&prev, true));
        assert!(Card::wild(WildKind::Spy)
            .with_wild_color(Color::Red)
            .can_play(&prev, true));
        assert!(!Card::wild(WildKind::Exchange)
            .with_wild_color(Color::Red)
            .can_play(&prev, true));
        assert!(!Card::wild(WildKind::Everybody)
            .with_wild_color(Color::Red)
            .can_play(&prev, true));
    }

    #[test]
    fn test_any_combo_card_follows_a_wildcard_in_combo() {
        let prev = Card::wild(WildKind::DrawFour).with_wild_color(Color::Red);
        assert!(Card::normal(Color::Green, NormalKind::Skip).can_play(&prev, true));
        assert!(Card::normal(Color::Blue, NormalKind::DrawTwo).can_play(&prev, true));
        // Exchange rides on a wildcard but never on a normal combo card.
        assert!(Card::wild(WildKind::Exchange).can_play(&prev, true));
        // Non-combo wildcards stay out even here.
        assert!(!Card::wild(WildKind::Everybody).can_play(&prev, true));
    }

    #[test]
    fn test_combo_sequencing_matches_combo_playability_for_normals() {
        // Exhaustive over normal cards against a few representative tops.
        let tops = [
            Card::normal(Color::Red, NormalKind::DrawTwo),
            Card::normal(Color::Green, NormalKind::Skip),
            Card::wild(WildKind::DrawFour).with_wild_color(Color::Blue),
            Card::number(Color::Yellow, 4),
        ];
        for color in Color::ALL {
            let mut cards: Vec<Card> = (0..=9).map(|n| Card::number(color, n)).collect();
            cards.push(Card::normal(color, NormalKind::Skip));
            cards.push(Card::normal(color, NormalKind::Reverse));
            cards.push(Card::normal(color, NormalKind::DrawTwo));
            for card in cards {
                for top in &tops {
                    assert_eq!(
                        card.can_sequence(top, true),
                        card.can_play(top, true),
                        "{card} vs {top}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_combo_sequencing_requires_twins() {
        let red5 = Card::number(Color::Red, 5);
        assert!(Card::number(Color::Blue, 5).can_sequence(&red5, false));
        assert!(Card::number(Color::Red, 5).can_sequence(&red5, false));
        assert!(!Card::number(Color::Red, 6).can_sequence(&red5, false));
        assert!(!Card::normal(Color::Red, NormalKind::Skip).can_sequence(&red5, false));
        assert!(!Card::wild(WildKind::Spy).can_sequence(&red5, false));

        let spy = Card::wild(WildKind::Spy);
        assert!(Card::wild(WildKind::Spy).can_sequence(&spy, false));
        assert!(!Card::wild(WildKind::Exchange).can_sequence(&spy, false));
    }

    #[test]
    fn test_jump_in_requires_exact_match() {
        let red_skip = Card::normal(Color::Red, NormalKind::Skip);
        assert!(Card::normal(Color::Red, NormalKind::Skip).can_jump_in(&red_skip));
        assert!(!Card::normal(Color::Blue, NormalKind::Skip).can_jump_in(&red_skip));
        assert!(!Card::number(Color::Red, 5).can_jump_in(&red_skip));

        let red5 = Card::number(Color::Red, 5);
        assert!(Card::number(Color::Red, 5).can_jump_in(&red5));
        assert!(!Card::number(Color::Blue, 5).can_jump_in(&red5));

        // Wildcards jump in on kind alone, played color is irrelevant.
        let played = Card::wild(WildKind::DrawFour).with_wild_color(Color::Green);
        assert!(Card::wild(WildKind::DrawFour).can_jump_in(&played));
        assert!(!Card::wild(WildKind::Democracy).can_jump_in(&played));
    }

    #[test]
    fn test_reset_wild_state() {
        let mut card = Card::wild(WildKind::Spy)
            .with_wild_color(Color::Red)
            .with_wild_target(PlayerId::new(2));
        card.reset_wild_state();
        assert_eq!(card, Card::wild(WildKind::Spy));

        let mut normal = Card::number(Color::Red, 5);
        normal.reset_wild_state();
        assert_eq!(normal, Card::number(Color::Red, 5));
    }
}
