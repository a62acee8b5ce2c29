//! Deck property tests: shuffle permutation, draw accounting, and wire
//! encoding of cards.

use combo_uno::{Card, Color, Deck, PlayerId, WildKind, DECK_SIZE};
use proptest::prelude::*;

fn count_matching(cards: &[Card], wanted: &Card) -> usize {
    cards.iter().filter(|c| c.is_same_piece(wanted)).count()
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut deck = Deck::new(seed);
        deck.randomize_draw_pile();
        let drawn = deck.deal(DECK_SIZE).unwrap();

        let canonical = Deck::canonical_cards();
        prop_assert_eq!(drawn.len(), canonical.len());
        for wanted in &canonical {
            prop_assert_eq!(
                count_matching(&drawn, wanted),
                count_matching(&canonical, wanted)
            );
        }
    }

    #[test]
    fn draw_accounting_holds(seed in any::<u64>(), draws in 0usize..DECK_SIZE) {
        let mut deck = Deck::new(seed);
        deck.randomize_draw_pile();

        let cards = deck.deal(draws).unwrap();
        prop_assert_eq!(cards.len(), draws);
        prop_assert_eq!(deck.draw_pile_size(), DECK_SIZE - draws);
    }

    #[test]
    fn can_draw_matches_the_visible_discard_rule(
        draw in 0usize..20,
        discard in 1usize..20,
        n in 0usize..25,
    ) {
        let deck = Deck::from_piles(
            vec![Card::number(Color::Red, 1); draw],
            vec![Card::number(Color::Blue, 2); discard],
            42,
        );

        prop_assert_eq!(deck.can_draw_cards(n), draw + discard > n + 1);
    }

    #[test]
    fn drawing_never_consumes_the_visible_discard(seed in any::<u64>()) {
        // Small piles force a mid-run flip of the discard pile.
        let mut deck = Deck::from_piles(
            vec![Card::number(Color::Red, 3)],
            vec![
                Card::number(Color::Blue, 1),
                Card::number(Color::Green, 7),
                Card::number(Color::Yellow, 9),
            ],
            seed,
        );

        while deck.can_draw_cards(1) {
            deck.draw_card().unwrap();
            prop_assert!(deck.discard_pile_size() >= 1);
        }

        // Past the guard the deck eventually reports exhaustion on its own,
        // still holding one visible discard.
        while deck.draw_card().is_ok() {}
        prop_assert_eq!(deck.discard_pile_size(), 1);
        prop_assert_eq!(deck.draw_pile_size(), 0);
    }
}

#[test]
fn every_card_roundtrips_through_the_wire_encodings() {
    let mut cards = Deck::canonical_cards();
    // Played wildcard state survives encoding too.
    cards.push(
        Card::wild(WildKind::Spy)
            .with_wild_color(Color::Red)
            .with_wild_target(PlayerId::new(2)),
    );
    cards.push(Card::wild(WildKind::DrawFour).with_wild_color(Color::Green));

    for card in cards {
        let bytes = bincode::serialize(&card).unwrap();
        let decoded: Card = bincode::deserialize(&bytes).unwrap();
        assert_eq!(card, decoded);

        let json = serde_json::to_string(&card).unwrap();
        let decoded: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, decoded);
    }
}

#[test]
fn same_seed_reproduces_the_whole_deal() {
    let mut a = Deck::new(99);
    let mut b = Deck::new(99);
    a.randomize_draw_pile();
    b.randomize_draw_pile();

    assert_eq!(a.deal(DECK_SIZE).unwrap(), b.deal(DECK_SIZE).unwrap());
}
