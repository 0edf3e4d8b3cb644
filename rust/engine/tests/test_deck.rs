use std::collections::HashSet;

use cardlang_engine::cards::{all_suits, all_values, Card, Suit};
use cardlang_engine::deck::Deck;
use cardlang_engine::errors::DeckError;
use cardlang_engine::variant::DeckVariant;

fn standard() -> Deck {
    Deck::new_with_seed(DeckVariant::STANDARD, 42)
}

#[test]
fn fresh_standard_deck_is_complete() {
    let deck = standard();
    assert_eq!(deck.len(), 52);
    for suit in all_suits() {
        for value in all_values() {
            assert_eq!(deck.card_occurrence_count(&Card::new(value, suit)), 1);
        }
    }
    assert!(deck.is_full());
    assert!(!deck.is_over_filled());
    assert!(deck.is_full_or_overfilled());
    assert!(deck.is_valid_deck());
}

#[test]
fn shuffle_keeps_contents() {
    let mut deck = standard();
    let before: HashSet<Card> = deck.cards().iter().copied().collect();
    deck.shuffle();
    let after: HashSet<Card> = deck.cards().iter().copied().collect();
    assert_eq!(deck.len(), 52);
    assert_eq!(before, after);
    assert!(deck.is_valid_deck());
}

#[test]
fn shuffle_changes_order() {
    let ordered = standard();
    let mut shuffled = Deck::new_with_seed(DeckVariant::STANDARD, 7);
    shuffled.shuffle();
    let same = ordered
        .cards()
        .iter()
        .zip(shuffled.cards())
        .take(10)
        .filter(|(a, b)| a == b)
        .count();
    assert!(same < 9, "shuffled deck kept {} of its first 10 cards", same);
}

#[test]
fn pick_random_cards_removes_distinct_cards() {
    let mut deck = standard();
    let picked = deck.pick_random_cards(4).unwrap();
    assert_eq!(picked.len(), 4);
    assert_eq!(deck.len(), 48);
    let unique: HashSet<_> = picked.iter().collect();
    assert_eq!(unique.len(), 4);
    for card in &picked {
        assert_eq!(deck.card_occurrence_count(card), 0);
    }
}

#[test]
fn pick_random_card_shrinks_deck_by_one() {
    let mut deck = standard();
    let first = deck.pick_random_card().unwrap();
    assert_eq!(deck.len(), 51);
    let second = deck.pick_random_card().unwrap();
    assert_eq!(deck.len(), 50);
    assert_ne!(first, second);
}

#[test]
fn over_draw_fails_and_leaves_deck_untouched() {
    let mut deck = standard();
    assert_eq!(
        deck.pick_random_cards(53),
        Err(DeckError::NotEnoughCards {
            requested: 53,
            available: 52
        })
    );
    assert_eq!(deck.len(), 52);
    assert!(deck.is_valid_deck());
}

#[test]
fn drawing_the_whole_deck_empties_it() {
    let mut deck = standard();
    assert_eq!(deck.pick_random_cards(52).unwrap().len(), 52);
    assert!(deck.is_empty());
    assert!(matches!(
        deck.pick_random_card(),
        Err(DeckError::NotEnoughCards { .. })
    ));
}

#[test]
fn pick_card_takes_first_match() {
    let mut deck = standard();
    let king = Card::new(13, Suit::Hearts);
    assert_eq!(deck.pick_card(&king), Ok(king));
    assert_eq!(deck.len(), 51);
    assert_eq!(
        deck.pick_card(&king),
        Err(DeckError::CardNotInDeck { card: king })
    );
    assert_eq!(deck.len(), 51);
}

#[test]
fn pick_then_force_insert_restores_counts() {
    let mut deck = standard();
    let card = Card::new(7, Suit::Clubs);
    let before = deck.card_occurrence_count(&card);

    let picked = deck.pick_card(&card).unwrap();
    deck.insert_card(picked, true).unwrap();

    assert_eq!(deck.card_occurrence_count(&card), before);
    assert_eq!(deck.len(), 52);
    assert_eq!(deck.cards().last(), Some(&card));
}

#[test]
fn duplicate_insert_is_rejected_when_not_full() {
    let mut deck = standard();
    let picked = deck.pick_random_cards(2).unwrap();
    deck.insert_card(picked[0], false).unwrap();
    assert_eq!(deck.len(), 51);
    let snapshot = deck.cards().to_vec();

    assert_eq!(
        deck.insert_card(picked[0], false),
        Err(DeckError::IncorrectDeck {
            card: picked[0],
            occurrences: 1
        })
    );
    assert_eq!(deck.cards(), snapshot.as_slice());

    deck.insert_card(picked[0], true).unwrap();
    assert_eq!(deck.len(), 52);
    assert!(!deck.is_valid_deck());
}

#[test]
fn insert_into_full_deck_needs_force() {
    let mut deck = standard();
    let card = deck.pick_random_card().unwrap();
    deck.insert_card(card, false).unwrap();
    assert!(deck.is_valid_deck());

    assert!(matches!(
        deck.insert_card(card, false),
        Err(DeckError::DeckFull {
            size: 52,
            capacity: 52
        })
    ));

    deck.insert_card(card, true).unwrap();
    assert_eq!(deck.len(), 53);
    assert!(deck.is_over_filled());
    assert!(!deck.is_full());
    assert!(deck.is_full_or_overfilled());
    assert!(!deck.is_valid_deck());
}

#[test]
fn validity_flips() {
    let mut deck = standard();
    assert!(deck.is_valid_deck());

    let card = deck.pick_random_card().unwrap();
    assert!(!deck.is_valid_deck());

    deck.insert_card(card, false).unwrap();
    assert!(deck.is_valid_deck());

    deck.insert_card(card, true).unwrap();
    assert!(!deck.is_valid_deck());
}

#[test]
fn occurrence_count_tracks_inserts() {
    let mut deck = standard();
    let card = deck.pick_random_card().unwrap();
    assert_eq!(deck.card_occurrence_count(&card), 0);
    deck.insert_card(card, false).unwrap();
    assert_eq!(deck.card_occurrence_count(&card), 1);
    deck.insert_card(card, true).unwrap();
    assert_eq!(deck.card_occurrence_count(&card), 2);
}

#[test]
fn full_deck_with_swapped_card_is_invalid() {
    let mut deck = standard();
    deck.pick_card(&Card::new(2, Suit::Hearts)).unwrap();
    deck.insert_card(Card::new(33, Suit::Spades), true).unwrap();
    assert!(deck.is_full());
    assert!(!deck.is_valid_deck());
}
