use serde::Serialize;

use crate::errors::SequenceError;

/// Shape of a deck: how many non-joker cards it holds, how often each
/// (suit, value) pair appears, and how many jokers sit on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct DeckVariant {
    pub non_joker_cards: usize,
    pub occurrences_per_card: usize,
    pub jokers: usize,
}

impl DeckVariant {
    pub const STANDARD: DeckVariant = DeckVariant::new(52, 1, 0);
    pub const STANDARD_WITH_JOKERS: DeckVariant = DeckVariant::new(52, 1, 2);
    pub const CANASTA: DeckVariant = DeckVariant::new(104, 2, 4);
    pub const EMPTY: DeckVariant = DeckVariant::new(0, 0, 0);

    pub const fn new(non_joker_cards: usize, occurrences_per_card: usize, jokers: usize) -> Self {
        Self {
            non_joker_cards,
            occurrences_per_card,
            jokers,
        }
    }

    /// Size of a full deck of this shape.
    pub const fn capacity(&self) -> usize {
        self.non_joker_cards + self.jokers
    }

    /// Looks up a variant by the name `init_deck` accepts.
    ///
    /// ```
    /// use cardlang_engine::variant::DeckVariant;
    ///
    /// let canasta = DeckVariant::by_name("canasta_deck").unwrap();
    /// assert_eq!(canasta.capacity(), 108);
    /// assert!(DeckVariant::by_name("bogus").is_err());
    /// ```
    pub fn by_name(name: &str) -> Result<DeckVariant, SequenceError> {
        DECK_TYPES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| SequenceError::UnsupportedDeckType {
                deck_type: name.to_string(),
            })
    }

    /// Registered name of this shape, if it is one of [`DECK_TYPES`].
    pub fn name(&self) -> Option<&'static str> {
        DECK_TYPES
            .iter()
            .find(|(_, v)| v == self)
            .map(|(n, _)| *n)
    }
}

/// Deck types accepted by `init_deck`. New shapes are added here as data.
pub const DECK_TYPES: [(&str, DeckVariant); 4] = [
    ("standard_deck", DeckVariant::STANDARD),
    ("standard_deck_with_jokers", DeckVariant::STANDARD_WITH_JOKERS),
    ("canasta_deck", DeckVariant::CANASTA),
    ("empty_deck", DeckVariant::EMPTY),
];
