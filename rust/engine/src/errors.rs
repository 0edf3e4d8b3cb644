use thiserror::Error;

use crate::cards::Card;

/// Failures of a single [`crate::deck::Deck`] operation. The deck is left
/// unchanged whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Deck is full ({size} cards, capacity {capacity})")]
    DeckFull { size: usize, capacity: usize },
    #[error("Card `{card}` is already in the deck {occurrences} time(s)")]
    IncorrectDeck { card: Card, occurrences: usize },
    #[error("Not enough cards: requested {requested}, available {available}")]
    NotEnoughCards { requested: usize, available: usize },
    #[error("Card `{card}` is not in the deck")]
    CardNotInDeck { card: Card },
}

/// Failures of a [`crate::language::Language`] run. Each aborts the run at
/// the failing step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Unsupported command `{command}`")]
    UnsupportedCommand { command: String },
    #[error("Unsupported deck type `{deck_type}`")]
    UnsupportedDeckType { deck_type: String },
    #[error("Step {current} cannot use sequence {sequence} as a source")]
    BadSource { sequence: usize, current: usize },
    #[error("Invalid parameters for `{command}`: {reason}")]
    InvalidMeta { command: String, reason: String },
    #[error(transparent)]
    Deck(#[from] DeckError),
}
