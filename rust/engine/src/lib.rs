//! # cardlang-engine: Deck Model and Command Sequencing
//!
//! Models physical decks of playing cards and a small command language that
//! runs an ordered list of deck operations, recording each result so later
//! steps can refer back to it.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card and joker values (Suit, Value, Colour, Card)
//! - [`variant`] - Deck shapes (standard, with jokers, canasta, empty)
//! - [`deck`] - Ordered deck with composition rules, draws and inserts
//! - [`language`] - Step execution and the result ledger
//! - [`matcher`] - Checks picked cards against wanted colours/suits/values/cards
//! - [`probability`] - Repeats a scenario and reports its success rate
//! - [`errors`] - Error types for deck and sequence operations
//!
//! ## Quick Start
//!
//! ```rust
//! use cardlang_engine::language::{Language, Step};
//!
//! let mut lang = Language::new(vec![
//!     Step::init_deck("standard_deck"),
//!     Step::shuffle(1),
//!     Step::pick_random_cards(5, 2),
//! ]);
//! let ledger = lang.execute().unwrap();
//! assert_eq!(ledger.get(3).unwrap().len(), 5);
//! ```
//!
//! ## Probability
//!
//! ```rust
//! use cardlang_engine::cards::Colour;
//! use cardlang_engine::deck::Deck;
//! use cardlang_engine::probability::run_probability_test;
//! use cardlang_engine::variant::DeckVariant;
//!
//! let red = run_probability_test(2_000, || {
//!     let mut deck = Deck::new(DeckVariant::STANDARD);
//!     deck.pick_random_card().map(|c| c.colour() == Colour::Red).unwrap_or(false)
//! });
//! assert!((30.0..70.0).contains(&red));
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod language;
pub mod matcher;
pub mod probability;
pub mod variant;
