//! Judging a pick: does a list of cards satisfy a wanted set of colours,
//! suits, values or exact cards?

use serde::Deserialize;

use crate::cards::{Card, Colour, Suit, Value};
use crate::errors::SequenceError;
use crate::language::Ledger;

/// The attribute a pick is compared on, with the wanted values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Colours(Vec<Colour>),
    Suits(Vec<Suit>),
    Values(Vec<Value>),
    Cards(Vec<Card>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchMode {
    /// At least `matches_required` picked cards hit the wanted list.
    AnyMatch { matches_required: usize },
    /// Every picked card hits the wanted list; each entry is used up once.
    AllMatch,
    /// Picked card `i` equals wanted entry `i`.
    OrderMatch,
}

impl Criterion {
    /// Applies `mode` to `picked`.
    ///
    /// ```
    /// use cardlang_engine::cards::{Card, Colour, Suit};
    /// use cardlang_engine::matcher::{Criterion, MatchMode};
    ///
    /// let picked = [Card::new(1, Suit::Hearts), Card::new(5, Suit::Spades)];
    /// let red = Criterion::Colours(vec![Colour::Red]);
    /// assert!(red.matches(MatchMode::AnyMatch { matches_required: 1 }, &picked));
    /// assert!(!red.matches(MatchMode::AllMatch, &picked));
    /// ```
    pub fn matches(&self, mode: MatchMode, picked: &[Card]) -> bool {
        match self {
            Criterion::Colours(wanted) => mode.apply(wanted, picked.iter().map(Card::colour)),
            Criterion::Suits(wanted) => mode.apply(wanted, picked.iter().map(|c| c.suit)),
            Criterion::Values(wanted) => mode.apply(wanted, picked.iter().map(|c| c.value)),
            Criterion::Cards(wanted) => match mode {
                // every listed copy of a card counts as a separate hit
                MatchMode::AnyMatch { matches_required } => {
                    let hits: usize = picked
                        .iter()
                        .map(|card| wanted.iter().filter(|w| *w == card).count())
                        .sum();
                    hits >= matches_required
                }
                _ => mode.apply(wanted, picked.iter().copied()),
            },
        }
    }
}

impl MatchMode {
    fn apply<T: PartialEq + Clone>(self, wanted: &[T], keys: impl Iterator<Item = T>) -> bool {
        match self {
            MatchMode::AnyMatch { matches_required } => {
                keys.filter(|k| wanted.contains(k)).count() >= matches_required
            }
            MatchMode::AllMatch => {
                let mut remaining = wanted.to_vec();
                for key in keys {
                    match remaining.iter().position(|w| *w == key) {
                        Some(idx) => {
                            remaining.swap_remove(idx);
                        }
                        None => return false,
                    }
                }
                true
            }
            MatchMode::OrderMatch => keys
                .enumerate()
                .all(|(idx, key)| wanted.get(idx) == Some(&key)),
        }
    }
}

/// A criterion bound to a ledger entry.
///
/// Deserializes from the flat shape scenario files use:
/// `{"from_sequence": 2, "mode": "any_match", "matches_required": 1, "colours": ["red"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPickCheck")]
pub struct PickCheck {
    /// Ledger entry to judge; the last one when `None`.
    pub from_sequence: Option<usize>,
    pub mode: MatchMode,
    pub criterion: Criterion,
}

impl PickCheck {
    pub fn evaluate(&self, ledger: &Ledger) -> Result<bool, SequenceError> {
        let entry = match self.from_sequence {
            Some(sequence) => ledger.get(sequence).ok_or(SequenceError::BadSource {
                sequence,
                current: ledger.len() + 1,
            })?,
            None => ledger
                .last()
                .map(|(_, entry)| entry)
                .ok_or(SequenceError::BadSource {
                    sequence: 0,
                    current: 1,
                })?,
        };
        Ok(self.criterion.matches(self.mode, entry.cards()))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeName {
    AnyMatch,
    AllMatch,
    OrderMatch,
}

#[derive(Deserialize)]
struct RawPickCheck {
    #[serde(default)]
    from_sequence: Option<usize>,
    mode: ModeName,
    #[serde(default)]
    matches_required: Option<usize>,
    #[serde(default)]
    colours: Option<Vec<Colour>>,
    #[serde(default)]
    suits: Option<Vec<Suit>>,
    #[serde(default)]
    values: Option<Vec<Value>>,
    #[serde(default)]
    cards: Option<Vec<Card>>,
}

impl TryFrom<RawPickCheck> for PickCheck {
    type Error = String;

    fn try_from(raw: RawPickCheck) -> Result<Self, Self::Error> {
        let mut criteria = [
            raw.colours.map(Criterion::Colours),
            raw.suits.map(Criterion::Suits),
            raw.values.map(Criterion::Values),
            raw.cards.map(Criterion::Cards),
        ]
        .into_iter()
        .flatten();
        let criterion = criteria
            .next()
            .ok_or("one of colours, suits, values or cards is required")?;
        if criteria.next().is_some() {
            return Err("only one of colours, suits, values or cards may be given".into());
        }

        let mode = match raw.mode {
            ModeName::AnyMatch => MatchMode::AnyMatch {
                matches_required: raw.matches_required.unwrap_or(1),
            },
            ModeName::AllMatch => MatchMode::AllMatch,
            ModeName::OrderMatch => MatchMode::OrderMatch,
        };

        Ok(PickCheck {
            from_sequence: raw.from_sequence,
            mode,
            criterion,
        })
    }
}
