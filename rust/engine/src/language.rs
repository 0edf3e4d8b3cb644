//! The command-sequencing engine.
//!
//! A [`Language`] holds an ordered list of [`Step`]s. Each run executes them
//! in order and records every result in a [`Ledger`] under the step's
//! 1-based sequence number, where later steps can pick it up again through
//! `from_sequence` / `sequence` references.

use std::collections::BTreeMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::SequenceError;
use crate::variant::DeckVariant;

/// One entry of a sequence: a command name and its parameter bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub command: String,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Step {
    pub fn new(command: impl Into<String>, meta: Map<String, Value>) -> Self {
        Self {
            command: command.into(),
            meta,
        }
    }

    pub fn init_deck(deck_type: &str) -> Self {
        Self::new("init_deck", object(json!({ "deck_type": deck_type })))
    }

    pub fn pick_random_cards(count: usize, from_sequence: usize) -> Self {
        Self::new(
            "pick_random_cards",
            object(json!({ "count": count, "from_sequence": from_sequence })),
        )
    }

    pub fn pick_specific_cards(cards: &[Card], from_sequence: usize) -> Self {
        Self::new(
            "pick_specific_cards",
            object(json!({ "cards": cards, "from_sequence": from_sequence })),
        )
    }

    pub fn shuffle(sequence: usize) -> Self {
        Self::new("shuffle", object(json!({ "sequence": sequence })))
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// What a step produced: a whole deck or a plain list of picked cards.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepResult {
    Deck(Deck),
    Cards(Vec<Card>),
}

impl StepResult {
    pub fn as_deck(&self) -> Option<&Deck> {
        match self {
            StepResult::Deck(deck) => Some(deck),
            StepResult::Cards(_) => None,
        }
    }

    pub fn as_cards(&self) -> Option<&[Card]> {
        match self {
            StepResult::Deck(_) => None,
            StepResult::Cards(cards) => Some(cards),
        }
    }

    /// The cards of either shape, in storage order.
    pub fn cards(&self) -> &[Card] {
        match self {
            StepResult::Deck(deck) => deck.cards(),
            StepResult::Cards(cards) => cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards().is_empty()
    }
}

/// Results of one run keyed by 1-based sequence number. Keys are contiguous
/// from 1 because results are only ever appended.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    results: BTreeMap<usize, StepResult>,
}

impl Ledger {
    pub fn get(&self, sequence: usize) -> Option<&StepResult> {
        self.results.get(&sequence)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn last(&self) -> Option<(usize, &StepResult)> {
        self.results.last_key_value().map(|(k, v)| (*k, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &StepResult)> {
        self.results.iter().map(|(k, v)| (*k, v))
    }

    fn get_mut(&mut self, sequence: usize) -> Option<&mut StepResult> {
        self.results.get_mut(&sequence)
    }

    fn append(&mut self, result: StepResult) -> usize {
        let sequence = self.results.len() + 1;
        self.results.insert(sequence, result);
        sequence
    }

    fn clear(&mut self) {
        self.results.clear();
    }
}

type Handler = fn(&mut Language, &Map<String, Value>) -> Result<StepResult, SequenceError>;

const COMMANDS: [(&str, Handler); 4] = [
    ("init_deck", Language::command_init_deck),
    ("pick_random_cards", Language::command_pick_random_cards),
    ("pick_specific_cards", Language::command_pick_specific_cards),
    ("shuffle", Language::command_shuffle),
];

/// Names of every command a step may use.
pub fn supported_commands() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|(name, _)| *name)
}

fn handler_for(command: &str) -> Result<Handler, SequenceError> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, handler)| *handler)
        .ok_or_else(|| SequenceError::UnsupportedCommand {
            command: command.to_string(),
        })
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InitDeckMeta {
    deck_type: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PickRandomCardsMeta {
    #[serde(default = "default_count")]
    count: usize,
    #[serde(default)]
    from_sequence: Option<usize>,
}

fn default_count() -> usize {
    1
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PickSpecificCardsMeta {
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    from_sequence: Option<usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ShuffleMeta {
    #[serde(default)]
    sequence: Option<usize>,
}

fn parse_meta<T: DeserializeOwned>(
    command: &str,
    meta: &Map<String, Value>,
) -> Result<T, SequenceError> {
    serde_json::from_value(Value::Object(meta.clone())).map_err(|e| SequenceError::InvalidMeta {
        command: command.to_string(),
        reason: e.to_string(),
    })
}

/// A pile a command operates on: either a deck living in the ledger, or a
/// throwaway deck built from a card list.
enum Source<'a> {
    Ledger(&'a mut Deck),
    Detached(Deck),
}

impl Source<'_> {
    fn deck(&mut self) -> &mut Deck {
        match self {
            Source::Ledger(deck) => deck,
            Source::Detached(deck) => deck,
        }
    }

    fn into_deck(self) -> Deck {
        match self {
            Source::Ledger(deck) => deck.clone(),
            Source::Detached(deck) => deck,
        }
    }
}

/// Executes a sequence of deck commands and keeps the results of the last run.
///
/// # Examples
///
/// ```
/// use cardlang_engine::language::{Language, Step};
///
/// let mut lang = Language::with_seed(
///     vec![
///         Step::init_deck("standard_deck"),
///         Step::pick_random_cards(10, 1),
///         Step::pick_random_cards(5, 2),
///     ],
///     42,
/// );
/// let ledger = lang.execute().unwrap();
/// assert_eq!(ledger.get(1).unwrap().len(), 42);
/// assert_eq!(ledger.get(2).unwrap().len(), 10);
/// assert_eq!(ledger.get(3).unwrap().len(), 5);
/// ```
#[derive(Debug)]
pub struct Language {
    steps: Vec<Step>,
    ledger: Ledger,
    current_sequence: usize,
    rng: ChaCha20Rng,
}

impl Language {
    pub fn new(steps: Vec<Step>) -> Self {
        Self::with_seed(steps, rand::random())
    }

    /// Every deck the engine creates is seeded from `seed`, so the first run
    /// of two engines built with the same seed yields identical ledgers.
    pub fn with_seed(steps: Vec<Step>, seed: u64) -> Self {
        Self {
            steps,
            ledger: Ledger::default(),
            current_sequence: 1,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Results of the most recent run, complete or partial.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Checks every step names a supported command without running anything.
    pub fn validate(&self) -> Result<(), SequenceError> {
        self.steps
            .iter()
            .try_for_each(|step| handler_for(&step.command).map(|_| ()))
    }

    /// Runs all steps in order on a cleared ledger. The first failing step
    /// aborts the run; the ledger keeps the results recorded before it.
    pub fn execute(&mut self) -> Result<&Ledger, SequenceError> {
        self.ledger.clear();
        self.current_sequence = 1;

        let steps = std::mem::take(&mut self.steps);
        let outcome = self.run_steps(&steps);
        self.steps = steps;
        outcome?;

        Ok(&self.ledger)
    }

    fn run_steps(&mut self, steps: &[Step]) -> Result<(), SequenceError> {
        for step in steps {
            let sequence = self.current_sequence;
            debug!(sequence, command = %step.command, "executing step");

            let result = handler_for(&step.command).and_then(|handler| handler(self, &step.meta));
            let result = match result {
                Ok(result) => result,
                Err(e) => {
                    warn!(sequence, command = %step.command, error = %e, "step failed");
                    return Err(e);
                }
            };

            debug!(sequence, cards = result.len(), "step recorded");
            self.ledger.append(result);
            self.current_sequence += 1;
        }
        Ok(())
    }

    /// Resolves a reference to an earlier step (the previous one when
    /// omitted) into a deck to work on.
    fn resolve_source(&mut self, sequence: Option<usize>) -> Result<Source<'_>, SequenceError> {
        let current = self.current_sequence;
        let sequence = sequence.unwrap_or(current - 1);
        let bad_source = SequenceError::BadSource { sequence, current };
        if sequence == 0 || sequence >= current {
            return Err(bad_source);
        }

        match self.ledger.get_mut(sequence) {
            Some(StepResult::Deck(deck)) => Ok(Source::Ledger(deck)),
            Some(StepResult::Cards(cards)) => {
                let mut deck = Deck::new_with_seed(DeckVariant::EMPTY, self.rng.next_u64());
                for card in cards.iter() {
                    deck.insert_card(*card, true)?;
                }
                Ok(Source::Detached(deck))
            }
            None => Err(bad_source),
        }
    }

    fn command_init_deck(&mut self, meta: &Map<String, Value>) -> Result<StepResult, SequenceError> {
        let meta: InitDeckMeta = parse_meta("init_deck", meta)?;
        let variant = DeckVariant::by_name(&meta.deck_type)?;
        Ok(StepResult::Deck(Deck::new_with_seed(
            variant,
            self.rng.next_u64(),
        )))
    }

    fn command_pick_random_cards(
        &mut self,
        meta: &Map<String, Value>,
    ) -> Result<StepResult, SequenceError> {
        let meta: PickRandomCardsMeta = parse_meta("pick_random_cards", meta)?;
        let mut source = self.resolve_source(meta.from_sequence)?;
        let picked = source.deck().pick_random_cards(meta.count)?;
        Ok(StepResult::Cards(picked))
    }

    fn command_pick_specific_cards(
        &mut self,
        meta: &Map<String, Value>,
    ) -> Result<StepResult, SequenceError> {
        let meta: PickSpecificCardsMeta = parse_meta("pick_specific_cards", meta)?;
        let mut source = self.resolve_source(meta.from_sequence)?;
        let deck = source.deck();
        let picked = meta
            .cards
            .iter()
            .map(|card| deck.pick_card(card))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StepResult::Cards(picked))
    }

    fn command_shuffle(&mut self, meta: &Map<String, Value>) -> Result<StepResult, SequenceError> {
        let meta: ShuffleMeta = parse_meta("shuffle", meta)?;
        let seed = self.rng.next_u64();
        let mut source = self.resolve_source(meta.sequence)?;
        source.deck().shuffle();
        // the stored copy must not share the source's generator state
        let mut deck = source.into_deck();
        deck.reseed(seed);
        Ok(StepResult::Deck(deck))
    }
}
