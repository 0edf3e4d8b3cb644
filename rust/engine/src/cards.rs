use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel used for every joker attribute (value, suit, colour and symbols).
pub const WILDCARD: &str = "*";

/// One of the four suits of a French deck, or the joker sentinel.
/// Used as a component of [`Card`]; colour and symbol derive from it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Spades (♠), black
    Spades,
    /// Hearts (♥), red
    Hearts,
    /// Clubs (♣), black
    Clubs,
    /// Diamonds (♦), red
    Diamonds,
    /// Joker sentinel (`*`)
    #[serde(rename = "*")]
    Joker,
}

impl Suit {
    pub fn colour(self) -> Colour {
        match self {
            Suit::Hearts | Suit::Diamonds => Colour::Red,
            Suit::Spades | Suit::Clubs => Colour::Black,
            Suit::Joker => Colour::Wild,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Joker => WILDCARD,
        }
    }

    /// Tag used in step descriptors (`"hearts"`, `"*"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Joker => WILDCARD,
        }
    }
}

/// Card colour; jokers are wild.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Black,
    #[serde(rename = "*")]
    Wild,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Colour::Red => "red",
            Colour::Black => "black",
            Colour::Wild => WILDCARD,
        })
    }
}

const VALUE_SYMBOLS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Face value of a card: 1 (ace) through 13 (king), or the joker sentinel.
///
/// Numbers outside 1..=13 are representable on purpose; a [`crate::deck::Deck`]
/// simply never counts them as part of a valid composition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawValue", into = "RawValue")]
pub enum Value {
    Number(u8),
    Joker,
}

impl Value {
    pub fn symbol(self) -> &'static str {
        match self {
            Value::Number(n @ 1..=13) => VALUE_SYMBOLS[usize::from(n - 1)],
            Value::Number(_) | Value::Joker => WILDCARD,
        }
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Number(n)
    }
}

// Wire shape of a value: a bare number or the "*" sentinel.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(u8),
    Text(String),
}

impl From<Value> for RawValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Number(n) => RawValue::Number(n),
            Value::Joker => RawValue::Text(WILDCARD.to_string()),
        }
    }
}

impl TryFrom<RawValue> for Value {
    type Error = String;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        match raw {
            RawValue::Number(n) => Ok(Value::Number(n)),
            RawValue::Text(s) if s == WILDCARD => Ok(Value::Joker),
            RawValue::Text(s) => Err(format!("unknown card value `{}`", s)),
        }
    }
}

/// A single playing card or joker. Immutable value type: two cards are the
/// same card iff value and suit match exactly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub fn new(value: impl Into<Value>, suit: Suit) -> Self {
        Self {
            value: value.into(),
            suit,
        }
    }

    pub fn joker() -> Self {
        Self {
            value: Value::Joker,
            suit: Suit::Joker,
        }
    }

    pub fn is_joker(&self) -> bool {
        self.value == Value::Joker && self.suit == Suit::Joker
    }

    pub fn colour(&self) -> Colour {
        if self.is_joker() {
            Colour::Wild
        } else {
            self.suit.colour()
        }
    }

    pub fn suit_symbol(&self) -> &'static str {
        self.suit.symbol()
    }

    pub fn value_symbol(&self) -> &'static str {
        self.value.symbol()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value_symbol(), self.suit_symbol())
    }
}

/// The four real suits in reset order.
pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds]
}

/// Ace through king.
pub fn all_values() -> [Value; 13] {
    let mut values = [Value::Number(1); 13];
    for (i, v) in values.iter_mut().enumerate() {
        *v = Value::Number(i as u8 + 1);
    }
    values
}
