use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::trace;

use crate::cards::{all_suits, all_values, Card};
use crate::errors::DeckError;
use crate::variant::DeckVariant;

/// An ordered pile of cards constrained by a [`DeckVariant`].
///
/// Storage order is physical stacking order: index 0 is the first card laid
/// down, new cards are appended at the end.
///
/// # Examples
///
/// ```
/// use cardlang_engine::cards::{Card, Suit};
/// use cardlang_engine::deck::Deck;
/// use cardlang_engine::variant::DeckVariant;
///
/// let mut deck = Deck::new_with_seed(DeckVariant::STANDARD, 7);
/// let ace = deck.pick_card(&Card::new(1, Suit::Spades)).unwrap();
/// assert_eq!(deck.len(), 51);
/// assert!(!deck.is_valid_deck());
///
/// deck.insert_card(ace, false).unwrap();
/// assert!(deck.is_valid_deck());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    variant: DeckVariant,
    cards: Vec<Card>,
    #[serde(skip)]
    rng: ChaCha20Rng,
}

impl Deck {
    /// Fresh, ordered deck with a randomly seeded generator.
    pub fn new(variant: DeckVariant) -> Self {
        Self::new_with_seed(variant, rand::random())
    }

    pub fn new_with_seed(variant: DeckVariant, seed: u64) -> Self {
        let mut deck = Self {
            variant,
            cards: Vec::with_capacity(variant.capacity()),
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.reset();
        deck
    }

    /// Replaces the generator; the cards are left untouched.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    pub fn variant(&self) -> DeckVariant {
        self.variant
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Rebuilds the deck suit by suit, ace to king, each card repeated per
    /// the variant, followed by the jokers.
    pub fn reset(&mut self) {
        self.cards.clear();
        if self.variant.occurrences_per_card > 0 {
            for suit in all_suits() {
                for value in all_values() {
                    for _ in 0..self.variant.occurrences_per_card {
                        self.cards.push(Card::new(value, suit));
                    }
                }
            }
        }
        self.cards
            .extend(std::iter::repeat_n(Card::joker(), self.variant.jokers));
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
        trace!(cards = self.cards.len(), "deck shuffled");
    }

    pub fn pick_random_card(&mut self) -> Result<Card, DeckError> {
        let mut picked = self.pick_random_cards(1)?;
        // pick_random_cards(1) yields exactly one card on success
        picked.pop().ok_or(DeckError::NotEnoughCards {
            requested: 1,
            available: 0,
        })
    }

    /// Removes `count` cards chosen uniformly without replacement. Nothing
    /// is removed if the deck holds fewer than `count` cards.
    pub fn pick_random_cards(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::NotEnoughCards {
                requested: count,
                available: self.cards.len(),
            });
        }
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let idx = self.rng.random_range(0..self.cards.len());
            picked.push(self.cards.remove(idx));
        }
        trace!(count, remaining = self.cards.len(), "picked random cards");
        Ok(picked)
    }

    /// Removes the first card (in storage order) equal to `card`.
    pub fn pick_card(&mut self, card: &Card) -> Result<Card, DeckError> {
        let idx = self
            .cards
            .iter()
            .position(|c| c == card)
            .ok_or(DeckError::CardNotInDeck { card: *card })?;
        Ok(self.cards.remove(idx))
    }

    /// Appends `card`. Unless `force` is set, refuses to overflow the deck or
    /// to exceed the card's allowed number of occurrences.
    pub fn insert_card(&mut self, card: Card, force: bool) -> Result<(), DeckError> {
        if !force {
            if self.is_full_or_overfilled() {
                return Err(DeckError::DeckFull {
                    size: self.cards.len(),
                    capacity: self.variant.capacity(),
                });
            }
            let occurrences = self.card_occurrence_count(&card);
            if occurrences >= self.allowed_occurrences(&card) {
                return Err(DeckError::IncorrectDeck { card, occurrences });
            }
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn card_occurrence_count(&self, card: &Card) -> usize {
        self.cards.iter().filter(|c| *c == card).count()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() == self.variant.capacity()
    }

    pub fn is_over_filled(&self) -> bool {
        self.cards.len() > self.variant.capacity()
    }

    pub fn is_full_or_overfilled(&self) -> bool {
        self.cards.len() >= self.variant.capacity()
    }

    /// Full, with every (suit, value) pair present exactly as often as the
    /// variant demands and exactly the configured number of jokers.
    pub fn is_valid_deck(&self) -> bool {
        if !self.is_full() {
            return false;
        }
        let expected = self.variant.occurrences_per_card;
        let pairs_ok = all_suits().into_iter().all(|suit| {
            all_values()
                .into_iter()
                .all(|value| self.card_occurrence_count(&Card::new(value, suit)) == expected)
        });
        pairs_ok && self.card_occurrence_count(&Card::joker()) == self.variant.jokers
    }

    fn allowed_occurrences(&self, card: &Card) -> usize {
        if card.is_joker() {
            self.variant.jokers
        } else {
            self.variant.occurrences_per_card
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn reset_order_is_suit_major_then_jokers() {
        let deck = Deck::new_with_seed(DeckVariant::STANDARD_WITH_JOKERS, 1);
        let cards = deck.cards();
        assert_eq!(cards[0], Card::new(1, Suit::Spades));
        assert_eq!(cards[12], Card::new(13, Suit::Spades));
        assert_eq!(cards[13], Card::new(1, Suit::Hearts));
        assert_eq!(cards[51], Card::new(13, Suit::Diamonds));
        assert!(cards[52].is_joker() && cards[53].is_joker());
    }

    #[test]
    fn canasta_repeats_each_card_in_place() {
        let deck = Deck::new_with_seed(DeckVariant::CANASTA, 1);
        assert_eq!(deck.len(), 108);
        assert_eq!(deck.cards()[0], deck.cards()[1]);
        assert!(deck.is_valid_deck());
    }

    #[test]
    fn reset_discards_previous_contents() {
        let mut deck = Deck::new_with_seed(DeckVariant::STANDARD, 3);
        deck.pick_random_cards(20).unwrap();
        deck.insert_card(Card::joker(), true).unwrap();
        deck.reset();
        assert_eq!(deck.len(), 52);
        assert!(deck.is_valid_deck());
    }

    #[test]
    fn reseeded_clone_draws_independently() {
        let original = Deck::new_with_seed(DeckVariant::STANDARD, 5);
        let mut a = original.clone();
        let mut b = original.clone();
        b.reseed(6);
        assert_eq!(a.cards(), b.cards());
        assert_ne!(a.pick_random_cards(5).unwrap(), b.pick_random_cards(5).unwrap());
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = Deck::new_with_seed(DeckVariant::STANDARD, 99);
        let mut b = Deck::new_with_seed(DeckVariant::STANDARD, 99);
        assert_eq!(a.pick_random_cards(5).unwrap(), b.pick_random_cards(5).unwrap());
    }
}
