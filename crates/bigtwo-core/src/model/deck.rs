use crate::model::card::Card;
use crate::model::hand::Hand;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub const HAND_SIZE: usize = 13;

    /// All 52 cards in ascending value.
    pub fn standard() -> Self {
        Self {
            cards: Card::all().collect(),
        }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Consecutive blocks of thirteen cards, one per seat.
    pub fn deal(&self) -> [Hand; 4] {
        array::from_fn(|seat| {
            let start = seat * Self::HAND_SIZE;
            let end = (start + Self::HAND_SIZE).min(self.cards.len());
            Hand::with_cards(self.cards.get(start..end).unwrap_or_default().to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;

    #[test]
    fn standard_deck_spans_every_value_once() {
        let deck = Deck::standard();
        let values: Vec<u8> = deck.cards().iter().map(|card| card.value()).collect();
        assert_eq!(values, (0..52).collect::<Vec<u8>>());
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let deck_a = Deck::shuffled_with_seed(42);
        let deck_b = Deck::shuffled_with_seed(42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let deck_a = Deck::shuffled_with_seed(1);
        let deck_b = Deck::shuffled_with_seed(2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn deal_hands_out_thirteen_each() {
        let hands = Deck::shuffled_with_seed(7).deal();
        let mut all: Vec<u8> = hands
            .iter()
            .flat_map(|hand| hand.iter().map(|card| card.value()))
            .collect();
        assert!(hands.iter().all(|hand| hand.len() == 13));
        all.sort();
        assert_eq!(all, (0..52).collect::<Vec<u8>>());
    }
}
