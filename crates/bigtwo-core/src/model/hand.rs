use crate::model::card::{Card, CardError};
use serde::{Deserialize, Serialize};

/// Cards held by one player, always sorted by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self, CardError> {
        Card::parse_all(codes).map(Self::with_cards)
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    /// Removes every card of `cards`, or nothing when one of them is missing.
    pub fn remove_all(&mut self, cards: &[Card]) -> bool {
        if !self.contains_all(cards) {
            return false;
        }
        for card in cards {
            self.remove(*card);
        }
        true
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn contains_all(&self, cards: &[Card]) -> bool {
        let mut remaining = self.cards.clone();
        cards.iter().all(|card| {
            match remaining.iter().position(|held| held == card) {
                Some(index) => {
                    remaining.remove(index);
                    true
                }
                None => false,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn lowest(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub fn highest(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Sum of card values, the basis of the averaging heuristics.
    pub fn value_total(&self) -> u32 {
        self.cards.iter().map(|card| u32::from(card.value())).sum()
    }

    fn sort(&mut self) {
        self.cards.sort();
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand::with_cards(cards)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Rank::Three, Suit::Clubs);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
    }

    #[test]
    fn cards_are_sorted_by_value() {
        let hand = Hand::from_codes(&["2D", "KS", "3S", "3D"]).unwrap();
        let ordered: Vec<String> = hand.iter().map(|card| card.to_string()).collect();
        assert_eq!(ordered, vec!["3D", "3S", "KS", "2D"]);
        assert_eq!(hand.lowest().unwrap().to_string(), "3D");
        assert_eq!(hand.highest().unwrap().to_string(), "2D");
    }

    #[test]
    fn remove_all_is_all_or_nothing() {
        let mut hand = Hand::from_codes(&["3D", "4D", "5D"]).unwrap();
        let missing = Card::parse_all(&["3D", "6D"]).unwrap();
        assert!(!hand.remove_all(&missing));
        assert_eq!(hand.len(), 3);

        let present = Card::parse_all(&["3D", "5D"]).unwrap();
        assert!(hand.remove_all(&present));
        assert_eq!(hand.cards(), &[Card::new(Rank::Four, Suit::Diamonds)]);
    }

    #[test]
    fn contains_all_counts_duplicates() {
        let hand = Hand::from_codes(&["3D", "4D"]).unwrap();
        let doubled = Card::parse_all(&["3D", "3D"]).unwrap();
        assert!(!hand.contains_all(&doubled));
    }

    #[test]
    fn deserializes_and_sorts_codes() {
        let hand: Hand = serde_json::from_str(r#"["AS","3C","9H"]"#).unwrap();
        assert_eq!(serde_json::to_string(&hand).unwrap(), r#"["3C","9H","AS"]"#);
        assert_eq!(hand.value_total(), 1 + 26 + 47);
    }
}
