use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A single playing card. Field order makes the derived ordering match `value()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("invalid card representation {0:?}")]
    InvalidRepresentation(String),
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn from_value(value: u8) -> Result<Self, CardError> {
        let rank = Rank::from_index(usize::from(value / 4));
        let suit = Suit::from_index(usize::from(value % 4));
        match (rank, suit) {
            (Some(rank), Some(suit)) => Ok(Self::new(rank, suit)),
            _ => Err(CardError::InvalidRepresentation(value.to_string())),
        }
    }

    pub const fn rank_index(self) -> usize {
        self.rank.index()
    }

    pub const fn suit_index(self) -> usize {
        self.suit.index()
    }

    /// Canonical sort key in `0..52`.
    pub const fn value(self) -> u8 {
        (self.rank.index() * 4 + self.suit.index()) as u8
    }

    /// Every card of the deck in ascending value.
    pub fn all() -> impl Iterator<Item = Card> {
        Rank::ORDERED
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
    }

    pub fn code(self) -> String {
        self.to_string()
    }

    pub fn parse_all<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Card>, CardError> {
        codes.iter().map(|code| code.as_ref().parse()).collect()
    }

    /// Orders card codes by value, failing on the first malformed code.
    pub fn sort_codes<S: AsRef<str>>(codes: &[S]) -> Result<Vec<String>, CardError> {
        let mut cards = Self::parse_all(codes)?;
        cards.sort();
        Ok(cards.into_iter().map(Card::code).collect())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut chars = text.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => Rank::from_symbol(rank)
                .zip(Suit::from_symbol(suit))
                .map(|(rank, suit)| Card::new(rank, suit)),
            _ => None,
        };
        parsed.ok_or_else(|| CardError::InvalidRepresentation(text.to_string()))
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> String {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardError};
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn parses_two_character_codes() {
        let card: Card = "0C".parse().unwrap();
        assert_eq!(card, Card::new(Rank::Ten, Suit::Clubs));
        assert_eq!(card.value(), 29);
        assert_eq!(card.to_string(), "0C");
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in ["", "3", "3DD", "1D", "3X", "10D"] {
            assert_eq!(
                bad.parse::<Card>(),
                Err(CardError::InvalidRepresentation(bad.to_string()))
            );
        }
    }

    #[test]
    fn value_bounds() {
        assert_eq!(Card::from_value(0).unwrap().to_string(), "3D");
        assert_eq!(Card::from_value(51).unwrap().to_string(), "2S");
        assert!(Card::from_value(52).is_err());
    }

    #[test]
    fn ordering_follows_value() {
        let ace_spades: Card = "AS".parse().unwrap();
        let two_diamonds: Card = "2D".parse().unwrap();
        assert!(two_diamonds > ace_spades);
        assert!(two_diamonds.value() > ace_spades.value());
    }

    #[test]
    fn sort_codes_orders_by_value() {
        let sorted = Card::sort_codes(&["2D", "3S", "3D", "KH"]).unwrap();
        assert_eq!(sorted, vec!["3D", "3S", "KH", "2D"]);
        assert!(Card::sort_codes(&["3D", "ZZ"]).is_err());
    }

    #[test]
    fn serializes_as_code() {
        let card: Card = "QH".parse().unwrap();
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"QH\"");
        let back: Card = serde_json::from_str("\"QH\"").unwrap();
        assert_eq!(back, card);
        assert!(serde_json::from_str::<Card>("\"Q\"").is_err());
    }
}
