use crate::model::order::CardOrder;
use core::fmt;

/// Big Two rank, ordered from Three (lowest) to Two (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Rank {
    Three = 0,
    Four = 1,
    Five = 2,
    Six = 3,
    Seven = 4,
    Eight = 5,
    Nine = 6,
    Ten = 7,
    Jack = 8,
    Queen = 9,
    King = 10,
    Ace = 11,
    Two = 12,
}

impl Rank {
    pub const ORDERED: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ORDERED.len() {
            Some(Self::ORDERED[index])
        } else {
            None
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        CardOrder::STANDARD
            .rank_index(symbol)
            .and_then(Self::from_index)
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        // ORDERED and the standard rank string have the same length.
        CardOrder::STANDARD
            .rank_symbol(self.index())
            .unwrap_or('?')
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
