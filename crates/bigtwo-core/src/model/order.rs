/// The two fixed symbol sequences that define card ordering, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOrder {
    ranks: &'static str,
    suits: &'static str,
}

impl CardOrder {
    pub const STANDARD: CardOrder = CardOrder {
        ranks: "34567890JQKA2",
        suits: "DCHS",
    };

    pub fn rank_index(&self, symbol: char) -> Option<usize> {
        self.ranks.chars().position(|c| c == symbol)
    }

    pub fn suit_index(&self, symbol: char) -> Option<usize> {
        self.suits.chars().position(|c| c == symbol)
    }

    pub fn rank_symbol(&self, index: usize) -> Option<char> {
        self.ranks.chars().nth(index)
    }

    pub fn suit_symbol(&self, index: usize) -> Option<char> {
        self.suits.chars().nth(index)
    }
}

impl Default for CardOrder {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::CardOrder;

    #[test]
    fn ten_is_written_as_zero() {
        let order = CardOrder::STANDARD;
        assert_eq!(order.rank_index('0'), Some(7));
        assert_eq!(order.rank_symbol(7), Some('0'));
        assert_eq!(order.rank_index('T'), None);
    }

    #[test]
    fn two_ranks_highest_and_spades_top_suit() {
        let order = CardOrder::STANDARD;
        assert_eq!(order.rank_index('2'), Some(12));
        assert_eq!(order.suit_index('S'), Some(3));
        assert_eq!(order.suit_index('D'), Some(0));
    }
}
