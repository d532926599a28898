use crate::model::card::Card;
use crate::model::combination::{Combination, IndexCombinations};

/// Which combination sizes the decomposer tries, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePlan {
    /// Sizes from `[5, 3, 2, 1]` no larger than the limit, largest first.
    UpTo(usize),
    /// Only the given size.
    Exact(usize),
}

impl SizePlan {
    pub const PLAYABLE_SIZES: [usize; 4] = [5, 3, 2, 1];

    pub fn sizes(self) -> Vec<usize> {
        match self {
            SizePlan::UpTo(limit) => Self::PLAYABLE_SIZES
                .iter()
                .copied()
                .filter(|size| *size <= limit)
                .collect(),
            SizePlan::Exact(size) => vec![size],
        }
    }
}

/// Disjoint combinations chosen from a hand, in the order they were found,
/// plus the cards left over.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    combinations: Vec<Combination>,
    unused: Vec<Card>,
}

impl Partition {
    /// Greedy packing: for each planned size, repeatedly takes the first valid
    /// combination in lexicographic order over the value-sorted remaining
    /// cards until none is left.
    pub fn decompose(cards: &[Card], plan: SizePlan) -> Self {
        let mut pool = cards.to_vec();
        pool.sort();
        let mut combinations = Vec::new();

        for size in plan.sizes() {
            while let Some(indices) = first_valid(&pool, size) {
                let picked: Vec<Card> = indices.iter().map(|&idx| pool[idx]).collect();
                for &idx in indices.iter().rev() {
                    pool.remove(idx);
                }
                combinations.push(Combination::new(picked));
            }
        }

        Self {
            combinations,
            unused: pool,
        }
    }

    /// Groups same-rank cards: each card joins the first earlier group of its
    /// rank holding fewer than `max_len` cards, otherwise it opens a new group.
    pub fn grouped_by_rank(cards: &[Card], max_len: usize) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort();
        let mut groups: Vec<Vec<Card>> = Vec::new();

        for card in sorted {
            match groups
                .iter_mut()
                .find(|group| group[0].rank == card.rank && group.len() < max_len)
            {
                Some(group) => group.push(card),
                None => groups.push(vec![card]),
            }
        }

        Self {
            combinations: groups.into_iter().map(Combination::new).collect(),
            unused: Vec::new(),
        }
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn unused(&self) -> &[Card] {
        &self.unused
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.combinations.iter()
    }

    pub fn first(&self) -> Option<&Combination> {
        self.combinations.first()
    }

    pub fn containing(&self, card: Card) -> Option<&Combination> {
        self.combinations.iter().find(|combo| combo.contains(card))
    }

    pub fn first_of_size(&self, size: usize) -> Option<&Combination> {
        self.combinations.iter().find(|combo| combo.len() == size)
    }
}

fn first_valid(pool: &[Card], size: usize) -> Option<Vec<usize>> {
    IndexCombinations::new(pool.len(), size).find(|indices| {
        let candidate: Vec<Card> = indices.iter().map(|&idx| pool[idx]).collect();
        Combination::new(candidate).is_valid()
    })
}

#[cfg(test)]
mod tests {
    use super::{Partition, SizePlan};
    use crate::model::card::Card;

    fn cards(codes: &[&str]) -> Vec<Card> {
        Card::parse_all(codes).unwrap()
    }

    fn layout(partition: &Partition) -> Vec<Vec<String>> {
        partition.iter().map(|combo| combo.codes()).collect()
    }

    #[test]
    fn plan_sizes_respect_limit() {
        assert_eq!(SizePlan::UpTo(5).sizes(), vec![5, 3, 2, 1]);
        assert_eq!(SizePlan::UpTo(3).sizes(), vec![3, 2, 1]);
        assert_eq!(SizePlan::UpTo(4).sizes(), vec![3, 2, 1]);
        assert_eq!(SizePlan::Exact(2).sizes(), vec![2]);
    }

    #[test]
    fn decomposes_straight_then_pairs_then_singles() {
        let hand = cards(&[
            "6D", "6C", "8D", "8H", "0C", "JD", "QC", "QH", "KH", "KS", "AD",
        ]);
        let partition = Partition::decompose(&hand, SizePlan::UpTo(5));
        assert_eq!(
            layout(&partition),
            vec![
                vec!["0C", "JD", "QC", "KH", "AD"],
                vec!["6D", "6C"],
                vec!["8D", "8H"],
                vec!["QH"],
                vec!["KS"],
            ]
        );
        assert!(partition.unused().is_empty());
    }

    #[test]
    fn exact_size_leaves_leftovers() {
        let hand = cards(&["3D", "3C", "5H", "9S", "9D"]);
        let partition = Partition::decompose(&hand, SizePlan::Exact(2));
        assert_eq!(layout(&partition), vec![vec!["3D", "3C"], vec!["9D", "9S"]]);
        assert_eq!(partition.unused(), cards(&["5H"]).as_slice());
    }

    #[test]
    fn unsupported_size_yields_nothing() {
        let hand = cards(&["3D", "3C", "3H", "3S"]);
        let partition = Partition::decompose(&hand, SizePlan::Exact(4));
        assert!(partition.is_empty());
        assert_eq!(partition.unused().len(), 4);
    }

    #[test]
    fn full_house_found_before_triples() {
        let hand = cards(&["4D", "4C", "4H", "7S", "7D", "9C"]);
        let partition = Partition::decompose(&hand, SizePlan::UpTo(5));
        assert_eq!(
            layout(&partition),
            vec![vec!["4D", "4C", "4H", "7D", "7S"], vec!["9C"]]
        );
    }

    #[test]
    fn groups_by_rank_up_to_limit() {
        let hand = cards(&["5D", "5C", "5H", "5S", "7D", "KC", "KH"]);
        let partition = Partition::grouped_by_rank(&hand, 3);
        assert_eq!(
            layout(&partition),
            vec![
                vec!["5D", "5C", "5H"],
                vec!["5S"],
                vec!["7D"],
                vec!["KC", "KH"],
            ]
        );
        let singles = Partition::grouped_by_rank(&hand, 1);
        assert_eq!(singles.len(), 7);
    }
}
