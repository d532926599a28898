use crate::model::combination::Combination;
use crate::model::hand::Hand;
use crate::model::partition::{Partition, SizePlan};

/// Which beating combination to pick when several are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatMode {
    /// First beating combination in partition order.
    Weakest,
    /// Last beating combination in partition order.
    Strongest,
}

impl BeatMode {
    /// Strongest when some player could empty their hand with a play of
    /// `target_len` cards.
    pub fn for_table(hand_sizes: &[usize], target_len: usize) -> Self {
        if hand_sizes.iter().min() == Some(&target_len) {
            BeatMode::Strongest
        } else {
            BeatMode::Weakest
        }
    }
}

impl Partition {
    pub fn beating<'a, 'b>(
        &'a self,
        target: &'b Combination,
    ) -> impl Iterator<Item = &'a Combination> {
        self.iter().filter(move |combo| combo.beats(target))
    }

    /// "Weakest" and "strongest" follow the order the partition was built in,
    /// not a re-sort under the comparator.
    pub fn pick_beating(&self, target: &Combination, mode: BeatMode) -> Option<&Combination> {
        let mut beating = self.beating(target);
        match mode {
            BeatMode::Weakest => beating.next(),
            BeatMode::Strongest => beating.last(),
        }
    }
}

/// A hand together with its current partition; the partition is scratch state
/// rebuilt whenever the decomposition plan changes.
#[derive(Debug, Clone)]
pub struct Strategy {
    hand: Hand,
    partition: Partition,
}

impl Strategy {
    pub fn organise(hand: Hand, plan: SizePlan) -> Self {
        let partition = Partition::decompose(hand.cards(), plan);
        Self { hand, partition }
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    pub fn reorganise(&mut self, plan: SizePlan) {
        self.partition = Partition::decompose(self.hand.cards(), plan);
    }

    /// Picks a combination beating `target`. When the current partition has
    /// none, the hand is re-decomposed into combinations of exactly the
    /// target's size and searched again. `None` means pass.
    pub fn beats(&mut self, target: &Combination, mode: BeatMode) -> Option<Combination> {
        if let Some(found) = self.partition.pick_beating(target, mode) {
            return Some(found.clone());
        }
        self.reorganise(SizePlan::Exact(target.len()));
        self.partition.pick_beating(target, mode).cloned()
    }

    /// Same as [`Strategy::beats`] but never re-decomposes.
    pub fn beats_in_place(&self, target: &Combination, mode: BeatMode) -> Option<Combination> {
        self.partition.pick_beating(target, mode).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::{BeatMode, Strategy};
    use crate::model::combination::Combination;
    use crate::model::hand::Hand;
    use crate::model::partition::SizePlan;

    fn hand(codes: &[&str]) -> Hand {
        Hand::from_codes(codes).unwrap()
    }

    fn combo(codes: &[&str]) -> Combination {
        Combination::from_codes(codes).unwrap()
    }

    #[test]
    fn mode_follows_smallest_hand() {
        assert_eq!(BeatMode::for_table(&[7, 13, 13, 9], 1), BeatMode::Weakest);
        assert_eq!(BeatMode::for_table(&[7, 1, 13, 9], 1), BeatMode::Strongest);
        assert_eq!(BeatMode::for_table(&[5, 2, 8, 9], 2), BeatMode::Strongest);
        assert_eq!(BeatMode::for_table(&[], 1), BeatMode::Weakest);
    }

    #[test]
    fn weakest_and_strongest_singles() {
        let mut strategy = Strategy::organise(
            hand(&["6D", "6C", "8D", "8H", "0C", "JD", "QC", "QH", "KH", "KS", "AD"]),
            SizePlan::UpTo(5),
        );
        let target = combo(&["4D"]);
        let weakest = strategy.beats(&target, BeatMode::Weakest).unwrap();
        assert_eq!(weakest.codes(), vec!["QH"]);
        let strongest = strategy.beats(&target, BeatMode::Strongest).unwrap();
        assert_eq!(strongest.codes(), vec!["KS"]);
    }

    #[test]
    fn re_decomposes_to_target_size() {
        let mut strategy = Strategy::organise(hand(&["5D", "5C", "5H", "9S"]), SizePlan::UpTo(5));
        assert_eq!(strategy.partition().first().unwrap().codes(), vec!["5D", "5C", "5H"]);

        let found = strategy.beats(&combo(&["4D", "4S"]), BeatMode::Weakest).unwrap();
        assert_eq!(found.codes(), vec!["5D", "5C"]);
        assert_eq!(strategy.partition().len(), 1);
        assert_eq!(strategy.partition().unused().len(), 2);
    }

    #[test]
    fn nothing_beats_means_pass() {
        let mut strategy = Strategy::organise(hand(&["3D", "4C", "9H"]), SizePlan::UpTo(5));
        assert!(strategy.beats(&combo(&["2S"]), BeatMode::Weakest).is_none());
        assert!(strategy.beats(&combo(&["KD", "KS"]), BeatMode::Weakest).is_none());
    }

    #[test]
    fn in_place_search_does_not_reorganise() {
        let strategy = Strategy::organise(hand(&["5D", "5C", "5H", "9S"]), SizePlan::UpTo(5));
        assert!(strategy.beats_in_place(&combo(&["4D", "4S"]), BeatMode::Weakest).is_none());
        assert_eq!(strategy.partition().len(), 2);
    }
}
