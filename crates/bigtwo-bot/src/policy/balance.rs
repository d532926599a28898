use super::{Policy, PolicyContext, PolicyKind, log_play_decision};
use bigtwo_core::game::round::THREE_OF_DIAMONDS;
use bigtwo_core::model::card::Card;
use bigtwo_core::model::combination::Combination;
use bigtwo_core::model::partition::{Partition, SizePlan};

/// Works with singles, pairs and triples only, leading whichever size holds
/// proportionally the most low combinations.
#[derive(Debug, Default, Clone, Copy)]
pub struct BalancePolicy;

impl BalancePolicy {
    pub fn new() -> Self {
        Self
    }

    /// Lead sizes ordered by the ratio of low to high combinations, the size
    /// with the largest share of low combinations first. Sizes without a high
    /// combination rank as if overwhelmingly low.
    pub fn lead_preference(partition: &Partition, low_cutoff: f64) -> [usize; 3] {
        let mut counts = [(0u32, 0u32); 3];
        for combo in partition.iter() {
            let slot = match combo.len() {
                1 => 0,
                2 => 1,
                3 => 2,
                _ => continue,
            };
            if combo.average_value() < low_cutoff {
                counts[slot].0 += 1;
            } else {
                counts[slot].1 += 1;
            }
        }

        let ratio = |slot: usize| {
            let (low, high) = counts[slot];
            if high == 0 {
                99.0
            } else {
                f64::from(low) / f64::from(high)
            }
        };

        let mut slots = [0usize, 1, 2];
        slots.sort_by(|a, b| ratio(*a).total_cmp(&ratio(*b)));
        slots.reverse();
        slots.map(|slot| slot + 1)
    }
}

impl Policy for BalancePolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Balance
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Vec<Card> {
        let params = ctx.params;
        let partition = Partition::decompose(ctx.hand.cards(), SizePlan::UpTo(3));

        if ctx.is_leading() {
            let (lead, reason) = if ctx.is_start_of_round {
                (partition.containing(THREE_OF_DIAMONDS), "open_with_three")
            } else {
                let lead = Self::lead_preference(&partition, params.balance_low_cutoff())
                    .into_iter()
                    .find_map(|size| partition.first_of_size(size));
                (lead, "lead_preferred_size")
            };
            let chosen: Vec<Card> = match lead.or_else(|| partition.first()) {
                Some(combo) => combo.cards().to_vec(),
                None => ctx.hand.lowest().into_iter().collect(),
            };
            log_play_decision(ctx, self.kind(), &chosen, reason);
            return chosen;
        }

        let target = ctx.play_to_beat;
        let mut available: Vec<Combination> = partition.beating(target).cloned().collect();
        if available.is_empty() {
            let regrouped = Partition::decompose(ctx.hand.cards(), SizePlan::Exact(target.len()));
            available = regrouped.beating(target).cloned().collect();
        }

        let min_opponent = ctx.min_opponent_hand_size();
        let (chosen, reason) = match (available.first(), available.last()) {
            (None, _) | (_, None) => (Vec::new(), "no_beating_play"),
            (_, Some(strongest)) if min_opponent == target.len() => {
                (strongest.cards().to_vec(), "beat_strongest")
            }
            (Some(weakest), _)
                if min_opponent >= params.balance_hold_min_hand()
                    && weakest.average_value() >= params.balance_hold_value() =>
            {
                (Vec::new(), "hold_high")
            }
            (Some(weakest), _) => (weakest.cards().to_vec(), "beat_weakest"),
        };
        log_play_decision(ctx, self.kind(), &chosen, reason);
        chosen
    }
}
