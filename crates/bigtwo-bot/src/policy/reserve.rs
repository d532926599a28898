use super::{Policy, PolicyContext, PolicyKind, log_play_decision};
use bigtwo_core::model::beat::BeatMode;
use bigtwo_core::model::card::Card;
use bigtwo_core::model::partition::Partition;

const LEAD_GROUP: usize = 3;

/// Groups cards by rank and keeps high groups back while the table is still
/// full of cards.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReservePolicy;

impl ReservePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for ReservePolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Reserve
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Vec<Card> {
        if ctx.is_leading() {
            let (chosen, reason) = if ctx.is_start_of_round {
                (ctx.opening_single(), "open_with_three")
            } else {
                let groups = Partition::grouped_by_rank(ctx.hand.cards(), LEAD_GROUP);
                let lead = groups
                    .first()
                    .map(|combo| combo.cards().to_vec())
                    .unwrap_or_default();
                (lead, "lead_lowest_group")
            };
            log_play_decision(ctx, self.kind(), &chosen, reason);
            return chosen;
        }

        let target = ctx.play_to_beat;
        let groups = Partition::grouped_by_rank(ctx.hand.cards(), target.len());
        let mode = BeatMode::for_table(&ctx.hand_sizes, target.len());
        let cards_in_hands: usize = ctx.hand_sizes.iter().sum();

        let (chosen, reason) = match groups.pick_beating(target, mode) {
            None => (Vec::new(), "no_beating_play"),
            Some(combo)
                if combo.value_total() as usize + cards_in_hands
                    > ctx.params.reserve_limit() as usize =>
            {
                (Vec::new(), "reserve_high")
            }
            Some(combo) => (combo.cards().to_vec(), "beat_group"),
        };
        log_play_decision(ctx, self.kind(), &chosen, reason);
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::ReservePolicy;
    use crate::params::PolicyParams;
    use crate::policy::{Policy, PolicyContext};
    use bigtwo_core::game::request::PlayRequest;
    use bigtwo_core::model::card::Card;
    use bigtwo_core::model::player::PlayerPosition;

    fn decide(hand: &[&str], to_beat: &[&str], sizes: [usize; 4], start: bool) -> Vec<String> {
        let mut request =
            PlayRequest::leading(Card::parse_all(hand).unwrap(), PlayerPosition::North, sizes);
        request.play_to_beat = Card::parse_all(to_beat).unwrap();
        request.is_start_of_round = start;
        let hand = request.hand();
        let target = request.target();
        let ctx = PolicyContext::new(&request, &hand, &target, PolicyParams::default());
        ReservePolicy::new()
            .choose_play(&ctx)
            .iter()
            .map(|card| card.code())
            .collect()
    }

    const HAND: [&str; 12] = [
        "4D", "4H", "4S", "8D", "8H", "0D", "0C", "JH", "QC", "QS", "KH", "AS",
    ];

    #[test]
    fn leads_lowest_rank_group() {
        assert_eq!(decide(&HAND, &[], [12, 8, 8, 8], false), vec!["4D", "4H", "4S"]);
        assert_eq!(decide(&["3D", "3S", "9C"], &[], [3, 13, 13, 13], true), vec!["3D"]);
    }

    #[test]
    fn answers_with_the_lowest_matching_group() {
        // 8D 8H sums to 42, plus 28 cards still held.
        assert_eq!(decide(&HAND, &["5D", "5S"], [12, 8, 4, 4], false), vec!["8D", "8H"]);
    }

    #[test]
    fn reserves_high_cards_while_hands_are_full() {
        // QC QS sums to 76; with 40 cards still held that tops 85.
        assert!(decide(&HAND, &["0H", "0S"], [12, 10, 9, 9], false).is_empty());
        assert_eq!(decide(&HAND, &["0H", "0S"], [2, 2, 2, 2], false), vec!["QC", "QS"]);
    }
}
