use super::{Policy, PolicyContext, PolicyKind, log_play_decision};
use bigtwo_core::game::round::THREE_OF_DIAMONDS;
use bigtwo_core::model::beat::{BeatMode, Strategy};
use bigtwo_core::model::card::Card;
use bigtwo_core::model::partition::SizePlan;

/// Greedy five-card-first decomposition; leads the first combination found
/// and answers with the beat finder.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecomposerPolicy;

impl DecomposerPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for DecomposerPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Decomposer
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Vec<Card> {
        let mut strategy = Strategy::organise(ctx.hand.clone(), SizePlan::UpTo(5));

        if ctx.is_leading() {
            let partition = strategy.partition();
            let (lead, reason) = if ctx.is_start_of_round {
                match partition.containing(THREE_OF_DIAMONDS) {
                    Some(combo) => (Some(combo), "open_with_three"),
                    None => (partition.first(), "open_first"),
                }
            } else {
                (partition.first(), "lead_first")
            };
            let chosen: Vec<Card> = match lead {
                Some(combo) => combo.cards().to_vec(),
                None => ctx.hand.lowest().into_iter().collect(),
            };
            log_play_decision(ctx, self.kind(), &chosen, reason);
            return chosen;
        }

        let mode = BeatMode::for_table(&ctx.hand_sizes, ctx.play_to_beat.len());
        let chosen = strategy
            .beats(ctx.play_to_beat, mode)
            .map(|combo| combo.into_cards())
            .unwrap_or_default();
        let reason = match (chosen.is_empty(), mode) {
            (true, _) => "no_beating_play",
            (false, BeatMode::Strongest) => "beat_strongest",
            (false, BeatMode::Weakest) => "beat_weakest",
        };
        log_play_decision(ctx, self.kind(), &chosen, reason);
        chosen
    }
}
