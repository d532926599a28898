use super::{Policy, PolicyContext, PolicyKind, log_play_decision};
use bigtwo_core::model::card::Card;

/// Sum of all 52 card values.
const DECK_VALUE_TOTAL: u32 = 51 * 52 / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleMode {
    /// Rushes out when an opponent is one card away; otherwise keeps its top
    /// card unless the remaining averages favour spending it.
    Charge,
    /// Plays only while it still carries more high cards than low ones.
    Carry,
    /// Smallest beating single after an offset derived from hand sizes.
    Aggressive,
}

/// Plays single cards only and passes on anything bigger.
#[derive(Debug, Clone, Copy)]
pub struct SinglePolicy {
    mode: SingleMode,
}

impl SinglePolicy {
    pub fn new(mode: SingleMode) -> Self {
        Self { mode }
    }

    fn follow(&self, ctx: &PolicyContext, target: Card) -> (Option<Card>, &'static str) {
        let hand = ctx.hand;
        let highest = hand.highest();

        if self.mode != SingleMode::Aggressive && ctx.min_hand_size() == 1 {
            return match highest.filter(|card| *card > target) {
                Some(card) => (Some(card), "rush_highest"),
                None => (None, "cannot_stop"),
            };
        }

        if self.mode == SingleMode::Aggressive {
            let least = hand.len() as i64
                - ctx.min_opponent_hand_size() as i64
                - i64::from(ctx.params.aggressive_offset());
            let skip = usize::try_from(least).unwrap_or(0);
            return match hand.iter().skip(skip).copied().find(|card| *card > target) {
                Some(card) => (Some(card), "beat_after_offset"),
                None => (None, "no_beating_card"),
            };
        }

        let Some(candidate) = hand.iter().copied().find(|card| *card > target) else {
            return (None, "no_beating_card");
        };

        match self.mode {
            SingleMode::Charge => {
                if hand.len() > ctx.params.charge_keep_hand() || Some(candidate) != highest {
                    (Some(candidate), "beat_lowest")
                } else if charge_worthwhile(ctx, candidate) {
                    (Some(candidate), "spend_top_card")
                } else {
                    (None, "keep_top_card")
                }
            }
            SingleMode::Carry => {
                let own_average = hand.value_total() / hand.len().max(1) as u32;
                let unseen = unseen_average(ctx, false).floor();
                if u32::from(candidate.value()) < own_average {
                    (Some(candidate), "below_own_average")
                } else if carries_high(ctx, unseen) {
                    (Some(candidate), "carrying_high")
                } else {
                    (None, "carrying_low")
                }
            }
            SingleMode::Aggressive => (None, "no_beating_card"),
        }
    }
}

impl Policy for SinglePolicy {
    fn kind(&self) -> PolicyKind {
        match self.mode {
            SingleMode::Charge => PolicyKind::Charge,
            SingleMode::Carry => PolicyKind::Carry,
            SingleMode::Aggressive => PolicyKind::Aggressive,
        }
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Vec<Card> {
        if ctx.is_leading() {
            let (chosen, reason) = if ctx.is_start_of_round {
                (ctx.opening_single(), "open_with_three")
            } else {
                (ctx.hand.lowest().into_iter().collect(), "lead_lowest")
            };
            log_play_decision(ctx, self.kind(), &chosen, reason);
            return chosen;
        }

        let (choice, reason) = match ctx.play_to_beat.cards() {
            [target] => self.follow(ctx, *target),
            _ => (None, "not_a_single"),
        };
        let chosen: Vec<Card> = choice.into_iter().collect();
        log_play_decision(ctx, self.kind(), &chosen, reason);
        chosen
    }
}

/// Average value of the cards not yet seen: everything not played this round,
/// optionally excluding our own hand too.
fn unseen_average(ctx: &PolicyContext, exclude_hand: bool) -> f64 {
    let mut total = DECK_VALUE_TOTAL;
    let mut count = 52u32;
    for card in ctx.played_cards() {
        total = total.saturating_sub(u32::from(card.value()));
        count = count.saturating_sub(1);
    }
    if exclude_hand {
        total = total.saturating_sub(ctx.hand.value_total());
        count = count.saturating_sub(ctx.hand.len() as u32);
    }
    if count == 0 {
        return 0.0;
    }
    f64::from(total) / f64::from(count)
}

/// Spending the top card is fine when the rest of the hand still averages
/// close to what the opponents hold, or when the card itself is low.
fn charge_worthwhile(ctx: &PolicyContext, card: Card) -> bool {
    let rest = ctx.hand.len().saturating_sub(1);
    if rest == 0 {
        return true;
    }
    let rest_total = ctx.hand.value_total() - u32::from(card.value());
    let rest_average = f64::from(rest_total) / rest as f64;
    let others = unseen_average(ctx, true);
    rest_average > others - ctx.params.charge_margin()
        || f64::from(card.value()) < rest_average * ctx.params.charge_low_factor()
}

fn carries_high(ctx: &PolicyContext, threshold: f64) -> bool {
    let lower = ctx
        .hand
        .iter()
        .take_while(|card| f64::from(card.value()) <= threshold)
        .count();
    let higher = ctx.hand.len() - lower;
    lower < higher
}
