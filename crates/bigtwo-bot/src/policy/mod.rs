mod balance;
mod decomposer;
mod reserve;
mod single;

pub use balance::BalancePolicy;
pub use decomposer::DecomposerPolicy;
pub use reserve::ReservePolicy;
pub use single::{SingleMode, SinglePolicy};

use crate::params::PolicyParams;
use bigtwo_core::game::request::PlayRequest;
use bigtwo_core::game::round::THREE_OF_DIAMONDS;
use bigtwo_core::model::card::Card;
use bigtwo_core::model::combination::Combination;
use bigtwo_core::model::hand::Hand;
use bigtwo_core::model::player::PlayerPosition;
use bigtwo_core::model::trick::Play;
use std::fmt;
use std::str::FromStr;
use tracing::{Level, event};

/// Context provided to policies for one decision.
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub is_start_of_round: bool,
    /// Empty on a free lead.
    pub play_to_beat: &'a Combination,
    pub round_history: &'a [Vec<Play>],
    pub hand_sizes: [usize; 4],
    pub scores: [i32; 4],
    pub round_no: u32,
    pub params: PolicyParams,
}

impl<'a> PolicyContext<'a> {
    pub fn new(
        request: &'a PlayRequest,
        hand: &'a Hand,
        play_to_beat: &'a Combination,
        params: PolicyParams,
    ) -> Self {
        Self {
            seat: request.player_no,
            hand,
            is_start_of_round: request.is_start_of_round,
            play_to_beat,
            round_history: &request.round_history,
            hand_sizes: request.hand_sizes,
            scores: request.scores,
            round_no: request.round_no,
            params,
        }
    }

    pub fn is_leading(&self) -> bool {
        self.play_to_beat.is_empty()
    }

    pub fn min_hand_size(&self) -> usize {
        self.hand_sizes.iter().copied().min().unwrap_or(0)
    }

    pub fn min_opponent_hand_size(&self) -> usize {
        PlayerPosition::LOOP
            .iter()
            .filter(|seat| **seat != self.seat)
            .map(|seat| self.hand_sizes[seat.index()])
            .min()
            .unwrap_or(0)
    }

    pub fn played_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.round_history
            .iter()
            .flatten()
            .flat_map(|play| play.cards.iter().copied())
    }

    /// First play of the round: 3D when held, otherwise the lowest card.
    fn opening_single(&self) -> Vec<Card> {
        if self.hand.contains(THREE_OF_DIAMONDS) {
            vec![THREE_OF_DIAMONDS]
        } else {
            self.hand.lowest().into_iter().collect()
        }
    }
}

/// Decision interface shared by every heuristic.
pub trait Policy: Send {
    fn kind(&self) -> PolicyKind;

    /// Cards to play; an empty result is a pass. Never empty when leading
    /// with cards in hand.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Vec<Card>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    #[default]
    Decomposer,
    Balance,
    Reserve,
    Charge,
    Carry,
    Aggressive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyKindError(pub String);

impl fmt::Display for ParsePolicyKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown policy '{}' (expected one of: {})",
            self.0,
            PolicyKind::ALL
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParsePolicyKindError {}

impl PolicyKind {
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Decomposer,
        PolicyKind::Balance,
        PolicyKind::Reserve,
        PolicyKind::Charge,
        PolicyKind::Carry,
        PolicyKind::Aggressive,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Decomposer => "decomposer",
            PolicyKind::Balance => "balance",
            PolicyKind::Reserve => "reserve",
            PolicyKind::Charge => "charge",
            PolicyKind::Carry => "carry",
            PolicyKind::Aggressive => "aggressive",
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        read("BIGTWO_POLICY")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn build(self) -> Box<dyn Policy> {
        match self {
            PolicyKind::Decomposer => Box::new(DecomposerPolicy::new()),
            PolicyKind::Balance => Box::new(BalancePolicy::new()),
            PolicyKind::Reserve => Box::new(ReservePolicy::new()),
            PolicyKind::Charge => Box::new(SinglePolicy::new(SingleMode::Charge)),
            PolicyKind::Carry => Box::new(SinglePolicy::new(SingleMode::Carry)),
            PolicyKind::Aggressive => Box::new(SinglePolicy::new(SingleMode::Aggressive)),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = ParsePolicyKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decomposer" | "full" => Ok(PolicyKind::Decomposer),
            "balance" => Ok(PolicyKind::Balance),
            "reserve" | "reserve_card" => Ok(PolicyKind::Reserve),
            "charge" => Ok(PolicyKind::Charge),
            "carry" => Ok(PolicyKind::Carry),
            "aggressive" | "progressively_aggressive" => Ok(PolicyKind::Aggressive),
            _ => Err(ParsePolicyKindError(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-call decision entry point with default thresholds.
pub fn play_request(request: &PlayRequest, kind: PolicyKind) -> Vec<Card> {
    play_request_with(request, kind, PolicyParams::default())
}

pub fn play_request_with(request: &PlayRequest, kind: PolicyKind, params: PolicyParams) -> Vec<Card> {
    let hand = request.hand();
    let play_to_beat = request.target();
    let ctx = PolicyContext::new(request, &hand, &play_to_beat, params);
    kind.build().choose_play(&ctx)
}

pub(crate) fn log_play_decision(
    ctx: &PolicyContext,
    kind: PolicyKind,
    chosen: &[Card],
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let to_beat = ctx.play_to_beat.to_string();
    let choice = Combination::new(chosen.to_vec()).to_string();

    event!(
        target: "bigtwo_bot::play",
        Level::INFO,
        seat = ctx.seat.index(),
        policy = kind.as_str(),
        hand_size = ctx.hand.len(),
        min_hand = ctx.min_hand_size(),
        start_of_round = ctx.is_start_of_round,
        play_to_beat = %to_beat,
        chosen = %choice,
        pass = chosen.is_empty(),
        reason,
    );
}
