mod seating;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bigtwo_bot::{Policy, PolicyContext, PolicyKind, PolicyParams};
use bigtwo_core::game::match_state::MatchState;
use bigtwo_core::model::combination::Combination;
use bigtwo_core::model::player::PlayerPosition;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary};
use crate::config::{AgentConfig, BenchmarkConfig, ResolvedOutputs, ValidationError};

pub use seating::{ALL_SEATINGS, seatings};

/// Upper bound on decisions in one round.
const MAX_TURNS: usize = 1_000;

/// Plays seeded rounds for four configured agents and records the results.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    seatings: Vec<[usize; 4]>,
    logging_enabled: bool,
    params: PolicyParams,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub rounds_played: usize,
    pub permutations: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub analytics: AnalyticsSummary,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        Self::with_params(config, outputs, PolicyParams::from_env())
    }

    pub fn with_params(
        config: BenchmarkConfig,
        outputs: ResolvedOutputs,
        params: PolicyParams,
    ) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;
        if agents.len() != 4 {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        config.games.validate()?;

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            seatings: seatings(config.games.permutations),
            config,
            outputs,
            agents,
            params,
        })
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new(
            &self.config.run_id,
            self.agents
                .iter()
                .map(|agent| (agent.name.as_str(), agent.kind)),
        );

        for round_index in 0..self.config.games.rounds {
            let deal_seed = rng.next_u64();

            for (perm_index, seating) in self.seatings.iter().enumerate() {
                let outcome = self.play_round(round_index, perm_index, deal_seed, seating)?;
                analytics.record_round(&outcome)?;
                rows_written += write_round_rows(
                    &mut writer,
                    &self.config.run_id,
                    round_index,
                    perm_index,
                    deal_seed,
                    &outcome,
                )?;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .logging_enabled
            .then(|| crate::logging::telemetry_dir(&self.outputs).join("telemetry.jsonl"));

        Ok(RunSummary {
            rounds_played: self.config.games.rounds,
            permutations: self.seatings.len(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
            analytics: summary,
        })
    }

    fn play_round(
        &self,
        round_index: usize,
        permutation_index: usize,
        deal_seed: u64,
        seating: &[usize; 4],
    ) -> Result<RoundOutcome, RunnerError> {
        let mut match_state = MatchState::with_seed(deal_seed);
        let mut seats = build_seat_states(seating, &self.agents)?;
        let round_no = round_index as u32;

        let mut turns = 0usize;
        while !match_state.round().is_finished() {
            if turns >= MAX_TURNS {
                return Err(RunnerError::game(format!(
                    "round {round_index} did not finish within {MAX_TURNS} turns"
                )));
            }
            turns += 1;

            let seat = match_state.round().current_player();
            let seat_state = &mut seats[seat.index()];
            let cards = {
                let request = match_state
                    .round()
                    .request_for(seat, match_state.scores(), round_no);
                let hand = request.hand();
                let target = request.target();
                let ctx = PolicyContext::new(&request, &hand, &target, self.params);

                let start = Instant::now();
                let cards = seat_state.policy.choose_play(&ctx);
                let elapsed_ms = seat_state.metrics.record(start.elapsed(), cards.is_empty());

                if self.logging_enabled && tracing::enabled!(Level::INFO) {
                    event!(
                        target: "bigtwo_bench::play",
                        Level::INFO,
                        run_id = %self.config.run_id,
                        round_index = round_index as u32,
                        permutation_index = permutation_index as u32,
                        seat = seat.index() as u32,
                        bot = %seat_state.agent_name,
                        to_beat = %target,
                        cards = %Combination::new(cards.clone()),
                        elapsed_ms
                    );
                }

                cards
            };

            let passed = cards.is_empty();
            if let Err(err) = match_state.round_mut().play(seat, cards) {
                if passed {
                    return Err(RunnerError::game(format!(
                        "{seat} ({}) could not pass: {err}",
                        seat_state.agent_name
                    )));
                }
                // A misjudged follow becomes a pass.
                seat_state.metrics.rejected += 1;
                event!(
                    target: "bigtwo_bench::play",
                    Level::WARN,
                    run_id = %self.config.run_id,
                    round_index = round_index as u32,
                    seat = seat.index() as u32,
                    bot = %seat_state.agent_name,
                    error = %err,
                    "play rejected; passing"
                );
                match_state
                    .round_mut()
                    .play(seat, Vec::new())
                    .map_err(|err| {
                        RunnerError::game(format!(
                            "{seat} ({}) could not pass after a rejected play: {err}",
                            seat_state.agent_name
                        ))
                    })?;
            }
        }

        let tricks = match_state.round().trick_history().len() + 1;
        let cards_left = match_state.round().hand_sizes();
        let (winner, deltas) = match_state
            .finish_round_and_start_next()
            .ok_or_else(|| RunnerError::game("round ended without a winner".to_string()))?;

        if self.logging_enabled && tracing::enabled!(Level::INFO) {
            event!(
                target: "bigtwo_bench::round",
                Level::INFO,
                run_id = %self.config.run_id,
                round_index = round_index as u32,
                permutation_index = permutation_index as u32,
                winner = winner.index() as u32,
                tricks = tricks as u32,
                turns = turns as u32,
                deltas = ?deltas
            );
        }

        let seating = seats
            .iter()
            .map(|seat| SeatSnapshot {
                seat: seat.seat.index(),
                bot: seat.agent_name.clone(),
            })
            .collect();

        let seat_results = seats
            .into_iter()
            .map(|seat| {
                let idx = seat.seat.index();
                SeatResult {
                    agent_name: seat.agent_name,
                    policy: seat.kind,
                    seat: seat.seat,
                    won: seat.seat == winner,
                    cards_left: cards_left[idx],
                    score_delta: deltas[idx],
                    metrics: seat.metrics.finalize(),
                }
            })
            .collect();

        Ok(RoundOutcome {
            seating,
            seat_results,
            winner,
            tricks,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_round_rows(
    writer: &mut BufWriter<File>,
    run_id: &str,
    round_index: usize,
    permutation_index: usize,
    deal_seed: u64,
    outcome: &RoundOutcome,
) -> Result<usize, RunnerError> {
    let deal_id = format!("R{round_index:05}_P{permutation_index:02}");

    let mut rows_written = 0usize;
    for seat_result in &outcome.seat_results {
        let row = DealLogRow {
            run_id: run_id.to_string(),
            deal_id: deal_id.clone(),
            round_index,
            permutation_index,
            deal_seed,
            seat: seat_result.seat.index(),
            bot: seat_result.agent_name.clone(),
            policy: seat_result.policy.as_str().to_string(),
            seating: outcome.seating.clone(),
            won: seat_result.won,
            cards_left: seat_result.cards_left,
            score_delta: seat_result.score_delta,
            tricks: outcome.tricks,
            decisions: seat_result.metrics.decisions,
            passes: seat_result.metrics.passes,
            rejected: seat_result.metrics.rejected,
            speed_ms_turn: seat_result.metrics.avg_ms_per_decision,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn build_seat_states(
    seating: &[usize; 4],
    agents: &[AgentBlueprint],
) -> Result<Vec<SeatState>, RunnerError> {
    let mut seats = Vec::with_capacity(4);
    for (seat_idx, agent_idx) in seating.iter().enumerate() {
        let seat = PlayerPosition::from_index(seat_idx)
            .ok_or_else(|| RunnerError::game(format!("invalid seat index generated: {seat_idx}")))?;
        let agent = agents
            .get(*agent_idx)
            .ok_or(RunnerError::InvalidPermutation {
                index: seat_idx,
                agent_index: *agent_idx,
            })?;
        seats.push(SeatState::new(seat, agent));
    }
    Ok(seats)
}

struct AgentBlueprint {
    name: String,
    kind: PolicyKind,
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, RunnerError> {
        configs
            .iter()
            .map(|cfg| -> Result<Self, RunnerError> {
                Ok(Self {
                    name: cfg.name.clone(),
                    kind: cfg.policy_kind()?,
                })
            })
            .collect()
    }
}

struct SeatState {
    seat: PlayerPosition,
    agent_name: String,
    kind: PolicyKind,
    policy: Box<dyn Policy>,
    metrics: DecisionMetrics,
}

impl SeatState {
    fn new(seat: PlayerPosition, agent: &AgentBlueprint) -> Self {
        Self {
            seat,
            agent_name: agent.name.clone(),
            kind: agent.kind,
            policy: agent.kind.build(),
            metrics: DecisionMetrics::default(),
        }
    }
}

pub struct RoundOutcome {
    pub seating: Vec<SeatSnapshot>,
    pub seat_results: Vec<SeatResult>,
    pub winner: PlayerPosition,
    pub tricks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatSnapshot {
    pub seat: usize,
    pub bot: String,
}

pub struct SeatResult {
    pub agent_name: String,
    pub policy: PolicyKind,
    pub seat: PlayerPosition,
    pub won: bool,
    pub cards_left: usize,
    pub score_delta: i32,
    pub metrics: DecisionSummary,
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
    passes: u32,
    rejected: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration, passed: bool) -> f64 {
        self.total += duration;
        self.decisions += 1;
        if passed {
            self.passes += 1;
        }
        duration.as_secs_f64() * 1000.0
    }

    fn finalize(self) -> DecisionSummary {
        let total_ms = self.total.as_secs_f64() * 1000.0;
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            total_ms / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            passes: self.passes,
            rejected: self.rejected,
            avg_ms_per_decision: avg_ms,
            total_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub passes: u32,
    pub rejected: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[derive(Serialize)]
struct DealLogRow {
    run_id: String,
    deal_id: String,
    round_index: usize,
    permutation_index: usize,
    deal_seed: u64,
    seat: usize,
    bot: String,
    policy: String,
    seating: Vec<SeatSnapshot>,
    won: bool,
    cards_left: usize,
    score_delta: i32,
    tricks: usize,
    decisions: u32,
    passes: u32,
    rejected: u32,
    speed_ms_turn: f64,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("expected exactly four agents, found {found}")]
    SeatCount { found: usize },
    #[error("seating assigns seat {index} to unknown agent index {agent_index}")]
    InvalidPermutation { index: usize, agent_index: usize },
    #[error(transparent)]
    Config(#[from] ValidationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize row: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
    #[error("game error: {0}")]
    Game(String),
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game(message)
    }
}
