use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bigtwo_bot::PolicyKind;
use serde::Serialize;
use thiserror::Error;

use crate::tournament::{DecisionSummary, RoundOutcome};

const CONFIDENCE_Z: f64 = 1.96;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("agent '{0}' appears in results but not in the configuration")]
    UnknownAgent(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Per-agent running totals across every round and seating.
pub struct AnalyticsCollector {
    run_id: String,
    agents: Vec<AgentAccumulator>,
    index: HashMap<String, usize>,
    rounds: usize,
}

impl AnalyticsCollector {
    pub fn new<'a>(run_id: &str, agents: impl IntoIterator<Item = (&'a str, PolicyKind)>) -> Self {
        let agents: Vec<AgentAccumulator> = agents
            .into_iter()
            .map(|(name, policy)| AgentAccumulator::new(name.to_string(), policy))
            .collect();
        let index = agents
            .iter()
            .enumerate()
            .map(|(idx, acc)| (acc.name.clone(), idx))
            .collect();
        Self {
            run_id: run_id.to_string(),
            agents,
            index,
            rounds: 0,
        }
    }

    pub fn record_round(&mut self, outcome: &RoundOutcome) -> Result<(), AnalyticsError> {
        for seat in &outcome.seat_results {
            let idx = *self
                .index
                .get(&seat.agent_name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(seat.agent_name.clone()))?;
            self.agents[idx].record_round(
                seat.score_delta,
                seat.won,
                seat.cards_left,
                &seat.metrics,
            );
        }
        self.rounds += 1;
        Ok(())
    }

    pub fn finalize(self) -> AnalyticsSummary {
        AnalyticsSummary {
            run_id: self.run_id,
            rounds: self.rounds,
            agents: self
                .agents
                .into_iter()
                .map(AgentAccumulator::into_report)
                .collect(),
        }
    }
}

struct AgentAccumulator {
    name: String,
    policy: PolicyKind,
    rounds: usize,
    wins: usize,
    per_round_scores: Vec<f64>,
    cards_left: usize,
    decisions: u64,
    passes: u64,
    total_latency_ms: f64,
}

impl AgentAccumulator {
    fn new(name: String, policy: PolicyKind) -> Self {
        Self {
            name,
            policy,
            rounds: 0,
            wins: 0,
            per_round_scores: Vec::new(),
            cards_left: 0,
            decisions: 0,
            passes: 0,
            total_latency_ms: 0.0,
        }
    }

    fn record_round(
        &mut self,
        score_delta: i32,
        won: bool,
        cards_left: usize,
        metrics: &DecisionSummary,
    ) {
        self.rounds += 1;
        if won {
            self.wins += 1;
        }
        self.per_round_scores.push(f64::from(score_delta));
        self.cards_left += cards_left;
        self.decisions += u64::from(metrics.decisions);
        self.passes += u64::from(metrics.passes);
        self.total_latency_ms += metrics.total_ms;
    }

    fn into_report(self) -> AgentReport {
        let rounds = self.rounds.max(1) as f64;
        let decisions = self.decisions.max(1) as f64;
        let total_score: f64 = self.per_round_scores.iter().sum();
        AgentReport {
            ci95: confidence_interval(&self.per_round_scores),
            name: self.name,
            policy: self.policy.as_str().to_string(),
            rounds: self.rounds,
            wins: self.wins,
            win_rate: self.wins as f64 / rounds,
            total_score: total_score as i64,
            avg_score: total_score / rounds,
            avg_cards_left: self.cards_left as f64 / rounds,
            pass_rate: self.passes as f64 / decisions,
            average_ms_per_decision: self.total_latency_ms / decisions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub rounds: usize,
    pub agents: Vec<AgentReport>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str(&format!("# Tournament Summary: {}\n\n", self.run_id));
        rows.push_str(&format!("Rounds played: {}\n\n", self.rounds));
        rows.push_str("| Agent | Policy | Rounds | Win % | Total score | Avg score | 95% CI | Avg cards left | Pass % | Avg ms/decision |\n");
        rows.push_str("|-------|--------|--------|-------|-------------|-----------|--------|----------------|--------|-----------------|\n");

        for agent in &self.agents {
            rows.push_str(&format!(
                "| {name} | {policy} | {rounds} | {win:.1}% | {total:+} | {avg:+.3} | [{ci_low:.3}, {ci_high:.3}] | {cards:.2} | {pass:.1}% | {latency:.3} |\n",
                name = agent.name,
                policy = agent.policy,
                rounds = agent.rounds,
                win = agent.win_rate * 100.0,
                total = agent.total_score,
                avg = agent.avg_score,
                ci_low = agent.ci95.0,
                ci_high = agent.ci95.1,
                cards = agent.avg_cards_left,
                pass = agent.pass_rate * 100.0,
                latency = agent.average_ms_per_decision,
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }

    pub fn agent(&self, name: &str) -> Option<&AgentReport> {
        self.agents.iter().find(|agent| agent.name == name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub policy: String,
    pub rounds: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub total_score: i64,
    pub avg_score: f64,
    pub ci95: (f64, f64),
    pub avg_cards_left: f64,
    pub pass_rate: f64,
    pub average_ms_per_decision: f64,
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}
