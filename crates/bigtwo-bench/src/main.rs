use std::path::PathBuf;

use clap::Parser;

use bigtwo_bench::config::{BenchmarkConfig, ResolvedOutputs};
use bigtwo_bench::logging::init_logging;
use bigtwo_bench::tournament::TournamentRunner;

/// Round-robin harness for Big Two decision policies.
#[derive(Debug, Parser)]
#[command(
    name = "bigtwo-bench",
    author,
    version,
    about = "Deterministic Big Two tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of rounds to deal.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of seat permutations per deal.
    #[arg(long, value_name = "COUNT")]
    permutations: Option<usize>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(rounds) = cli.rounds {
        config.games.rounds = rounds;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if let Some(permutations) = cli.permutations {
        config.games.permutations = permutations;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.games.rounds;
    let permutations = config.games.permutations;
    let lineup = config
        .agents
        .iter()
        .map(|agent| format!("{}={}", agent.name, agent.policy))
        .collect::<Vec<_>>()
        .join(", ");

    println!(
        "Loaded configuration '{run_id}' ({rounds} rounds, {permutations} permutations): {lineup}"
    );

    let runner = TournamentRunner::new(config.clone(), outputs.clone())?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} rounds x {} permutations -> {} rows at {}",
        summary.rounds_played,
        summary.permutations,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for agent in &summary.analytics.agents {
        println!(
            "  {:<16} {:<11} wins {:>4}/{:<4} score {:+}",
            agent.name, agent.policy, agent.wins, agent.rounds, agent.total_score
        );
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
