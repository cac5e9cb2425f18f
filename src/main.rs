//! Command-line experiment driver.
//!
//! ```text
//! u-matching [GROUP_SIZE] [RUNS] [STRATEGY] [--seed N] [--no-sweep]
//! ```
//!
//! Runs one experiment and prints its report, then measures how the time
//! per deferred-acceptance run grows with the group size.

use std::process::ExitCode;

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use u_matching::experiment::{ExperimentConfig, ExperimentRunner};
use u_matching::matching::Strategy;
use u_matching::MatchError;

#[derive(Parser, Debug)]
#[command(name = "u-matching")]
#[command(about = "Stable two-sided matching experiments: deferred acceptance vs naive pairing")]
#[command(version)]
struct Args {
    /// Agents per side
    #[arg(value_name = "GROUP_SIZE", default_value_t = 100, value_parser = RangedU64ValueParser::<usize>::new().range(2..))]
    group_size: usize,

    /// Randomized trials to average over
    #[arg(value_name = "RUNS", default_value_t = 100, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Matching strategy ("deferred-acceptance"/"da" or "naive")
    #[arg(value_name = "STRATEGY", default_value = "deferred-acceptance")]
    strategy: Strategy,

    /// Seed for reproducible trials
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the run-speed sweep
    #[arg(long)]
    no_sweep: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), MatchError> {
    info!(group_size = args.group_size, runs = args.runs, strategy = %args.strategy, "running experiment");
    let mut config = ExperimentConfig::default()
        .with_group_size(args.group_size)
        .with_runs(args.runs)
        .with_strategy(args.strategy)
        .with_parallel(true);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    println!("{}", ExperimentRunner::run(&config)?);

    if args.no_sweep {
        return Ok(());
    }

    println!("\nTest run speed");
    for i in 1..=30 {
        let size = 10 * i;
        let config = ExperimentConfig::default()
            .with_group_size(size)
            .with_runs(10)
            .with_strategy(Strategy::DeferredAcceptance);
        let result = ExperimentRunner::run(&config)?;
        let per_agent = result.mean_time_ms / size as f64;
        let bar = "\u{2587}".repeat((result.mean_time_ms * 0.2).round() as usize);
        println!("{size:10}: {per_agent:.4} ms/agent {bar}");
    }

    Ok(())
}
