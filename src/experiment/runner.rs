//! Trial loop and result aggregation.

use std::fmt;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::config::ExperimentConfig;
use crate::cohort::Cohort;
use crate::error::Result;
use crate::matching::Strategy;
use crate::metrics::HappinessReport;

/// Measurements of one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialOutcome {
    /// Seed the trial's preferences were shuffled with.
    pub seed: u64,

    pub happiness: HappinessReport,

    /// Wall-clock time of shuffling plus matching, in milliseconds.
    pub elapsed_ms: f64,
}

/// Aggregate of an experiment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentResult {
    pub strategy: Strategy,
    pub group_size: usize,
    pub runs: usize,

    /// Mean proposer happiness over all trials.
    pub proposer_happiness: f64,

    /// Mean responder happiness over all trials.
    pub responder_happiness: f64,

    /// Mean happiness of all agents over all trials.
    pub overall_happiness: f64,

    /// Total proposer happiness divided by total responder happiness.
    pub unfairness: f64,

    /// Mean time per trial in milliseconds.
    pub mean_time_ms: f64,

    pub trials: Vec<TrialOutcome>,
}

/// Runs randomized matching experiments.
///
/// Each trial clones a template cohort named `A0..` / `B0..`, reshuffles
/// every ranking with its own seed and applies the configured strategy.
/// Trial seeds are drawn up front from the master seed, so results do
/// not depend on whether trials run sequentially or in parallel.
///
/// # Usage
///
/// ```
/// use u_matching::experiment::{ExperimentConfig, ExperimentRunner};
///
/// let config = ExperimentConfig::default().with_group_size(8).with_runs(5).with_seed(1);
/// let result = ExperimentRunner::run(&config).unwrap();
/// assert_eq!(result.trials.len(), 5);
/// assert!(result.proposer_happiness > result.responder_happiness);
/// ```
pub struct ExperimentRunner;

impl ExperimentRunner {
    pub fn run(config: &ExperimentConfig) -> Result<ExperimentResult> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let (proposers, responders) = agent_names(config.group_size);
        let template = Cohort::new(&proposers, &responders, &mut rng)?;
        let seeds: Vec<u64> = (0..config.runs).map(|_| rng.random()).collect();

        debug!(
            strategy = %config.strategy,
            group_size = config.group_size,
            runs = config.runs,
            "starting experiment"
        );

        let trials = run_trials(&template, config.strategy, &seeds, config.parallel)?;
        Ok(aggregate(config, trials))
    }
}

fn agent_names(n: usize) -> (Vec<String>, Vec<String>) {
    let a = (0..n).map(|i| format!("A{i}")).collect();
    let b = (0..n).map(|i| format!("B{i}")).collect();
    (a, b)
}

fn run_trial(template: &Cohort, strategy: Strategy, seed: u64) -> Result<TrialOutcome> {
    let mut cohort = template.clone();
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Instant::now();
    cohort.randomize_preferences(&mut rng);
    let report = cohort.run(strategy);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

    let happiness = HappinessReport::measure(&cohort)?;
    trace!(seed, proposals = report.proposals, overall = happiness.overall, "trial finished");

    Ok(TrialOutcome {
        seed,
        happiness,
        elapsed_ms,
    })
}

#[cfg(feature = "parallel")]
fn run_trials(
    template: &Cohort,
    strategy: Strategy,
    seeds: &[u64],
    parallel: bool,
) -> Result<Vec<TrialOutcome>> {
    use rayon::prelude::*;

    if parallel {
        seeds
            .par_iter()
            .map(|&seed| run_trial(template, strategy, seed))
            .collect()
    } else {
        seeds
            .iter()
            .map(|&seed| run_trial(template, strategy, seed))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_trials(
    template: &Cohort,
    strategy: Strategy,
    seeds: &[u64],
    _parallel: bool,
) -> Result<Vec<TrialOutcome>> {
    seeds
        .iter()
        .map(|&seed| run_trial(template, strategy, seed))
        .collect()
}

fn aggregate(config: &ExperimentConfig, trials: Vec<TrialOutcome>) -> ExperimentResult {
    let runs = trials.len() as f64;
    let total_a: f64 = trials.iter().map(|t| t.happiness.proposers).sum();
    let total_b: f64 = trials.iter().map(|t| t.happiness.responders).sum();
    let total: f64 = trials.iter().map(|t| t.happiness.overall).sum();
    let total_ms: f64 = trials.iter().map(|t| t.elapsed_ms).sum();

    ExperimentResult {
        strategy: config.strategy,
        group_size: config.group_size,
        runs: trials.len(),
        proposer_happiness: total_a / runs,
        responder_happiness: total_b / runs,
        overall_happiness: total / runs,
        unfairness: crate::metrics::fairness_ratio(total_a, total_b),
        mean_time_ms: total_ms / runs,
        trials,
    }
}

impl fmt::Display for ExperimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Experiment with {} agents per side for {} runs ({})",
            self.group_size, self.runs, self.strategy
        )?;
        writeln!(f, "\tProposer happiness:  {:.2}", self.proposer_happiness)?;
        writeln!(f, "\tResponder happiness: {:.2}", self.responder_happiness)?;
        writeln!(f, "\tAverage happiness:   {:.2}", self.overall_happiness)?;
        writeln!(f, "\tUnfairness:          {:.2} (1 is perfectly fair)", self.unfairness)?;
        write!(f, "\tTime per run: {:.4} milliseconds", self.mean_time_ms)
    }
}
