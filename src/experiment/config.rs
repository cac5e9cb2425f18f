//! Experiment configuration.

use crate::error::{MatchError, Result};
use crate::matching::Strategy;

/// Configuration for a randomized matching experiment.
///
/// # Examples
///
/// ```
/// use u_matching::experiment::ExperimentConfig;
/// use u_matching::matching::Strategy;
///
/// let config = ExperimentConfig::default()
///     .with_group_size(20)
///     .with_runs(100)
///     .with_strategy(Strategy::NaivePairing)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentConfig {
    /// Agents per side.
    pub group_size: usize,

    /// Number of independent trials.
    pub runs: usize,

    /// Strategy applied in every trial.
    pub strategy: Strategy,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,

    /// Whether to run trials in parallel using rayon.
    ///
    /// Only honoured when the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            group_size: 10,
            runs: 10,
            strategy: Strategy::default(),
            seed: None,
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    pub fn with_group_size(mut self, n: usize) -> Self {
        self.group_size = n;
        self
    }

    pub fn with_runs(mut self, n: usize) -> Self {
        self.runs = n;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.group_size < 2 {
            return Err(MatchError::InvalidConfig(format!(
                "group_size must be at least 2, got {}",
                self.group_size
            )));
        }
        if self.runs == 0 {
            return Err(MatchError::InvalidConfig("runs must be positive".into()));
        }
        Ok(())
    }
}
