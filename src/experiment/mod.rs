//! Randomized matching experiments.
//!
//! Repeatedly reshuffles every agent's preferences, applies one
//! [`Strategy`](crate::matching::Strategy), and aggregates happiness,
//! fairness and timing. Used to compare deferred acceptance against the
//! naive baseline: the baseline is fair but only about half as satisfying,
//! while deferred acceptance is more satisfying overall and systematically
//! favours the proposing side.

mod config;
mod runner;

pub use config::ExperimentConfig;
pub use runner::{ExperimentResult, ExperimentRunner, TrialOutcome};
