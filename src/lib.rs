//! Stable two-sided matching.
//!
//! Matches two equal-size groups of agents, each ranking every member of
//! the other group, and measures how good the matching is:
//!
//! - **Cohort**: the agents of both sides, their preference rankings and
//!   symmetric partner links.
//! - **Deferred acceptance (Gale-Shapley)**: proposers make offers in
//!   preference order and responders hold the best offer so far. Always
//!   terminates within `n²` proposals with a stable matching that is
//!   optimal for every proposer.
//! - **Naive pairing**: positional baseline ignoring preferences.
//! - **Metrics**: normalized happiness per side and the fairness ratio
//!   between sides.
//! - **Experiments**: repeated randomized trials aggregating happiness,
//!   fairness and timing.
//!
//! # Example
//!
//! ```
//! use u_matching::cohort::Cohort;
//! use u_matching::matching::{is_stable, Strategy};
//! use u_matching::metrics::HappinessReport;
//!
//! let mut cohort = Cohort::with_seed(&["A0", "A1", "A2"], &["B0", "B1", "B2"], 42).unwrap();
//! cohort.run(Strategy::DeferredAcceptance);
//! assert!(is_stable(&cohort));
//!
//! let happiness = HappinessReport::measure(&cohort).unwrap();
//! assert!((0.0..=1.0).contains(&happiness.overall));
//! ```

pub mod cohort;
pub mod error;
pub mod experiment;
pub mod matching;
pub mod metrics;

pub use error::{MatchError, Result};
