//! Matching strategies over a [`Cohort`](crate::cohort::Cohort).
//!
//! - **Deferred acceptance**: proposers make offers in preference order,
//!   responders tentatively hold the best offer so far. Produces a stable,
//!   proposer-optimal matching.
//! - **Naive pairing**: positional baseline that ignores preferences,
//!   useful as a fairness and quality reference.
//!
//! Strategies are selected through the [`Strategy`] enum and run with
//! [`Cohort::run`](crate::cohort::Cohort::run). [`blocking_pairs`] and
//! [`is_stable`] check the result.

mod deferred;
mod naive;
mod stability;
mod types;

pub use stability::{blocking_pairs, is_stable, BlockingPair};
pub use types::{MatchingReport, ProposalOutcome, ProposalQueue, Strategy};
