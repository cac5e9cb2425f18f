//! Positional pairing baseline.

use super::types::{MatchingReport, Strategy};
use crate::cohort::{AgentId, Cohort};

impl Cohort {
    /// Pairs the i-th proposer with the i-th responder in construction
    /// order. Preferences are not consulted.
    pub fn run_naive_pairing(&mut self) -> MatchingReport {
        self.clear_all_partnerships();

        let n = self.size();
        for i in 0..n {
            self.make_partnership(AgentId::new(i), AgentId::new(n + i));
        }

        MatchingReport {
            strategy: Strategy::NaivePairing,
            rounds: 0,
            proposals: 0,
            unmatched: 0,
        }
    }

    /// Runs the selected strategy.
    pub fn run(&mut self, strategy: Strategy) -> MatchingReport {
        match strategy {
            Strategy::DeferredAcceptance => self.run_deferred_acceptance(),
            Strategy::NaivePairing => self.run_naive_pairing(),
        }
    }
}
