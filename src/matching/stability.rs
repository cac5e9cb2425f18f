//! Blocking-pair detection.

use crate::cohort::{AgentId, Cohort};

/// A proposer and a responder, not paired together, who both rate each
/// other above their current partners (being unpartnered counts as the
/// lowest possible rating).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockingPair {
    pub proposer: AgentId,
    pub responder: AgentId,
}

/// Lists every blocking pair of the cohort's current matching.
///
/// An agent never "prefers" an identity it does not rank.
pub fn blocking_pairs(cohort: &Cohort) -> Vec<BlockingPair> {
    let mut pairs = Vec::new();
    for p in cohort.proposers() {
        let p_current = cohort.rating_of_current_partner(p.id());
        for r in cohort.responders() {
            if p.partner() == Some(r.id()) {
                continue;
            }
            let p_wants = p.rating_of(r.name());
            if p_wants.is_none() || p_wants <= p_current {
                continue;
            }
            let r_wants = r.rating_of(p.name());
            if r_wants.is_some() && r_wants > cohort.rating_of_current_partner(r.id()) {
                pairs.push(BlockingPair {
                    proposer: p.id(),
                    responder: r.id(),
                });
            }
        }
    }
    pairs
}

/// Whether every agent is partnered and no blocking pair exists.
pub fn is_stable(cohort: &Cohort) -> bool {
    cohort.all_agents().iter().all(|a| a.has_partner()) && blocking_pairs(cohort).is_empty()
}
