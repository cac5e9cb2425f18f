//! Deferred acceptance (Gale-Shapley).
//!
//! # Algorithm
//!
//! 1. Clear every partnership.
//! 2. Give each proposer a fresh [`ProposalQueue`] copied from its ranking.
//! 3. Snapshot the unmatched proposers that still have someone to try;
//!    each makes exactly one proposal. Repeat until the snapshot is empty.
//!
//! A responder always keeps the best proposal seen so far, so a proposer
//! is rejected by (or displaced from) a responder at most once. Each
//! queue strictly shrinks, which bounds the run at `n²` proposals.
//!
//! With complete rankings the result is a complete, stable matching that
//! is optimal for every proposer among all stable matchings.
//!
//! # Reference
//!
//! Gale, D. & Shapley, L. S. (1962). "College Admissions and the
//! Stability of Marriage", *The American Mathematical Monthly* 69(1), 9-15.

use tracing::{debug, trace, warn};

use super::types::{MatchingReport, ProposalOutcome, ProposalQueue, Strategy};
use crate::cohort::{AgentId, Cohort};

impl Cohort {
    /// Makes `proposer` propose to the most-preferred identity left in
    /// `queue`.
    ///
    /// The responder accepts when it is unpartnered, or when it rates the
    /// proposer strictly higher than its current partner (an unranked
    /// identity rates below every ranked one). Otherwise, including when no
    /// agent carries the popped name or the name resolves to an agent on the
    /// proposer's own side, the proposal is rejected and only the queue
    /// changes.
    pub fn propose_to_top_choice(
        &mut self,
        proposer: AgentId,
        queue: &mut ProposalQueue,
    ) -> ProposalOutcome {
        let Some(target_name) = queue.pop_top() else {
            return ProposalOutcome::Exhausted;
        };
        let Some(target) = self.find_id(&target_name) else {
            return ProposalOutcome::Rejected {
                target: target_name,
            };
        };
        // Names shared across sides resolve to the first agent built.
        if self.agent(target).side() == self.agent(proposer).side() {
            return ProposalOutcome::Rejected {
                target: target_name,
            };
        }

        let responder = self.agent(target);
        let displaced = responder.partner();
        let accept = match displaced {
            None => true,
            Some(_) => {
                let offered = responder.rating_of(self.agent(proposer).name());
                offered > self.rating_of_current_partner(target)
            }
        };

        if accept {
            self.make_partnership(proposer, target);
            ProposalOutcome::Accepted {
                responder: target,
                displaced,
            }
        } else {
            ProposalOutcome::Rejected {
                target: target_name,
            }
        }
    }

    /// Runs deferred acceptance with the proposers making offers.
    pub fn run_deferred_acceptance(&mut self) -> MatchingReport {
        self.clear_all_partnerships();

        let mut queues: Vec<ProposalQueue> = self
            .proposers()
            .iter()
            .map(|p| ProposalQueue::from_ranking(p.ranking()))
            .collect();

        let mut rounds = 0usize;
        let mut proposals = 0usize;
        let mut accepted = 0usize;

        loop {
            // Proposer ids are 0..n, so they index `queues` directly.
            let pending: Vec<AgentId> = self
                .unmatched_proposers()
                .into_iter()
                .filter(|id| !queues[id.index()].is_empty())
                .collect();
            if pending.is_empty() {
                break;
            }

            rounds += 1;
            for id in pending {
                let outcome = self.propose_to_top_choice(id, &mut queues[id.index()]);
                proposals += 1;
                if outcome.is_accepted() {
                    accepted += 1;
                }
                trace!(round = rounds, proposer = %self.agent(id).name(), ?outcome, "proposal");
            }
        }

        let unmatched = self.unmatched_proposers().len();
        if unmatched > 0 {
            warn!(
                unmatched,
                "deferred acceptance ended with unmatched proposers; rankings are incomplete"
            );
        }
        debug!(size = self.size(), rounds, proposals, accepted, "deferred acceptance finished");

        MatchingReport {
            strategy: Strategy::DeferredAcceptance,
            rounds,
            proposals,
            unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::Agent;

    fn three_by_three() -> Cohort {
        Cohort::with_preferences(
            &["Rob", "Joe", "Jacob"],
            &["Amy", "Jessica", "Emily"],
            [
                ("Jacob", ["Amy", "Jessica", "Emily"]),
                ("Amy", ["Rob", "Joe", "Jacob"]),
                ("Emily", ["Rob", "Jacob", "Joe"]),
                ("Joe", ["Jessica", "Amy", "Emily"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_propose_to_free_responder() {
        let mut c = three_by_three();
        let jacob = c.find_id("Jacob").unwrap();
        let emily = c.find_id("Emily").unwrap();
        let mut queue = ProposalQueue::from_ranking(c.agent(jacob).ranking());

        let outcome = c.propose_to_top_choice(jacob, &mut queue);

        assert_eq!(
            outcome,
            ProposalOutcome::Accepted {
                responder: emily,
                displaced: None
            }
        );
        assert_eq!(queue.len(), 2);
        assert!(!queue.remaining().iter().any(|n| n == "Emily"));
        assert_eq!(c.agent(jacob).partner(), Some(emily));
        assert_eq!(c.agent(emily).partner(), Some(jacob));
        // the stored ranking is not consumed
        assert_eq!(c.agent(jacob).ranking().len(), 3);
    }

    #[test]
    fn test_propose_rejected_when_target_prefers_current() {
        let mut c = three_by_three();
        let jacob = c.find_id("Jacob").unwrap();
        let emily = c.find_id("Emily").unwrap();
        let amy = c.find_id("Amy").unwrap();
        c.make_partnership(jacob, emily);

        // Amy's favourite is Jacob, who rates Emily above her.
        let mut queue = ProposalQueue::from_ranking(c.agent(amy).ranking());
        let outcome = c.propose_to_top_choice(amy, &mut queue);

        assert_eq!(
            outcome,
            ProposalOutcome::Rejected {
                target: "Jacob".into()
            }
        );
        assert!(!c.agent(amy).has_partner());
        assert_eq!(c.agent(jacob).partner(), Some(emily));
    }

    #[test]
    fn test_propose_displaces_less_preferred_partner() {
        let mut c = three_by_three();
        let jacob = c.find_id("Jacob").unwrap();
        let emily = c.find_id("Emily").unwrap();
        let joe = c.find_id("Joe").unwrap();
        c.make_partnership(jacob, emily);

        // Emily rates Jacob 1 and Joe 2.
        let mut queue = ProposalQueue::from_ranking(c.agent(joe).ranking());
        let outcome = c.propose_to_top_choice(joe, &mut queue);

        assert_eq!(
            outcome,
            ProposalOutcome::Accepted {
                responder: emily,
                displaced: Some(jacob)
            }
        );
        assert_eq!(c.partner_of(emily).map(Agent::name), Some("Joe"));
        assert!(!c.agent(jacob).has_partner());
        assert!(c.is_symmetric());
    }

    #[test]
    fn test_propose_to_unknown_identity_is_rejection() {
        let mut c = three_by_three();
        let rob = c.find_id("Rob").unwrap();
        let mut queue: ProposalQueue = ["Emily", "Nobody"].into_iter().collect();

        let outcome = c.propose_to_top_choice(rob, &mut queue);
        assert_eq!(
            outcome,
            ProposalOutcome::Rejected {
                target: "Nobody".into()
            }
        );
        assert!(!c.agent(rob).has_partner());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_propose_to_own_side_is_rejection() {
        let mut c = three_by_three();
        let rob = c.find_id("Rob").unwrap();
        let joe = c.find_id("Joe").unwrap();
        let mut queue: ProposalQueue = ["Joe"].into_iter().collect();

        let outcome = c.propose_to_top_choice(rob, &mut queue);

        assert_eq!(outcome, ProposalOutcome::Rejected { target: "Joe".into() });
        assert!(!outcome.is_accepted());
        assert!(!c.agent(rob).has_partner());
        assert!(!c.agent(joe).has_partner());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_propose_to_self_is_rejection() {
        let mut c = three_by_three();
        let rob = c.find_id("Rob").unwrap();
        let mut queue: ProposalQueue = ["Rob"].into_iter().collect();

        let outcome = c.propose_to_top_choice(rob, &mut queue);

        assert_eq!(outcome, ProposalOutcome::Rejected { target: "Rob".into() });
        assert_eq!(c.agent(rob).partner(), None);
    }

    #[test]
    fn test_name_shared_across_sides_never_pairs_a_side_with_itself() {
        // "a" resolves to the proposer, so responder "a" is unreachable.
        let mut c = Cohort::with_seed(&["a", "b"], &["a", "c"], 3).unwrap();
        let report = c.run_deferred_acceptance();

        assert_eq!(report.unmatched, 1);
        assert!(c.is_symmetric());
        for agent in c.all_agents() {
            if let Some(partner) = c.partner_of(agent.id()) {
                assert_ne!(partner.side(), agent.side());
            }
        }
        let c_id = c.responders()[1].id();
        assert!(c.agent(c_id).has_partner());
    }

    #[test]
    fn test_propose_with_empty_queue() {
        let mut c = three_by_three();
        let rob = c.find_id("Rob").unwrap();
        let mut queue = ProposalQueue::default();
        assert_eq!(c.propose_to_top_choice(rob, &mut queue), ProposalOutcome::Exhausted);
        assert!(!c.agent(rob).has_partner());
    }

    #[test]
    fn test_deferred_acceptance_completes() {
        let mut c = Cohort::with_seed(&["a", "b", "c", "d"], &["w", "x", "y", "z"], 11).unwrap();
        let report = c.run_deferred_acceptance();

        assert!(report.is_complete());
        assert_eq!(report.strategy, Strategy::DeferredAcceptance);
        assert!(report.proposals >= 4);
        assert!(report.proposals <= 16);
        assert!(c.all_agents().iter().all(Agent::has_partner));
        assert!(c.is_symmetric());
    }

    #[test]
    fn test_deferred_acceptance_clears_previous_links() {
        let mut c = three_by_three();
        c.set_preferences([
            ("Rob", ["Amy", "Jessica", "Emily"]),
            ("Jessica", ["Rob", "Joe", "Jacob"]),
        ])
        .unwrap();
        let first = c.run_deferred_acceptance();
        let partners: Vec<_> = c.all_agents().iter().map(Agent::partner).collect();

        let second = c.run_deferred_acceptance();
        let again: Vec<_> = c.all_agents().iter().map(Agent::partner).collect();

        assert_eq!(first, second);
        assert_eq!(partners, again);
    }

    #[test]
    fn test_deferred_acceptance_leaves_rankings_intact() {
        let mut c = Cohort::with_seed(&["a", "b", "c"], &["x", "y", "z"], 3).unwrap();
        let before: Vec<Vec<String>> = c.all_agents().iter().map(|a| a.ranking().to_vec()).collect();
        c.run_deferred_acceptance();
        let after: Vec<Vec<String>> = c.all_agents().iter().map(|a| a.ranking().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_incomplete_rankings_terminate() {
        // Both proposers only want "x"; one must end up alone.
        let mut c = Cohort::with_preferences(
            &["a", "b"],
            &["x", "y"],
            [("a", vec!["x"]), ("b", vec!["x"]), ("x", vec!["a", "b"])],
        )
        .unwrap();
        let report = c.run_deferred_acceptance();

        assert_eq!(report.unmatched, 1);
        assert!(!report.is_complete());
        assert_eq!(c.partner_of(c.find_id("x").unwrap()).map(Agent::name), Some("b"));
        assert_eq!(report.proposals, 2);
    }
}
