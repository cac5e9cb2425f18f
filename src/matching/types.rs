//! Strategy selector, proposal queue and run reports.

use std::fmt;
use std::str::FromStr;

use crate::cohort::AgentId;
use crate::error::MatchError;

/// Which matching algorithm to run on a cohort.
///
/// # Examples
///
/// ```
/// use u_matching::matching::Strategy;
///
/// let s: Strategy = "naive".parse().unwrap();
/// assert_eq!(s, Strategy::NaivePairing);
/// assert_eq!(Strategy::default().to_string(), "deferred-acceptance");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Gale-Shapley deferred acceptance, proposer-optimal and stable.
    #[default]
    DeferredAcceptance,

    /// Proposer `i` with responder `i`, preferences ignored.
    NaivePairing,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::DeferredAcceptance, Strategy::NaivePairing];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::DeferredAcceptance => "deferred-acceptance",
            Strategy::NaivePairing => "naive",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred-acceptance" | "gale-shapley" | "da" => Ok(Strategy::DeferredAcceptance),
            "naive" | "naive-pairing" => Ok(Strategy::NaivePairing),
            _ => Err(MatchError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Responders a proposer has not tried yet.
///
/// Built as an owned copy of a ranking (least-preferred first) and
/// consumed from the most-preferred end. Popping never touches the
/// ranking it was copied from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalQueue {
    remaining: Vec<String>,
}

impl ProposalQueue {
    pub fn from_ranking(ranking: &[String]) -> Self {
        Self {
            remaining: ranking.to_vec(),
        }
    }

    /// Removes and returns the most-preferred identity left.
    pub fn pop_top(&mut self) -> Option<String> {
        self.remaining.pop()
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Identities not yet proposed to, least-preferred first.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }
}

impl<S: Into<String>> FromIterator<S> for ProposalQueue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            remaining: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// What happened to a single proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// The responder accepted; `displaced` is the proposer it dropped.
    Accepted {
        responder: AgentId,
        displaced: Option<AgentId>,
    },

    /// The responder kept its partner, or `target` names no agent on the
    /// other side.
    Rejected { target: String },

    /// The queue was already empty; nothing happened.
    Exhausted,
}

impl ProposalOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ProposalOutcome::Accepted { .. })
    }
}

/// Summary of one strategy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchingReport {
    pub strategy: Strategy,

    /// Proposal passes over the unmatched proposers (0 for naive pairing).
    pub rounds: usize,

    /// Proposals made (0 for naive pairing).
    pub proposals: usize,

    /// Proposers left without a partner.
    pub unmatched: usize,
}

impl MatchingReport {
    pub fn is_complete(&self) -> bool {
        self.unmatched == 0
    }
}
