//! Error type shared by every module of the crate.

use thiserror::Error;

/// Errors raised by cohort construction, preference injection, metrics
/// and experiment configuration.
///
/// A proposal addressed to an identity that is not part of the cohort is
/// deliberately absent from this list: it is an ordinary rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("groups must have equal size: {proposers} proposers vs {responders} responders")]
    SizeMismatch { proposers: usize, responders: usize },

    #[error("no agent named {0:?} in this cohort")]
    UnknownAgent(String),

    #[error("invalid ranking for {agent:?}: {reason}")]
    InvalidRanking { agent: String, reason: String },

    #[error("happiness is undefined for an empty group")]
    EmptyGroup,

    #[error("agent {name:?} is not a member of this cohort")]
    ForeignAgent { name: String },

    #[error("agent {name:?} has no partner")]
    Unpartnered { name: String },

    #[error("agent {name:?} does not rank its partner")]
    UnrankedPartner { name: String },

    #[error("happiness needs at least 2 agents per side to normalize, got {size}")]
    DegenerateNormalization { size: usize },

    #[error("invalid experiment configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown matching strategy {0:?} (expected \"deferred-acceptance\" or \"naive\")")]
    UnknownStrategy(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MatchError>;
