//! Agent identity, side and preference ranking.

use std::fmt;

/// Integer form of "unranked", used where ratings are printed or summed
/// as plain integers.
pub const UNRANKED: i64 = -1;

/// Dense index of an agent inside its [`Cohort`](super::Cohort).
///
/// Proposers occupy `0..n`, responders `n..2n`, both in construction
/// order. An `AgentId` is only meaningful for the cohort that issued it.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(usize);

impl AgentId {
    #[inline]
    pub(crate) const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

/// Which side of the market an agent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Makes offers during deferred acceptance.
    Proposer,
    /// Holds the best offer seen so far and rejects the rest.
    Responder,
}

impl Side {
    /// The side this side is matched against.
    pub fn other(self) -> Side {
        match self {
            Side::Proposer => Side::Responder,
            Side::Responder => Side::Proposer,
        }
    }
}

/// One participant of a two-sided matching.
///
/// The ranking is stored **least-preferred first**: the rating of an
/// identity is its position in the ranking, so a higher rating means a
/// more preferred partner.
///
/// The partner link is owned by the cohort's pairing primitives
/// ([`Cohort::make_partnership`](super::Cohort::make_partnership) and
/// [`Cohort::break_partnership`](super::Cohort::break_partnership)); it is
/// read-only from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub(super) id: AgentId,
    pub(super) side: Side,
    pub(super) name: String,
    pub(super) ranking: Vec<String>,
    pub(super) partner: Option<AgentId>,
}

impl Agent {
    pub(super) fn new(id: AgentId, side: Side, name: String, ranking: Vec<String>) -> Self {
        Self {
            id,
            side,
            name,
            ranking,
            partner: None,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Preference ranking, least-preferred first.
    pub fn ranking(&self) -> &[String] {
        &self.ranking
    }

    /// Rating of `identity`: its index in the ranking, or `None` if this
    /// agent does not rank it.
    pub fn rating_of(&self, identity: &str) -> Option<usize> {
        self.ranking.iter().position(|name| name == identity)
    }

    /// Same as [`rating_of`](Self::rating_of), with [`UNRANKED`] (`-1`)
    /// standing in for an absent identity.
    pub fn rating_or_sentinel(&self, identity: &str) -> i64 {
        self.rating_of(identity).map_or(UNRANKED, |r| r as i64)
    }

    pub fn partner(&self) -> Option<AgentId> {
        self.partner
    }

    pub fn has_partner(&self) -> bool {
        self.partner.is_some()
    }
}
