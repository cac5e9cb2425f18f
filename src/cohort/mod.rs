//! Agents and the two-sided cohort that owns them.
//!
//! A [`Cohort`] holds two equal-size groups, proposers and responders.
//! Each [`Agent`] ranks every member of the opposite group and carries at
//! most one partner link. Links are always symmetric: they are only
//! written by [`Cohort::make_partnership`] and
//! [`Cohort::break_partnership`].
//!
//! Agents are stored in an arena and addressed by [`AgentId`]; the
//! cohort also keeps a name index for lookup by identity.

mod agent;
mod roster;

pub use agent::{Agent, AgentId, Side, UNRANKED};
pub use roster::Cohort;
