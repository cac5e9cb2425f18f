//! Happiness and fairness of a matching.
//!
//! Happiness is the mean rating agents give their partners, normalized by
//! `n - 1` so that everyone getting their favourite scores `1.0` and
//! everyone getting their least favourite scores `0.0`.

use std::fmt;

use crate::cohort::{Agent, Cohort};
use crate::error::{MatchError, Result};

/// Normalized average partner rating of `agents`, members of `cohort`.
///
/// # Errors
///
/// The group must be non-empty and each side must have at least two
/// members. Every agent must be the agent `cohort` holds under its id
/// ([`MatchError::ForeignAgent`] otherwise) and be partnered with someone
/// it ranks.
pub fn average_happiness(cohort: &Cohort, agents: &[Agent]) -> Result<f64> {
    if agents.is_empty() {
        return Err(MatchError::EmptyGroup);
    }
    let size = cohort.size();
    if size < 2 {
        return Err(MatchError::DegenerateNormalization { size });
    }

    let mut total = 0usize;
    for agent in agents {
        if cohort.all_agents().get(agent.id().index()) != Some(agent) {
            return Err(MatchError::ForeignAgent {
                name: agent.name().to_string(),
            });
        }
        if !agent.has_partner() {
            return Err(MatchError::Unpartnered {
                name: agent.name().to_string(),
            });
        }
        total += cohort
            .rating_of_current_partner(agent.id())
            .ok_or_else(|| MatchError::UnrankedPartner {
                name: agent.name().to_string(),
            })?;
    }

    Ok(total as f64 / (agents.len() * (size - 1)) as f64)
}

/// Ratio of two happiness values. Near `1.0` means both sides fared alike;
/// above `1.0` means the first side did better.
///
/// A zero denominator yields infinity (or NaN for `0 / 0`).
pub fn fairness_ratio(a: f64, b: f64) -> f64 {
    a / b
}

/// Happiness of both sides of a matched cohort.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HappinessReport {
    pub proposers: f64,
    pub responders: f64,
    pub overall: f64,
    /// `proposers / responders`.
    pub fairness: f64,
}

impl HappinessReport {
    pub fn measure(cohort: &Cohort) -> Result<Self> {
        let proposers = average_happiness(cohort, cohort.proposers())?;
        let responders = average_happiness(cohort, cohort.responders())?;
        let overall = average_happiness(cohort, cohort.all_agents())?;
        Ok(Self {
            proposers,
            responders,
            overall,
            fairness: fairness_ratio(proposers, responders),
        })
    }
}

impl fmt::Display for HappinessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Proposer happiness = {}", self.proposers)?;
        writeln!(f, "Responder happiness = {}", self.responders)?;
        write!(f, "    Total happiness = {}", self.overall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Naive pairing a-x, b-y over rankings given for a, b, x, y.
    fn matched(prefs: [[&str; 2]; 4]) -> Cohort {
        let mut c = Cohort::with_preferences(
            &["a", "b"],
            &["x", "y"],
            ["a", "b", "x", "y"].into_iter().zip(prefs),
        )
        .unwrap();
        c.run_naive_pairing();
        c
    }

    const EXTREMES: [[&str; 2]; 4] = [["y", "x"], ["y", "x"], ["b", "a"], ["a", "b"]];

    #[test]
    fn test_happiness_extremes() {
        // a gets its favourite, b its last pick, x and y their favourites
        let c = matched(EXTREMES);
        assert!((average_happiness(&c, &c.proposers()[..1]).unwrap() - 1.0).abs() < 1e-12);
        assert!(average_happiness(&c, &c.proposers()[1..]).unwrap().abs() < 1e-12);
        assert!((average_happiness(&c, c.responders()).unwrap() - 1.0).abs() < 1e-12);
        assert!((average_happiness(&c, c.all_agents()).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_report() {
        let c = matched([["y", "x"], ["y", "x"], ["a", "b"], ["b", "a"]]);
        let report = HappinessReport::measure(&c).unwrap();
        assert!((report.proposers - 0.5).abs() < 1e-12);
        assert!(report.responders.abs() < 1e-12);
        assert!((report.overall - 0.25).abs() < 1e-12);
        assert!(report.fairness.is_infinite());
    }

    #[test]
    fn test_unpartnered_fails() {
        let mut c = matched(EXTREMES);
        let a = c.find_id("a").unwrap();
        c.break_partnership(a);
        assert_eq!(
            average_happiness(&c, c.proposers()),
            Err(MatchError::Unpartnered { name: "a".into() })
        );
    }

    #[test]
    fn test_unranked_partner_fails() {
        let mut c = matched(EXTREMES);
        c.set_preferences([("a", ["y"])]).unwrap();
        assert_eq!(
            average_happiness(&c, c.proposers()),
            Err(MatchError::UnrankedPartner { name: "a".into() })
        );
    }

    #[test]
    fn test_agents_from_another_cohort_fail() {
        let c = matched(EXTREMES);
        let mut other = c.clone();
        other.clear_all_partnerships();
        assert_eq!(
            average_happiness(&c, other.proposers()),
            Err(MatchError::ForeignAgent { name: "a".into() })
        );

        // ids past the end of a smaller cohort
        let mut big = Cohort::with_seed(&["p", "q", "r"], &["s", "t", "u"], 5).unwrap();
        big.run_deferred_acceptance();
        assert_eq!(
            average_happiness(&c, &big.responders()[2..]),
            Err(MatchError::ForeignAgent { name: "u".into() })
        );

        // an identical clone holds the same agents
        let same = c.clone();
        assert!((average_happiness(&c, same.all_agents()).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_display_lists_three_lines() {
        let c = matched(EXTREMES);
        let text = HappinessReport::measure(&c).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Proposer happiness = 0.5",
                "Responder happiness = 1",
                "    Total happiness = 0.75",
            ]
        );
    }

    #[test]
    fn test_empty_and_degenerate() {
        let c = matched(EXTREMES);
        assert_eq!(average_happiness(&c, &[]), Err(MatchError::EmptyGroup));

        let mut single = Cohort::with_seed(&["a"], &["x"], 1).unwrap();
        single.run_deferred_acceptance();
        assert_eq!(
            average_happiness(&single, single.all_agents()),
            Err(MatchError::DegenerateNormalization { size: 1 })
        );
    }

    #[test]
    fn test_fairness_ratio() {
        assert!((fairness_ratio(0.8, 0.4) - 2.0).abs() < 1e-12);
        assert!((fairness_ratio(0.5, 0.5) - 1.0).abs() < 1e-12);
    }
}
