//! The cohort: agent arena, name index, preferences and pairing primitives.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::agent::{Agent, AgentId, Side, UNRANKED};
use crate::metrics::HappinessReport;
use crate::error::{MatchError, Result};

/// Two equal-size groups of agents, proposers and responders.
///
/// Agents live in one contiguous arena: proposers first, then
/// responders, each in construction order. That order is the canonical
/// order used by [`unmatched_proposers`](Cohort::unmatched_proposers) and
/// naive pairing.
///
/// # Examples
///
/// ```
/// use u_matching::cohort::Cohort;
///
/// let mut cohort = Cohort::with_seed(&["Ana", "Avery"], &["Bailey", "Brian"], 7).unwrap();
/// cohort.run_deferred_acceptance();
/// assert!(cohort.all_agents().iter().all(|a| a.has_partner()));
/// ```
#[derive(Debug, Clone)]
pub struct Cohort {
    agents: Vec<Agent>,
    size: usize,
    index: HashMap<String, AgentId>,
}

impl Cohort {
    /// Builds one agent per identity on each side. Every agent starts with
    /// a random permutation of the opposite side, drawn from `rng`.
    ///
    /// Fails with [`MatchError::SizeMismatch`] when the lists differ in
    /// length.
    pub fn new<S, R>(proposers: &[S], responders: &[S], rng: &mut R) -> Result<Self>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut cohort = Self::unshuffled(proposers, responders)?;
        cohort.randomize_preferences(rng);
        Ok(cohort)
    }

    /// [`Cohort::new`] with a seeded random source.
    pub fn with_seed<S: AsRef<str>>(proposers: &[S], responders: &[S], seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(proposers, responders, &mut rng)
    }

    /// Builds a cohort without randomness and installs an explicit ranking
    /// table (see [`set_preferences`](Cohort::set_preferences)).
    ///
    /// Agents missing from `preferences` rank the opposite side in its
    /// construction order.
    pub fn with_preferences<S, I, K, P, V>(
        proposers: &[S],
        responders: &[S],
        preferences: I,
    ) -> Result<Self>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mut cohort = Self::unshuffled(proposers, responders)?;
        cohort.set_preferences(preferences)?;
        Ok(cohort)
    }

    fn unshuffled<S: AsRef<str>>(proposers: &[S], responders: &[S]) -> Result<Self> {
        if proposers.len() != responders.len() {
            return Err(MatchError::SizeMismatch {
                proposers: proposers.len(),
                responders: responders.len(),
            });
        }

        let proposer_names: Vec<String> = proposers.iter().map(|s| s.as_ref().to_string()).collect();
        let responder_names: Vec<String> =
            responders.iter().map(|s| s.as_ref().to_string()).collect();

        let size = proposer_names.len();
        let mut agents = Vec::with_capacity(2 * size);
        for name in &proposer_names {
            let id = AgentId::new(agents.len());
            agents.push(Agent::new(id, Side::Proposer, name.clone(), responder_names.clone()));
        }
        for name in &responder_names {
            let id = AgentId::new(agents.len());
            agents.push(Agent::new(id, Side::Responder, name.clone(), proposer_names.clone()));
        }

        // First occurrence wins for duplicated names.
        let mut index = HashMap::with_capacity(agents.len());
        for agent in &agents {
            index.entry(agent.name.clone()).or_insert(agent.id);
        }

        Ok(Self { agents, size, index })
    }

    /// Number of agents per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the agent behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this cohort.
    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn proposers(&self) -> &[Agent] {
        &self.agents[..self.size]
    }

    pub fn responders(&self) -> &[Agent] {
        &self.agents[self.size..]
    }

    pub fn all_agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agents of one side, in canonical order.
    pub fn side(&self, side: Side) -> &[Agent] {
        match side {
            Side::Proposer => self.proposers(),
            Side::Responder => self.responders(),
        }
    }

    /// Looks an agent up by name across both sides.
    pub fn find(&self, identity: &str) -> Option<&Agent> {
        self.find_id(identity).map(|id| self.agent(id))
    }

    pub fn find_id(&self, identity: &str) -> Option<AgentId> {
        self.index.get(identity).copied()
    }

    /// The agent currently paired with `id`, if any.
    pub fn partner_of(&self, id: AgentId) -> Option<&Agent> {
        self.agent(id).partner.map(|p| self.agent(p))
    }

    /// Rating `id` gives its current partner; `None` when unpartnered or
    /// when the partner is not in its ranking.
    pub fn rating_of_current_partner(&self, id: AgentId) -> Option<usize> {
        let agent = self.agent(id);
        let partner = self.partner_of(id)?;
        agent.rating_of(&partner.name)
    }

    /// `"Name (Partner)"`, or `"Name (no-one)"` when unpartnered.
    pub fn describe(&self, id: AgentId) -> String {
        let agent = self.agent(id);
        match self.partner_of(id) {
            Some(partner) => format!("{} ({})", agent.name, partner.name),
            None => format!("{} (no-one)", agent.name),
        }
    }

    /// Replaces the rankings of the named agents.
    ///
    /// Every entry is validated before anything is written, so on error
    /// the cohort is unchanged. A ranking may not repeat an identity nor
    /// name an agent of the ranker's own side; identities unknown to the
    /// cohort are accepted and simply never answer a proposal.
    pub fn set_preferences<I, K, P, V>(&mut self, preferences: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mut staged = Vec::new();
        for (name, ranking) in preferences {
            let name = name.as_ref();
            let id = self
                .find_id(name)
                .ok_or_else(|| MatchError::UnknownAgent(name.to_string()))?;
            let ranking: Vec<String> = ranking.into_iter().map(|v| v.as_ref().to_string()).collect();
            self.check_ranking(id, &ranking)?;
            staged.push((id, ranking));
        }

        for (id, ranking) in staged {
            self.agents[id.index()].ranking = ranking;
        }
        Ok(())
    }

    fn check_ranking(&self, id: AgentId, ranking: &[String]) -> Result<()> {
        let owner = self.agent(id);
        let invalid = |reason: String| MatchError::InvalidRanking {
            agent: owner.name.clone(),
            reason,
        };

        let mut seen = HashSet::with_capacity(ranking.len());
        for identity in ranking {
            if !seen.insert(identity.as_str()) {
                return Err(invalid(format!("{identity:?} appears more than once")));
            }
            if let Some(other) = self.find(identity) {
                if other.side == owner.side {
                    return Err(invalid(format!("{identity:?} is on the same side")));
                }
            }
        }
        Ok(())
    }

    /// Reshuffles every agent's ranking in place.
    pub fn randomize_preferences<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for agent in &mut self.agents {
            agent.ranking.shuffle(rng);
        }
    }

    /// Dissolves the partnership of `id`, clearing both links. No-op when
    /// `id` is unpartnered.
    pub fn break_partnership(&mut self, id: AgentId) {
        if let Some(former) = self.agents[id.index()].partner.take() {
            self.agents[former.index()].partner = None;
        }
    }

    /// Pairs `a` with `b`, first dissolving any partnership either holds.
    pub fn make_partnership(&mut self, a: AgentId, b: AgentId) {
        debug_assert_ne!(a, b, "an agent cannot partner with itself");
        self.break_partnership(a);
        self.break_partnership(b);
        self.agents[a.index()].partner = Some(b);
        self.agents[b.index()].partner = Some(a);
    }

    pub fn clear_all_partnerships(&mut self) {
        for i in 0..self.agents.len() {
            self.break_partnership(AgentId::new(i));
        }
    }

    /// Proposers without a partner, in canonical order.
    pub fn unmatched_proposers(&self) -> Vec<AgentId> {
        self.proposers()
            .iter()
            .filter(|a| !a.has_partner())
            .map(Agent::id)
            .collect()
    }

    /// Whether every partner link is mirrored by its partner.
    pub fn is_symmetric(&self) -> bool {
        self.agents.iter().all(|a| match a.partner {
            Some(p) => self.agent(p).partner == Some(a.id),
            None => true,
        })
    }
}

impl fmt::Display for Cohort {
    /// One line per matched pair with each side's rating of the other,
    /// followed by the unpartnered agents.
    ///
    /// The alternate form (`{:#}`) lists every agent instead, as
    /// `Name (Partner): rating [ranking]` with the rating it gives its
    /// partner (`-1` when unpartnered) and its ranking least-preferred
    /// first, then the happiness report when the matching supports one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return self.fmt_agents(f);
        }

        for a in self.proposers() {
            let Some(b) = self.partner_of(a.id) else {
                continue;
            };
            let a_rating = a.rating_or_sentinel(&b.name);
            let b_rating = b.rating_or_sentinel(&a.name);
            writeln!(f, "{:10}({}) {:10}({})", a.name, a_rating, b.name, b_rating)?;
        }

        let unpartnered: Vec<String> = self
            .agents
            .iter()
            .filter(|a| !a.has_partner())
            .map(|a| self.describe(a.id))
            .collect();
        write!(f, "Unpartnered: {}", unpartnered.join(", "))
    }
}

impl Cohort {
    fn fmt_agents(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, a) in self.agents.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let rating = self
                .partner_of(a.id)
                .map_or(UNRANKED, |p| a.rating_or_sentinel(&p.name));
            write!(f, "{}: {} [{}]", self.describe(a.id), rating, a.ranking.join(","))?;
        }
        if let Ok(report) = HappinessReport::measure(self) {
            write!(f, "\n{report}")?;
        }
        Ok(())
    }
}
