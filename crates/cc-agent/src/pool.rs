//! A pool of interchangeable agents.

use cc_core::{AgentId, PoolId};

use crate::{Agent, AgentError, AgentResult, IdleRank};

/// One agent group: a capacity-sized set of [`Agent`]s plus a busy counter.
///
/// The busy counter is maintained explicitly by the dispatcher through
/// [`add_busy`](Self::add_busy) / [`sub_busy`](Self::sub_busy) rather than
/// recomputed, matching the completion handler's decrement-then-maybe-
/// reassign sequence; both directions are range-checked so a routing bug
/// surfaces as an error instead of a silently wrong occupancy series.
#[derive(Debug, Clone)]
pub struct AgentPool {
    id:     PoolId,
    agents: Vec<Agent>,
    busy:   u32,
}

impl AgentPool {
    /// Create a pool of `capacity` idle agents.  Capacity ≥ 1 is enforced by
    /// scenario validation.
    pub fn new(id: PoolId, capacity: u32) -> Self {
        let agents = (0..capacity).map(|i| Agent::new(id, AgentId(i))).collect();
        Self { id, agents, busy: 0 }
    }

    #[inline]
    pub fn id(&self) -> PoolId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.agents.len() as u32
    }

    #[inline]
    pub fn busy_count(&self) -> u32 {
        self.busy
    }

    /// `true` while at least one agent is free.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.busy < self.capacity()
    }

    /// Fraction of agents currently busy, in `[0, 1]`.
    #[inline]
    pub fn occupancy_unit(&self) -> f64 {
        self.busy as f64 / self.agents.len() as f64
    }

    #[inline]
    pub fn agent(&self, index: AgentId) -> &Agent {
        &self.agents[index.index()]
    }

    #[inline]
    pub fn agent_mut(&mut self, index: AgentId) -> &mut Agent {
        &mut self.agents[index.index()]
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The pool's own idle rank: the minimum over its agents.  A fully busy
    /// pool ranks [`IdleRank::Busy`].
    pub fn idle_rank(&self) -> IdleRank {
        self.agents
            .iter()
            .map(Agent::idle_rank)
            .min()
            .unwrap_or(IdleRank::Busy)
    }

    /// Index of the longest-idle agent.
    ///
    /// Busy agents rank last, so the result is free whenever any agent is;
    /// ties go to the lowest index because the scan keeps the first minimum.
    pub fn idlest_index(&self) -> AgentId {
        self.agents
            .iter()
            .enumerate()
            .min_by_key(|(_, agent)| agent.idle_rank())
            .map(|(index, _)| AgentId(index as u32))
            .unwrap_or(AgentId(0))
    }

    /// Record one more busy agent.
    pub fn add_busy(&mut self) -> AgentResult<()> {
        if self.busy >= self.capacity() {
            return Err(AgentError::BusyOverflow(self.id));
        }
        self.busy += 1;
        Ok(())
    }

    /// Record one fewer busy agent.
    pub fn sub_busy(&mut self) -> AgentResult<()> {
        if self.busy == 0 {
            return Err(AgentError::BusyUnderflow(self.id));
        }
        self.busy -= 1;
        Ok(())
    }

    /// Number of agents currently serving a call of `class`.
    pub fn serving_class(&self, class: cc_core::ClassId) -> usize {
        self.agents
            .iter()
            .filter(|a| a.ongoing_class() == Some(class))
            .count()
    }
}
