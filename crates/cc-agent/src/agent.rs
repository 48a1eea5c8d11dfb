//! One agent's service state machine.

use cc_core::{AgentId, ClassId, PoolId, Tick};

use crate::{AgentError, AgentResult};

// ── IdleRank ──────────────────────────────────────────────────────────────────

/// Ranking key for "longest idle" selection.
///
/// The derived ordering is the selection order: an agent that has never
/// served ranks before one that went idle at tick t, which ranks before any
/// busy agent.  Taking a minimum therefore picks the longest-idle agent and
/// never a busy one unless every agent is busy.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum IdleRank {
    /// Idle since simulation start.
    Never,
    /// Went idle when a service finished at this tick.
    Since(Tick),
    /// Currently serving; excluded from idlest selection by ranking last.
    Busy,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// A single agent within a pool.
#[derive(Debug, Clone)]
pub struct Agent {
    pool:    PoolId,
    index:   AgentId,
    /// Class of the call in progress; `None` while idle.
    ongoing: Option<ClassId>,
    /// Tick at which the call in progress finishes; `None` while idle.
    finish:  Option<Tick>,
    rank:    IdleRank,
}

impl Agent {
    pub fn new(pool: PoolId, index: AgentId) -> Self {
        Self {
            pool,
            index,
            ongoing: None,
            finish:  None,
            rank:    IdleRank::Never,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.ongoing.is_none()
    }

    #[inline]
    pub fn ongoing_class(&self) -> Option<ClassId> {
        self.ongoing
    }

    #[inline]
    pub fn finish_time(&self) -> Option<Tick> {
        self.finish
    }

    #[inline]
    pub fn idle_rank(&self) -> IdleRank {
        self.rank
    }

    /// Start serving a class-`class` call at `now` for `service_secs`.
    ///
    /// Returns the finish tick for insertion into the service stream.  Fails
    /// when the agent is already serving — that is a router bug and fatal to
    /// the simulation.
    pub fn receive(&mut self, now: Tick, class: ClassId, service_secs: u64) -> AgentResult<Tick> {
        if self.ongoing.is_some() {
            return Err(AgentError::Busy { pool: self.pool, agent: self.index });
        }
        let finish = now + service_secs;
        self.ongoing = Some(class);
        self.finish = Some(finish);
        self.rank = IdleRank::Busy;
        Ok(finish)
    }

    /// Finish the call in progress: the agent becomes idle and its idle rank
    /// records the finish tick.
    ///
    /// No-op on an idle agent, so the completion drain and the
    /// nothing-queued branch of the dispatcher may both call it without
    /// losing the recorded finish tick.
    pub fn complete(&mut self) {
        if let Some(finish) = self.finish.take() {
            self.ongoing = None;
            self.rank = IdleRank::Since(finish);
        }
    }
}
