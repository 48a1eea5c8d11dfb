//! Active services ordered by finish tick.

use std::collections::BTreeMap;

use cc_core::{AgentId, PoolId, Tick};

use crate::FlowEvent;

/// Busy agents keyed by the tick their call finishes.
///
/// `BTreeMap<Tick, Vec<_>>` gives O(log W) insert and pop where W is the
/// number of distinct pending finish ticks; draining is pop-while-front ≤
/// now, so a quiet tick costs one key comparison.
#[derive(Debug, Default)]
pub struct ServiceFlow {
    inner: BTreeMap<Tick, Vec<(PoolId, AgentId)>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl ServiceFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that `agent` of `pool` finishes at `finish`.
    pub fn push(&mut self, finish: Tick, pool: PoolId, agent: AgentId) {
        self.inner.entry(finish).or_default().push((pool, agent));
        self.total += 1;
    }

    /// Pop every agent whose finish tick is ≤ `now` into `events`, in
    /// finish-tick order.
    pub fn drain_due(&mut self, now: Tick, events: &mut Vec<FlowEvent>) {
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            let (_, due) = entry.remove_entry();
            self.total -= due.len();
            for (pool, agent) in due {
                events.push(FlowEvent::Completion { pool, agent });
            }
        }
    }

    /// The earliest pending finish tick, or `None` when no call is active.
    pub fn next_finish(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Number of active services.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
