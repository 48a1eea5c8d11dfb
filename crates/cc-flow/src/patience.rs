//! Queued calls ordered by abandonment deadline.

use std::collections::BTreeMap;

use cc_core::{CallId, ClassId, Tick};
use rustc_hash::FxHashSet;

use crate::FlowEvent;

/// Abandonment deadlines of queued calls, with lazy deletion.
///
/// A call lives in its class FIFO *and* here; serving it must remove it from
/// both.  Searching the map for the entry would be O(n), so removal is a
/// [`cancel`](Self::cancel) of the call's ID in the `live` set and the map
/// entry is skipped when its tick drains.  Stale entries never outlive their
/// deadline tick.
#[derive(Debug, Default)]
pub struct PatienceFlow {
    inner: BTreeMap<Tick, Vec<(ClassId, CallId)>>,
    /// Calls still waiting; the single source of truth for membership.
    live: FxHashSet<CallId>,
}

impl PatienceFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that queued `call` of `class` abandons at `deadline` unless
    /// served first.
    pub fn push(&mut self, deadline: Tick, class: ClassId, call: CallId) {
        self.inner.entry(deadline).or_default().push((class, call));
        self.live.insert(call);
    }

    /// Mark `call` as served; its pending deadline entry becomes inert.
    /// Returns `false` when the call was not waiting (already served or
    /// abandoned), which the simulator treats as an invariant violation.
    pub fn cancel(&mut self, call: CallId) -> bool {
        self.live.remove(&call)
    }

    /// Pop every live call whose deadline is ≤ `now` into `events`, in
    /// deadline order.  Cancelled entries are discarded on the way.
    pub fn drain_due(&mut self, now: Tick, events: &mut Vec<FlowEvent>) {
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            let (_, due) = entry.remove_entry();
            for (class, call) in due {
                if self.live.remove(&call) {
                    events.push(FlowEvent::Abandon { class, call });
                }
            }
        }
    }

    /// `true` while `call` is still waiting.
    pub fn contains(&self, call: CallId) -> bool {
        self.live.contains(&call)
    }

    /// Number of calls still waiting (cancelled entries excluded).
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
