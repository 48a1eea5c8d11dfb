//! Pre-generated arrival streams, one per class.

use std::collections::VecDeque;

use cc_core::{CcResult, ClassId, ExpRate, SimRng, Tick};
use cc_scenario::Scenario;

use crate::FlowEvent;

/// The ascending arrival ticks of every class, consumed from the front.
///
/// Interarrival gaps are exponential with mean `1/λ` minutes, accumulated
/// and converted to whole seconds (`round(cumsum * 60)`), so simultaneous
/// arrivals within one second are possible and preserved.  A class whose
/// stream runs dry before the horizon simply stops arriving — that is a
/// normal outcome, not an error.
#[derive(Debug)]
pub struct ArrivalFlow {
    pending: Vec<VecDeque<Tick>>,
}

impl ArrivalFlow {
    /// Draw `flow_size` interarrival gaps per class from `rng`.
    ///
    /// Classes are generated in index order, which fixes the position of
    /// every draw in the RNG stream and keeps runs reproducible.  A class
    /// with λ = 0 gets an empty stream.
    pub fn generate(scenario: &Scenario, rng: &mut SimRng, flow_size: usize) -> CcResult<Self> {
        let mut pending = Vec::with_capacity(scenario.class_count());
        for class in scenario.classes() {
            if class.lambda <= 0.0 {
                pending.push(VecDeque::new());
                continue;
            }
            let gap = ExpRate::new(class.lambda)?;
            let mut ticks = VecDeque::with_capacity(flow_size);
            let mut elapsed_minutes = 0.0;
            for _ in 0..flow_size {
                elapsed_minutes += gap.sample_minutes(rng);
                ticks.push_back(Tick((elapsed_minutes * 60.0).round() as u64));
            }
            pending.push(ticks);
        }
        Ok(Self { pending })
    }

    /// Pop every arrival with tick ≤ `now` into `events`, classes in index
    /// order.
    pub fn drain_due(&mut self, now: Tick, events: &mut Vec<FlowEvent>) {
        for (index, ticks) in self.pending.iter_mut().enumerate() {
            let class = ClassId(index as u16);
            while let Some(&at) = ticks.front() {
                if at > now {
                    break;
                }
                ticks.pop_front();
                events.push(FlowEvent::Arrival { class, at });
            }
        }
    }

    /// Arrivals not yet consumed for `class`.
    pub fn remaining(&self, class: ClassId) -> usize {
        self.pending.get(class.index()).map_or(0, |ticks| ticks.len())
    }

    pub fn is_exhausted(&self, class: ClassId) -> bool {
        self.remaining(class) == 0
    }
}
