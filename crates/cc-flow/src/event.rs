//! The per-tick event vocabulary.

use cc_core::{AgentId, CallId, ClassId, PoolId, Tick};

/// One due event, emitted by a stream drain and dispatched by the simulator.
///
/// Events of one tick are buffered in drain order — all arrivals (classes in
/// index order), then all completions (finish-tick order), then all
/// abandonments — and dispatched in that buffer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// A class-`class` customer arrived at `at` (≤ the draining tick).
    Arrival { class: ClassId, at: Tick },

    /// `agent` of `pool` finished its call.
    Completion { pool: PoolId, agent: AgentId },

    /// Queued call `call` of `class` ran out of patience.
    Abandon { class: ClassId, call: CallId },
}
