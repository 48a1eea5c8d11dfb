//! The `RoutePolicy` trait — the routing extension point.

use cc_agent::AgentPool;
use cc_core::{ClassId, PoolId};
use cc_flow::ClassQueues;
use cc_scenario::Scenario;

use crate::LongestIdle;

/// Read-only simulation view handed to routing decisions.
///
/// Policies never mutate state; the dispatcher applies their choice.
pub struct RouteCtx<'a> {
    pub scenario: &'a Scenario,
    pub pools:    &'a [AgentPool],
    pub queues:   &'a ClassQueues,
}

/// Pluggable routing behavior.
///
/// Both methods return `None` when no candidate qualifies — a normal
/// simulation outcome (the call queues, or the agent stays idle), never an
/// error.  Implementations must be deterministic: given equal context they
/// return equal choices, since routing is inside the reproducibility
/// contract.
pub trait RoutePolicy: Send + Sync {
    /// Short selector key, e.g. `"G"`.
    fn key(&self) -> &'static str;

    /// Pick the pool that takes an arriving call of `class`, among the
    /// compatible pools with a free agent.
    fn pool_for_arrival(&self, class: ClassId, ctx: &RouteCtx<'_>) -> Option<PoolId>;

    /// Pick the class queue a freed agent of `pool` serves next, among the
    /// compatible classes with waiting calls.
    fn class_for_completion(&self, pool: PoolId, ctx: &RouteCtx<'_>) -> Option<ClassId>;
}

/// Resolve a policy by its selector key.
///
/// Returns `None` for unknown keys; the simulator builder turns that into a
/// configuration error.
pub fn policy_by_key(key: &str) -> Option<Box<dyn RoutePolicy>> {
    match key {
        "G" | "g" => Some(Box::new(LongestIdle)),
        _ => None,
    }
}
