//! `cc-router` — the routing-policy extension point.
//!
//! A policy answers the two symmetric questions of skills-based routing:
//! which pool takes an arriving call, and which class queue a freed agent
//! serves next.  Policies are pure functions over a read-only [`RouteCtx`]
//! view, selected at build time by a short string key (only `"G"` ships).

pub mod greedy;
pub mod policy;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use greedy::LongestIdle;
pub use policy::{policy_by_key, RouteCtx, RoutePolicy};
