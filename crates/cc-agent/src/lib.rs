//! `cc-agent` — agents and agent pools.
//!
//! An [`Agent`] is a two-state machine (idle ↔ serving) that remembers when
//! it last went idle; an [`AgentPool`] owns a homogeneous set of agents plus
//! a busy counter.  The "longest idle" routing decisions reduce to taking a
//! minimum over [`IdleRank`] values, so both selection operations are plain
//! first-minimum scans with stable low-index tie-breaks.

pub mod agent;
pub mod error;
pub mod pool;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::{Agent, IdleRank};
pub use error::{AgentError, AgentResult};
pub use pool::AgentPool;
