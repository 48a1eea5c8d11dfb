//! `cc-core` — foundational types for the `rust_cc` call-center simulator.
//!
//! This crate is a dependency of every other `cc-*` crate.  It intentionally
//! has no `cc-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `ClassId`, `PoolId`, `AgentId`, `CallId`          |
//! | [`time`]  | `Tick`, `SimClock`, `SimParams`                   |
//! | [`rng`]   | `SimRng` (seeded stream), `ExpRate` (exponential) |
//! | [`error`] | `CcError`, `CcResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CcError, CcResult};
pub use ids::{AgentId, CallId, ClassId, PoolId};
pub use rng::{ExpRate, SimRng};
pub use time::{SimClock, SimParams, Tick};
