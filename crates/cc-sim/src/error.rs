//! Error types for cc-sim.

use thiserror::Error;

use cc_agent::AgentError;
use cc_core::CcError;
use cc_scenario::ScenarioError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unknown routing policy {0:?}")]
    UnknownPolicy(String),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// A routing decision tried to use a busy agent or broke the busy-count
    /// bookkeeping.  Always a bug, never a scenario property.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] AgentError),

    #[error("simulation invariant violated: {0}")]
    Invariant(String),

    #[error(transparent)]
    Core(#[from] CcError),
}

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;
