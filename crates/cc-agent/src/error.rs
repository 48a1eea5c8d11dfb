//! Error types for cc-agent.

use thiserror::Error;

use cc_core::{AgentId, PoolId};

/// Dispatch errors.  Every variant indicates a router or accounting bug and
/// is fatal to the simulation that raises it.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{agent} in {pool} is already serving a call")]
    Busy { pool: PoolId, agent: AgentId },

    #[error("{0}: busy count would exceed capacity")]
    BusyOverflow(PoolId),

    #[error("{0}: busy count would drop below zero")]
    BusyUnderflow(PoolId),
}

/// Alias for `Result<T, AgentError>`.
pub type AgentResult<T> = Result<T, AgentError>;
