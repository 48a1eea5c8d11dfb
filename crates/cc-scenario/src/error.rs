//! Error types for cc-scenario.

use thiserror::Error;

/// Errors detected while validating a scenario document into a graph.
///
/// All of these surface at construction time; a simulation is never started
/// from an invalid scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("unknown topology {0:?} (expected X, N, W, or G)")]
    UnknownTopology(String),

    #[error("scenario declares no agent pools")]
    NoPools,

    #[error("pool s{0} has zero capacity")]
    EmptyPool(usize),

    #[error("service-rate matrix is {got_rows}×{got_cols}, expected {rows}×{cols}")]
    MatrixShape {
        rows:     usize,
        cols:     usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("{what} lists {got} entries, expected {expected}")]
    RateCount {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },

    #[error("class c{0}: arrival rate must be finite and non-negative")]
    BadArrivalRate(usize),

    #[error("class c{0}: patience rate must be finite and positive")]
    BadPatienceRate(usize),

    #[error("edge (s{pool}, c{class}): service rate must be positive and finite")]
    BadServiceRate { pool: usize, class: usize },
}

/// Alias for `Result<T, ScenarioError>`.
pub type ScenarioResult<T> = Result<T, ScenarioError>;
