//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into `CcError`
//! via `From` impls or wrap it as one variant.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{ClassId, PoolId};

/// The top-level error type for `cc-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CcError {
    #[error("class {0} not found")]
    ClassNotFound(ClassId),

    #[error("pool {0} not found")]
    PoolNotFound(PoolId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `cc-*` crates.
pub type CcResult<T> = Result<T, CcError>;
