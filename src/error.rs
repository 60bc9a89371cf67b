//! Governance error taxonomy.
//!
//! Validation, not-found, conflict, and admission outcomes are expected
//! control flow and travel as typed values; only store faults are escalated
//! (and logged) as opaque server errors.

use std::time::Duration;

use thiserror::Error;

use crate::mutation::StoreError;
use crate::validation::ValidationErrors;

/// Errors produced by the governance layer.
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// One or more request fields failed validation. Reported to the caller
    /// verbatim; never logged as a server fault.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The identity does not resolve to an existing record.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A conditional update matched zero rows while the record still exists:
    /// a concurrent writer committed first. The caller must re-read and
    /// retry, or surface the conflict.
    #[error("unable to update the record due to an edit conflict, please try again")]
    EditConflict,

    /// The admission registry rejected the request. Recoverable after
    /// backoff; not logged as an error.
    #[error("rate limit exceeded")]
    RateLimited,

    /// A store call exceeded its deadline. Aborted, never silently retried.
    #[error("store operation timed out after {0:?}")]
    StoreTimeout(Duration),

    /// A connection or driver fault from the external store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for GovernanceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result type for governance operations.
pub type GovernanceResult<T> = Result<T, GovernanceError>;
