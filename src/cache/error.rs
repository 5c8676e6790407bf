use thiserror::Error;

/// Failure of a single `validate_user_token` call.
///
/// Every variant aborts the remaining steps; nothing is retried.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Record store could not be queried (a missing record is not an error).
    #[error("record store lookup failed: {0}")]
    StoreLookup(#[source] anyhow::Error),

    /// Oracle unreachable, rejected the request or answered with garbage.
    #[error("validation oracle failed: {0}")]
    Oracle(#[source] anyhow::Error),

    /// Oracle answered but the outcome could not be persisted. The outcome is dropped.
    #[error("record store write failed: {0}")]
    StoreWrite(#[source] anyhow::Error),
}

impl ValidationError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::StoreLookup(_) => "store_lookup",
            ValidationError::Oracle(_) => "oracle",
            ValidationError::StoreWrite(_) => "store_write",
        }
    }
}
