use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid revision reference: {0:?} (expected a number or \"current\")")]
    InvalidRevision(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
