use std::time::Duration;

use revdiff_types::RevisionRef;
use thiserror::Error;

/// Errors raised while normalizing remote hunks into an edit script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdaptError {
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error(
        "hunk {hunk}: header declares {declared_old}/{declared_new} lines, body carries {actual_old}/{actual_new}"
    )]
    CountMismatch {
        hunk: usize,
        declared_old: usize,
        declared_new: usize,
        actual_old: usize,
        actual_new: usize,
    },

    #[error("hunk {hunk}: old_start is 0 but the hunk covers {old_lines} old lines")]
    InvalidStart { hunk: usize, old_lines: usize },

    #[error("hunk {hunk} starts at offset {offset}, before the end of the previous hunk ({cursor})")]
    Overlap {
        hunk: usize,
        offset: usize,
        cursor: usize,
    },

    #[error("hunk {hunk} reaches line {end}, but the base revision has {base_len} lines")]
    OutOfRange {
        hunk: usize,
        end: usize,
        base_len: usize,
    },

    #[error("hunk {hunk}: line {line} does not match the base revision")]
    BaseMismatch { hunk: usize, line: usize },
}

/// Convenience alias for adapter results.
pub type AdaptResult<T> = Result<T, AdaptError>;

/// Errors from a diff source.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("revision {revision} of {title} not found")]
    RevisionNotFound { title: String, revision: RevisionRef },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience alias for diff source results.
pub type RemoteResult<T> = Result<T, RemoteError>;
