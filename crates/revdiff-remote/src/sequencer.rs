//! Latest-request-wins sequencing for overlapping comparisons.
//!
//! Every request takes a [`RequestToken`] before it starts. When its result
//! arrives it is kept only if no newer token has been issued since, so a slow
//! answer to an older selection can never overwrite the answer to a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Issue number of one comparison request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// The most recently issued token, if any.
    pub fn latest(&self) -> Option<RequestToken> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            n => Some(RequestToken(n)),
        }
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }

    /// Keep `value` only if `token` has not been superseded.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Option<T> {
        if self.is_latest(token) {
            Some(value)
        } else {
            debug!(
                token = token.0,
                latest = self.latest.load(Ordering::Acquire),
                "dropping superseded result"
            );
            None
        }
    }
}
