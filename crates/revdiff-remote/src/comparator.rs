//! Compare two revisions locally or through a [`DiffSource`].

use std::time::Duration;

use revdiff_diff::diff_documents;
use revdiff_types::{DocumentInput, EditScript, Line};
use tracing::{debug, warn};

use crate::adapter::adapt;
use crate::error::RemoteError;
use crate::query::DiffQuery;
use crate::sequencer::RequestSequencer;
use crate::source::DiffSource;

/// Runs comparisons and keeps only the newest remote answer.
#[derive(Debug, Default)]
pub struct Comparator {
    sequencer: RequestSequencer,
    timeout: Option<Duration>,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up on remote requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn sequencer(&self) -> &RequestSequencer {
        &self.sequencer
    }

    /// Flatten both inputs and diff them.
    pub fn compare_local(&self, left: &DocumentInput, right: &DocumentInput) -> EditScript {
        diff_documents(left.nodes(), right.nodes())
    }

    /// Diff two inputs once both are available; `None` while either is
    /// still missing.
    pub fn compare_resolved(
        &self,
        left: Option<&DocumentInput>,
        right: Option<&DocumentInput>,
    ) -> Option<EditScript> {
        match (left, right) {
            (Some(left), Some(right)) => Some(self.compare_local(left, right)),
            _ => None,
        }
    }

    /// Ask `source` for the comparison and normalize its hunks.
    ///
    /// `base` holds the flattened left revision when the caller has it; the
    /// script then covers both revisions in full instead of only the hunks.
    /// Returns `None` when the request fails, times out, cannot be adapted,
    /// or was superseded by a later call on this comparator.
    pub async fn compare_remote<S>(
        &self,
        source: &S,
        query: &DiffQuery,
        base: Option<&[Line]>,
    ) -> Option<EditScript>
    where
        S: DiffSource + ?Sized,
    {
        let token = self.sequencer.issue();
        debug!(token = token.get(), title = %query.title, "requesting remote comparison");

        let fetched = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, source.fetch_diff(query)).await {
                Ok(result) => result,
                Err(_) => Err(RemoteError::Timeout(limit)),
            },
            None => source.fetch_diff(query).await,
        };

        let script = match fetched {
            Ok(response) => adapt(&response, base),
            Err(e) => {
                warn!(error = %e, title = %query.title, "remote comparison failed");
                None
            }
        };
        self.sequencer.accept(token, script).flatten()
    }
}
