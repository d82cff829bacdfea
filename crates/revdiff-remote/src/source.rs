//! Where remote comparisons come from.
//!
//! [`DiffSource`] is the seam a network client implements. [`InMemoryRevisions`]
//! answers from revisions held in memory and computes hunks the same way a
//! server would, which makes it usable in tests and offline sessions.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use revdiff_diff::{diff_documents, group_hunks};
use revdiff_types::{RevisionRef, WikiRevision};
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};
use crate::query::DiffQuery;
use crate::wire::ServerDiffResponse;

/// Answers comparison queries with grouped hunks.
#[async_trait]
pub trait DiffSource: Send + Sync {
    async fn fetch_diff(&self, query: &DiffQuery) -> RemoteResult<ServerDiffResponse>;
}

#[derive(Debug, Default)]
struct PageHistory {
    revisions: BTreeMap<u64, WikiRevision>,
    current: u64,
}

/// Revision histories of wiki pages, keyed by title.
///
/// Data lives behind a `RwLock` and is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryRevisions {
    pages: RwLock<HashMap<String, PageHistory>>,
}

impl InMemoryRevisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a revision under its title and number. The highest number seen
    /// for a title becomes its current revision.
    pub fn insert_revision(&self, revision: WikiRevision) -> RemoteResult<()> {
        let mut pages = self
            .pages
            .write()
            .map_err(|e| RemoteError::Internal(format!("lock poisoned: {e}")))?;
        let page = pages.entry(revision.meta.title.clone()).or_default();
        let number = revision.meta.current_rev_number;
        page.current = page.current.max(number);
        page.revisions.insert(number, revision);
        Ok(())
    }

    /// Look up one revision of a page.
    pub fn revision(&self, title: &str, revision: RevisionRef) -> RemoteResult<WikiRevision> {
        let pages = self
            .pages
            .read()
            .map_err(|e| RemoteError::Internal(format!("lock poisoned: {e}")))?;
        let page = pages
            .get(title)
            .ok_or_else(|| RemoteError::PageNotFound(title.to_string()))?;
        page.revisions
            .get(&revision.resolve(page.current))
            .cloned()
            .ok_or_else(|| RemoteError::RevisionNotFound {
                title: title.to_string(),
                revision,
            })
    }

    /// Number of the current revision of a page.
    pub fn current_number(&self, title: &str) -> RemoteResult<u64> {
        let pages = self
            .pages
            .read()
            .map_err(|e| RemoteError::Internal(format!("lock poisoned: {e}")))?;
        pages
            .get(title)
            .map(|page| page.current)
            .ok_or_else(|| RemoteError::PageNotFound(title.to_string()))
    }

    /// All stored page titles, sorted.
    pub fn titles(&self) -> RemoteResult<Vec<String>> {
        let pages = self
            .pages
            .read()
            .map_err(|e| RemoteError::Internal(format!("lock poisoned: {e}")))?;
        let mut titles: Vec<String> = pages.keys().cloned().collect();
        titles.sort();
        Ok(titles)
    }
}

#[async_trait]
impl DiffSource for InMemoryRevisions {
    async fn fetch_diff(&self, query: &DiffQuery) -> RemoteResult<ServerDiffResponse> {
        let left = self.revision(&query.title, query.left_rev)?;
        let right = self.revision(&query.title, query.right_rev)?;
        let script = diff_documents(left.nodes(), right.nodes());
        let hunks = group_hunks(&script, query.context);
        debug!(
            title = %query.title,
            left = left.meta.current_rev_number,
            right = right.meta.current_rev_number,
            hunks = hunks.len(),
            "served comparison"
        );
        Ok(ServerDiffResponse::from_hunks(&hunks))
    }
}
