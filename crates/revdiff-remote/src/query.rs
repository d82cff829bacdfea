use revdiff_types::RevisionRef;
use serde::{Deserialize, Serialize};

/// Context lines requested around each hunk when none is given.
pub const DEFAULT_CONTEXT: usize = 3;

fn default_context() -> usize {
    DEFAULT_CONTEXT
}

/// Parameters of a remote comparison request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffQuery {
    /// Page title, e.g. `Seoul/Campus`.
    pub title: String,
    pub left_rev: RevisionRef,
    pub right_rev: RevisionRef,
    #[serde(default = "default_context")]
    pub context: usize,
}

impl DiffQuery {
    pub fn new(title: impl Into<String>, left_rev: RevisionRef, right_rev: RevisionRef) -> Self {
        Self {
            title: title.into(),
            left_rev,
            right_rev,
            context: DEFAULT_CONTEXT,
        }
    }

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Query-string pairs in request order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("left_rev", self.left_rev.to_string()),
            ("right_rev", self.right_rev.to_string()),
            ("context", self.context.to_string()),
        ]
    }
}
