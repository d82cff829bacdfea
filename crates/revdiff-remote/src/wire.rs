//! Hunk wire format of a remote comparison.
//!
//! ```json
//! { "ops": [
//!     { "old_start": 2, "old_lines": 3, "new_start": 2, "new_lines": 3,
//!       "lines": [ { "op": "context", "text": "a" },
//!                  { "op": "del", "text": "b" },
//!                  { "op": "add", "text": "x" },
//!                  { "op": "context", "text": "c" } ] }
//! ] }
//! ```

use revdiff_diff::Hunk;
use revdiff_types::DiffOp;
use serde::{Deserialize, Serialize};

/// Role of one hunk line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerLineOp {
    #[serde(alias = "equal")]
    Context,
    #[serde(alias = "insert")]
    Add,
    #[serde(alias = "remove", alias = "delete")]
    Del,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLine {
    pub op: ServerLineOp,
    #[serde(default)]
    pub text: String,
}

impl ServerLine {
    pub fn to_op(&self) -> DiffOp {
        match self.op {
            ServerLineOp::Context => DiffOp::Equal(self.text.clone()),
            ServerLineOp::Add => DiffOp::Add(self.text.clone()),
            ServerLineOp::Del => DiffOp::Remove(self.text.clone()),
        }
    }

    /// Returns `true` for lines read from the left revision.
    pub fn is_old(&self) -> bool {
        !matches!(self.op, ServerLineOp::Add)
    }

    /// Returns `true` for lines read from the right revision.
    pub fn is_new(&self) -> bool {
        !matches!(self.op, ServerLineOp::Del)
    }
}

impl From<&DiffOp> for ServerLine {
    fn from(op: &DiffOp) -> Self {
        let (op, text) = match op {
            DiffOp::Equal(t) => (ServerLineOp::Context, t),
            DiffOp::Add(t) => (ServerLineOp::Add, t),
            DiffOp::Remove(t) => (ServerLineOp::Del, t),
        };
        Self {
            op,
            text: text.clone(),
        }
    }
}

/// One hunk as sent by the remote. Header fields follow the unified diff
/// convention used by [`Hunk`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    #[serde(default)]
    pub lines: Vec<ServerLine>,
}

impl ServerHunk {
    /// Left and right line counts carried by the body.
    pub fn body_counts(&self) -> (usize, usize) {
        let old = self.lines.iter().filter(|l| l.is_old()).count();
        let new = self.lines.iter().filter(|l| l.is_new()).count();
        (old, new)
    }

    pub fn to_hunk(&self) -> Hunk {
        Hunk {
            old_start: self.old_start,
            old_count: self.old_lines,
            new_start: self.new_start,
            new_count: self.new_lines,
            ops: self.lines.iter().map(ServerLine::to_op).collect(),
        }
    }
}

impl From<&Hunk> for ServerHunk {
    fn from(hunk: &Hunk) -> Self {
        Self {
            old_start: hunk.old_start,
            old_lines: hunk.old_count,
            new_start: hunk.new_start,
            new_lines: hunk.new_count,
            lines: hunk.ops.iter().map(ServerLine::from).collect(),
        }
    }
}

/// Body of a remote comparison response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDiffResponse {
    #[serde(default)]
    pub ops: Vec<ServerHunk>,
}

impl ServerDiffResponse {
    pub fn from_hunks(hunks: &[Hunk]) -> Self {
        Self {
            ops: hunks.iter().map(ServerHunk::from).collect(),
        }
    }
}
