use std::fmt;

use serde::{Deserialize, Serialize};

/// One comparable unit of flattened document text.
pub type Line = String;

/// Kind of a [`DiffOp`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Equal,
    Add,
    Remove,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "equal",
            Self::Add => "add",
            Self::Remove => "remove",
        })
    }
}

/// A single line-level edit operation.
///
/// Serialized as `{"type": "equal" | "add" | "remove", "text": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum DiffOp {
    /// A line present in both sides.
    Equal(Line),
    /// A line present only on the right side.
    Add(Line),
    /// A line present only on the left side.
    Remove(Line),
}

impl DiffOp {
    pub fn kind(&self) -> OpKind {
        match self {
            Self::Equal(_) => OpKind::Equal,
            Self::Add(_) => OpKind::Add,
            Self::Remove(_) => OpKind::Remove,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Equal(t) | Self::Add(t) | Self::Remove(t) => t,
        }
    }

    /// Returns `true` if the line is on the left side (equal or remove).
    pub fn is_left(&self) -> bool {
        !matches!(self, Self::Add(_))
    }

    /// Returns `true` if the line is on the right side (equal or add).
    pub fn is_right(&self) -> bool {
        !matches!(self, Self::Remove(_))
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Equal(_))
    }
}

/// An ordered sequence of [`DiffOp`]s.
///
/// Invariant: the equal+remove lines, in order, are the left input; the
/// equal+add lines, in order, are the right input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript(Vec<DiffOp>);

impl EditScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, op: DiffOp) {
        self.0.push(op);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ops(&self) -> &[DiffOp] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffOp> {
        self.0.iter()
    }

    pub fn into_ops(self) -> Vec<DiffOp> {
        self.0
    }

    /// Returns `true` if no line was added or removed.
    pub fn is_identical(&self) -> bool {
        self.0.iter().all(|op| !op.is_change())
    }

    /// Reconstruct the left input.
    pub fn left_lines(&self) -> Vec<Line> {
        self.0
            .iter()
            .filter(|op| op.is_left())
            .map(|op| op.text().to_string())
            .collect()
    }

    /// Reconstruct the right input.
    pub fn right_lines(&self) -> Vec<Line> {
        self.0
            .iter()
            .filter(|op| op.is_right())
            .map(|op| op.text().to_string())
            .collect()
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.count(OpKind::Add)
    }

    /// Number of removed lines.
    pub fn removals(&self) -> usize {
        self.count(OpKind::Remove)
    }

    /// Number of unchanged lines.
    pub fn unchanged(&self) -> usize {
        self.count(OpKind::Equal)
    }

    fn count(&self, kind: OpKind) -> usize {
        self.0.iter().filter(|op| op.kind() == kind).count()
    }
}

impl From<Vec<DiffOp>> for EditScript {
    fn from(ops: Vec<DiffOp>) -> Self {
        Self(ops)
    }
}

impl FromIterator<DiffOp> for EditScript {
    fn from_iter<I: IntoIterator<Item = DiffOp>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<DiffOp> for EditScript {
    fn extend<I: IntoIterator<Item = DiffOp>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for EditScript {
    type Item = DiffOp;
    type IntoIter = std::vec::IntoIter<DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a DiffOp;
    type IntoIter = std::slice::Iter<'a, DiffOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
