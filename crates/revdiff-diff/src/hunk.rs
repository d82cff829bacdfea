//! Hunk grouping: split an edit script into changed regions with context.

use std::fmt;

use revdiff_types::{DiffOp, EditScript};
use serde::{Deserialize, Serialize};

/// A contiguous region of changes plus up to `context` unchanged lines on
/// each side.
///
/// Starts are 1-based. When a side contributes no lines, its start is the
/// number of lines before the hunk on that side (0 at the top), as in a
/// unified diff header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    pub ops: Vec<DiffOp>,
}

impl Hunk {
    /// Zero-based index of the first left line covered by the hunk.
    pub fn old_offset(&self) -> usize {
        start_to_offset(self.old_start, self.old_count)
    }

    /// Zero-based index of the first right line covered by the hunk.
    pub fn new_offset(&self) -> usize {
        start_to_offset(self.new_start, self.new_count)
    }

    /// Unified diff header, e.g. `@@ -3,4 +3,5 @@`.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for op in &self.ops {
            let marker = match op {
                DiffOp::Equal(_) => ' ',
                DiffOp::Add(_) => '+',
                DiffOp::Remove(_) => '-',
            };
            writeln!(f, "{marker}{}", op.text())?;
        }
        Ok(())
    }
}

fn start_to_offset(start: usize, count: usize) -> usize {
    if count == 0 {
        start
    } else {
        start.saturating_sub(1)
    }
}

fn offset_to_start(offset: usize, count: usize) -> usize {
    if count == 0 {
        offset
    } else {
        offset + 1
    }
}

/// Group the changes of `script` into hunks carrying up to `context`
/// unchanged lines before and after. Two change runs separated by at most
/// `2 * context` unchanged lines share a hunk.
///
/// An identical script yields no hunks.
pub fn group_hunks(script: &EditScript, context: usize) -> Vec<Hunk> {
    let ops = script.ops();

    // Op-index windows [start, end) around each change, merged on overlap.
    let mut windows: Vec<(usize, usize)> = Vec::new();
    for (idx, op) in ops.iter().enumerate() {
        if !op.is_change() {
            continue;
        }
        let start = idx.saturating_sub(context);
        let end = idx.saturating_add(1).saturating_add(context).min(ops.len());
        match windows.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => windows.push((start, end)),
        }
    }

    // Left/right line positions before each op index.
    let mut positions = Vec::with_capacity(ops.len() + 1);
    let (mut old_pos, mut new_pos) = (0usize, 0usize);
    for op in ops {
        positions.push((old_pos, new_pos));
        if op.is_left() {
            old_pos += 1;
        }
        if op.is_right() {
            new_pos += 1;
        }
    }
    positions.push((old_pos, new_pos));

    windows
        .into_iter()
        .map(|(start, end)| {
            let (old_before, new_before) = positions[start];
            let (old_after, new_after) = positions[end];
            let old_count = old_after - old_before;
            let new_count = new_after - new_before;
            Hunk {
                old_start: offset_to_start(old_before, old_count),
                old_count,
                new_start: offset_to_start(new_before, new_count),
                new_count,
                ops: ops[start..end].to_vec(),
            }
        })
        .collect()
}
