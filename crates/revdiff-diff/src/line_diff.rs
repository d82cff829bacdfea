//! Line diff: longest-common-subsequence alignment of two line sequences.
//!
//! The table is filled from the bottom-right corner and the script is read
//! forward from the top-left. When skipping a left line and skipping a right
//! line keep the same LCS length, the left line is removed first, so a
//! changed line always reads as a removal followed by an addition.

use revdiff_types::{DiffOp, EditScript};
use tracing::debug;

/// Compute the edit script turning `a` into `b`.
///
/// Lines compare by exact string equality. Runs in O(n·m) time and space.
pub fn diff_lines<A, B>(a: &[A], b: &[B]) -> EditScript
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let table = LcsTable::build(a, b);
    let (n, m) = (a.len(), b.len());
    let common = table.get(0, 0);

    let mut script = EditScript::with_capacity(n + m - common);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i].as_ref() == b[j].as_ref() {
            script.push(DiffOp::Equal(a[i].as_ref().to_string()));
            i += 1;
            j += 1;
        } else if table.get(i + 1, j) >= table.get(i, j + 1) {
            script.push(DiffOp::Remove(a[i].as_ref().to_string()));
            i += 1;
        } else {
            script.push(DiffOp::Add(b[j].as_ref().to_string()));
            j += 1;
        }
    }
    script.extend(a[i..].iter().map(|line| DiffOp::Remove(line.as_ref().to_string())));
    script.extend(b[j..].iter().map(|line| DiffOp::Add(line.as_ref().to_string())));

    debug!(
        left = n,
        right = m,
        common,
        ops = script.len(),
        "computed line diff"
    );
    script
}

/// Length of the longest common subsequence of `a` and `b`.
pub fn lcs_len<A, B>(a: &[A], b: &[B]) -> usize
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    LcsTable::build(a, b).get(0, 0)
}

/// `(n+1) × (m+1)` table where cell `(i, j)` is the LCS length of `a[i..]`
/// and `b[j..]`. The last row and column stay zero.
struct LcsTable {
    cols: usize,
    cells: Vec<usize>,
}

impl LcsTable {
    fn build<A, B>(a: &[A], b: &[B]) -> Self
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let (n, m) = (a.len(), b.len());
        let cols = m + 1;
        let mut table = Self {
            cols,
            cells: vec![0; (n + 1) * cols],
        };
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                let value = if a[i].as_ref() == b[j].as_ref() {
                    table.get(i + 1, j + 1) + 1
                } else {
                    table.get(i + 1, j).max(table.get(i, j + 1))
                };
                table.cells[i * cols + j] = value;
            }
        }
        table
    }

    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }
}
