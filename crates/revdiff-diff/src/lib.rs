//! Diff engine for revdiff.
//!
//! Flattens rich-text content trees into comparable lines, aligns two line
//! sequences with a longest-common-subsequence table, and groups the
//! resulting edit script into hunks with context.
//!
//! # Key Items
//!
//! - [`flatten`] / [`extract_text`] -- Content tree to lines
//! - [`diff_lines`] -- LCS line diff producing an [`EditScript`]
//! - [`group_hunks`] / [`Hunk`] -- Changed regions with surrounding context

pub mod flatten;
pub mod hunk;
pub mod line_diff;

pub use flatten::{extract_text, flatten, image_placeholder};
pub use hunk::{group_hunks, Hunk};
pub use line_diff::{diff_lines, lcs_len};

use revdiff_types::{ContentNode, EditScript};

/// Flatten both node lists and diff the resulting lines.
pub fn diff_documents(left: &[ContentNode], right: &[ContentNode]) -> EditScript {
    diff_lines(&flatten(left), &flatten(right))
}
