//! Row building for the inline and split layouts.
//!
//! Rows are keyed by their index in the edit script. Duplicate lines are
//! legal, so text never identifies a row.

use revdiff_types::{DiffOp, EditScript, IMAGE_TAG};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::Layout;

/// Non-breaking blank shown for an empty unchanged line or a missing cell.
pub const BLANK: &str = "\u{00A0}";

/// Visual treatment of a row or cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStyle {
    Plain,
    /// Additive treatment.
    Added,
    /// Subtractive treatment.
    Removed,
    /// Neutral treatment for image placeholders.
    Media,
}

/// Marker prefixed to changed inline rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Add,
    Remove,
}

impl Marker {
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Remove => '-',
        }
    }
}

/// Column of the split layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One row of the inline layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineRow {
    pub key: usize,
    pub marker: Option<Marker>,
    pub text: String,
    pub style: CellStyle,
}

impl InlineRow {
    /// The text as shown: `+ text`, `- text`, or the plain line.
    pub fn display(&self) -> String {
        match self.marker {
            Some(marker) => format!("{} {}", marker.symbol(), self.text),
            None if self.text.is_empty() => BLANK.to_string(),
            None => self.text.clone(),
        }
    }
}

/// One cell of the split layout. `text` is `None` when the line has no
/// counterpart on this side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCell {
    pub text: Option<String>,
    pub style: CellStyle,
}

impl SplitCell {
    fn new(text: Option<String>, side: Side) -> Self {
        let style = cell_style(text.as_deref(), side);
        Self { text, style }
    }

    /// Returns `true` when the cell stands in for a missing line.
    pub fn is_missing(&self) -> bool {
        self.text.is_none()
    }

    /// The text as shown. A missing cell shows [`BLANK`].
    pub fn display(&self) -> &str {
        self.text.as_deref().unwrap_or(BLANK)
    }
}

/// One row of the split layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRow {
    pub key: usize,
    pub left: SplitCell,
    pub right: SplitCell,
}

/// Column labels shown above the split layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub left: String,
    pub right: String,
}

/// A left/right pair before styling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedRow {
    pub left: Option<String>,
    pub right: Option<String>,
}

/// The rendered rows of one layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum Rendered {
    Inline { rows: Vec<InlineRow> },
    Split { header: Header, rows: Vec<SplitRow> },
}

impl Rendered {
    /// Number of body rows, excluding the split header.
    pub fn len(&self) -> usize {
        match self {
            Self::Inline { rows } => rows.len(),
            Self::Split { rows, .. } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Line counts of an edit script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub additions: usize,
    pub removals: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn from_script(script: &EditScript) -> Self {
        Self {
            additions: script.additions(),
            removals: script.removals(),
            unchanged: script.unchanged(),
        }
    }

    pub fn total_changes(&self) -> usize {
        self.additions + self.removals
    }
}

/// Render an edit script into rows of the given layout.
///
/// An absent or empty script renders no body rows. The split layout always
/// carries its header.
pub fn render(
    script: Option<&EditScript>,
    layout: Layout,
    left_label: &str,
    right_label: &str,
) -> Rendered {
    let ops = script.map(EditScript::ops).unwrap_or_default();
    debug!(ops = ops.len(), %layout, "rendering diff");
    match layout {
        Layout::Inline => Rendered::Inline {
            rows: ops.iter().enumerate().map(inline_row).collect(),
        },
        Layout::Split => Rendered::Split {
            header: Header {
                left: left_label.to_string(),
                right: right_label.to_string(),
            },
            rows: align(ops)
                .into_iter()
                .enumerate()
                .map(|(key, row)| SplitRow {
                    key,
                    left: SplitCell::new(row.left, Side::Left),
                    right: SplitCell::new(row.right, Side::Right),
                })
                .collect(),
        },
    }
}

/// Pair each operation with its left and right cell contents.
pub fn align(ops: &[DiffOp]) -> Vec<AlignedRow> {
    ops.iter()
        .map(|op| match op {
            DiffOp::Equal(t) => AlignedRow {
                left: Some(t.clone()),
                right: Some(t.clone()),
            },
            DiffOp::Remove(t) => AlignedRow {
                left: Some(t.clone()),
                right: None,
            },
            DiffOp::Add(t) => AlignedRow {
                left: None,
                right: Some(t.clone()),
            },
        })
        .collect()
}

fn inline_row((key, op): (usize, &DiffOp)) -> InlineRow {
    let (marker, style) = match op {
        DiffOp::Equal(_) => (None, CellStyle::Plain),
        DiffOp::Add(_) => (Some(Marker::Add), CellStyle::Added),
        DiffOp::Remove(_) => (Some(Marker::Remove), CellStyle::Removed),
    };
    InlineRow {
        key,
        marker,
        text: op.text().to_string(),
        style,
    }
}

/// A missing left line reads as a removal and a missing right line as an
/// addition. Image placeholders get the media treatment.
fn cell_style(text: Option<&str>, side: Side) -> CellStyle {
    match (text, side) {
        (None, Side::Left) => CellStyle::Removed,
        (None, Side::Right) => CellStyle::Added,
        (Some(t), _) if t.starts_with(IMAGE_TAG) => CellStyle::Media,
        (Some(_), _) => CellStyle::Plain,
    }
}
