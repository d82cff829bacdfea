//! Diff presenter for revdiff.
//!
//! Turns an [`EditScript`](revdiff_types::EditScript) into display rows for
//! one of two layouts, independent of whether the script was computed
//! locally or adapted from a remote source.
//!
//! # Key Types
//!
//! - [`Layout`] -- Inline (one column, `+`/`-` markers) or split (two columns)
//! - [`Rendered`] / [`InlineRow`] / [`SplitRow`] -- Positionally keyed rows
//! - [`CellStyle`] -- Plain, additive, subtractive, or media treatment
//! - [`RenderConfig`] / [`Palette`] -- Presentation settings
//! - [`TerminalRenderer`] -- ANSI output of rendered rows

pub mod config;
pub mod layout;
pub mod rows;
pub mod terminal;

pub use config::{ColorMode, Palette, RenderConfig, Treatment};
pub use layout::Layout;
pub use rows::{
    align, render, AlignedRow, CellStyle, DiffStats, Header, InlineRow, Marker, Rendered, Side,
    SplitCell, SplitRow, BLANK,
};
pub use terminal::TerminalRenderer;
