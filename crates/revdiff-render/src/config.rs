use serde::{Deserialize, Serialize};

use crate::layout::Layout;
use crate::rows::CellStyle;

/// Presentation settings for a rendered diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Layout used when none is requested explicitly.
    pub layout: Layout,
    /// Header label of the left (older) column.
    pub left_label: String,
    /// Header label of the right (newer) column.
    pub right_label: String,
    /// Width of one split column in characters.
    pub column_width: usize,
    pub color: ColorMode,
    /// Print a `+N -N =N` footer after the rows.
    pub show_stats: bool,
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Inline,
            left_label: "Before".into(),
            right_label: "Current".into(),
            column_width: 60,
            color: ColorMode::Basic,
            show_stats: true,
            palette: Palette::default(),
        }
    }
}

/// How terminal output is coloured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// No escape codes.
    Off,
    /// The terminal's basic green/red/cyan.
    #[default]
    Basic,
    /// 24-bit colours taken from the [`Palette`].
    Truecolor,
}

/// Foreground/background pair of one visual treatment, as `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub foreground: String,
    pub background: String,
}

impl Treatment {
    pub fn new(foreground: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            foreground: foreground.into(),
            background: background.into(),
        }
    }

    /// Foreground as RGB, if it is a valid `#rrggbb` value.
    pub fn foreground_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(&self.foreground)
    }

    /// Background as RGB, if it is a valid `#rrggbb` value.
    pub fn background_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(&self.background)
    }
}

/// Colours of the additive, subtractive and media treatments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub added: Treatment,
    pub removed: Treatment,
    pub media: Treatment,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            added: Treatment::new("#065f46", "#ecfdf5"),
            removed: Treatment::new("#991b1b", "#fee2e2"),
            media: Treatment::new("#334155", "#f1f5f9"),
        }
    }
}

impl Palette {
    /// The treatment for a style; plain text has none.
    pub fn treatment(&self, style: CellStyle) -> Option<&Treatment> {
        match style {
            CellStyle::Plain => None,
            CellStyle::Added => Some(&self.added),
            CellStyle::Removed => Some(&self.removed),
            CellStyle::Media => Some(&self.media),
        }
    }
}

fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
