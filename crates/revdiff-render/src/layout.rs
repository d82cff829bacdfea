use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual arrangement of a rendered diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One row per operation, with `+`/`-` markers.
    #[default]
    Inline,
    /// Two aligned columns, left and right revision.
    Split,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inline => "inline",
            Self::Split => "split",
        })
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" | "unified" => Ok(Self::Inline),
            "split" | "side-by-side" => Ok(Self::Split),
            other => Err(format!("unknown layout {other:?} (expected inline or split)")),
        }
    }
}
