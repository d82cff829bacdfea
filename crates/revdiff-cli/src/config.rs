use std::path::{Path, PathBuf};

use revdiff_remote::DEFAULT_CONTEXT;
use revdiff_render::RenderConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "revdiff.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub render: RenderConfig,
    /// Context lines around each hunk.
    pub context: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            context: DEFAULT_CONTEXT,
        }
    }
}

impl CliConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicit config file, or `revdiff.toml` from `dir` when it
    /// exists, or the defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revdiff_render::{ColorMode, Layout};

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let c = CliConfig::load(None, dir.path()).unwrap();
        assert_eq!(c, CliConfig::default());
        assert_eq!(c.context, 3);
    }

    #[test]
    fn picks_up_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "context = 1\n\n[render]\nlayout = \"split\"\ncolor = \"off\"\n",
        )
        .unwrap();
        let c = CliConfig::load(None, dir.path()).unwrap();
        assert_eq!(c.context, 1);
        assert_eq!(c.render.layout, Layout::Split);
        assert_eq!(c.render.color, ColorMode::Off);
        assert_eq!(c.render.column_width, 60);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = CliConfig::load(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "context = \"many\"").unwrap();
        let err = CliConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }
}
