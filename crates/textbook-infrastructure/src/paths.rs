//! Unified path management for textbook configuration and data files.
//!
//! All paths are derived from one `TextbookPaths` value so the CLI and tests
//! agree on the layout.

use std::path::{Path, PathBuf};

use thiserror::Error;

const APP_DIR: &str = "textbook";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The platform config or data directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

/// Path layout for the textbook client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/textbook/          # Config directory
/// ├── config.toml              # Application configuration
/// └── logs/                    # Application logs
///     └── textbook.log.YYYY-MM-DD
///
/// ~/.local/share/textbook/     # Data directory
/// └── slots/                   # Key-value slots (one JSON file per key)
///     └── ai_textbook_user.json
/// ```
///
/// With a base directory override, `config/` and `data/` are created under
/// that directory instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextbookPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl TextbookPaths {
    /// Resolves the layout, either under `base` or under the platform defaults.
    pub fn new(base: Option<&Path>) -> Result<Self, PathError> {
        match base {
            Some(base) => Ok(Self {
                config_dir: base.join("config"),
                data_dir: base.join("data"),
            }),
            None => {
                let config_dir = dirs::config_dir().ok_or(PathError::HomeDirNotFound)?;
                let data_dir = dirs::data_dir().ok_or(PathError::HomeDirNotFound)?;
                Ok(Self {
                    config_dir: config_dir.join(APP_DIR),
                    data_dir: data_dir.join(APP_DIR),
                })
            }
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Directory holding the key-value slot files.
    pub fn slots_dir(&self) -> PathBuf {
        self.data_dir.join("slots")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }
}
