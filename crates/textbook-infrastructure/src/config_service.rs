//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`
//! (~/.config/textbook/config.toml by default) and applies environment
//! overrides on top of it.

use std::path::{Path, PathBuf};

use textbook_core::Result;
use textbook_core::config::{BackendEndpoint, BackendEnvironment, RootConfig};

use crate::storage::atomic::{read_optional, write_atomic};

/// Selects the backend deployment (`development` / `production`).
pub const ENV_ENVIRONMENT: &str = "TEXTBOOK_ENV";
/// Overrides the backend base URL outright.
pub const ENV_API_URL: &str = "TEXTBOOK_API_URL";

/// Reads and writes `config.toml`.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file. A missing or blank file yields the defaults; a file
    /// that does not parse is an error.
    pub fn load(&self) -> Result<RootConfig> {
        match read_optional(&self.path)? {
            Some(content) if !content.trim().is_empty() => Ok(toml::from_str(&content)?),
            _ => {
                tracing::debug!(
                    "No config at {}, using defaults",
                    self.path.display()
                );
                Ok(RootConfig::default())
            }
        }
    }

    pub fn save(&self, config: &RootConfig) -> Result<()> {
        let content = toml::to_string_pretty(config)?;
        write_atomic(&self.path, content.as_bytes())?;
        Ok(())
    }

    /// Loads the file, applies the process environment and resolves the
    /// endpoint. Called once at startup.
    pub fn resolve(&self) -> Result<(RootConfig, BackendEndpoint)> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    fn resolve_with<F>(&self, lookup: F) -> Result<(RootConfig, BackendEndpoint)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, lookup);
        let endpoint = config.endpoint()?;
        tracing::info!(
            "Backend endpoint: {} ({})",
            endpoint.base_url(),
            endpoint.environment()
        );
        Ok((config, endpoint))
    }
}

/// Applies `TEXTBOOK_ENV` and `TEXTBOOK_API_URL` from `lookup`.
///
/// An unrecognised environment name is logged and ignored. An empty URL is
/// treated as unset.
pub fn apply_env_overrides<F>(config: &mut RootConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = lookup(ENV_ENVIRONMENT) {
        match name.trim().parse::<BackendEnvironment>() {
            Ok(environment) => config.backend.environment = environment,
            Err(_) => tracing::warn!("Ignoring unknown {}='{}'", ENV_ENVIRONMENT, name),
        }
    }

    if let Some(url) = lookup(ENV_API_URL) {
        let url = url.trim();
        if !url.is_empty() {
            config.backend.base_url = Some(url.to_string());
        }
    }
}
