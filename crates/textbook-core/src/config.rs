//! Configuration model.
//!
//! `RootConfig` mirrors `config.toml`. Loading it and applying environment
//! overrides is done by `textbook-infrastructure`; the result is resolved
//! once into a [`BackendEndpoint`] and handed to the HTTP client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, TextbookError};
use crate::profile::DEFAULT_PROFILE_KEY;

pub const DEVELOPMENT_URL: &str = "http://localhost:8000";
pub const PRODUCTION_URL: &str = "https://maazahmedsiddiqui-physical-ai-api.hf.space";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which backend deployment to talk to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BackendEnvironment {
    Development,
    #[default]
    Production,
}

impl BackendEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_URL,
            Self::Production => PRODUCTION_URL,
        }
    }

    /// Local hosts talk to the development backend, everything else to production.
    pub fn from_hostname(hostname: &str) -> Self {
        match hostname {
            "localhost" | "127.0.0.1" => Self::Development,
            _ => Self::Production,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BackendSettings {
    pub environment: BackendEnvironment,
    /// Overrides the environment's URL when set.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            environment: BackendEnvironment::default(),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSettings {
    pub profile_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            profile_key: DEFAULT_PROFILE_KEY.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RootConfig {
    pub backend: BackendSettings,
    pub storage: StorageSettings,
}

impl RootConfig {
    /// The endpoint these settings point at.
    ///
    /// A `base_url` override must be an absolute `http` or `https` URL.
    pub fn endpoint(&self) -> Result<BackendEndpoint> {
        let timeout = Duration::from_secs(self.backend.timeout_secs);
        let Some(base_url) = &self.backend.base_url else {
            return Ok(BackendEndpoint::new(
                self.backend.environment.base_url(),
                timeout,
            ));
        };

        let endpoint = BackendEndpoint::new(base_url.as_str(), timeout);
        if endpoint.host().is_none() {
            return Err(TextbookError::config(format!(
                "base_url must be an http(s) URL with a host, got '{}'",
                base_url
            )));
        }
        Ok(endpoint)
    }
}

/// Resolved backend address and request timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEndpoint {
    base_url: String,
    timeout: Duration,
}

impl BackendEndpoint {
    /// Trailing slashes are stripped so paths can be appended directly.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, timeout }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Host part of the base URL, or `None` when it is not an `http(s)` URL.
    pub fn host(&self) -> Option<&str> {
        let rest = self
            .base_url
            .strip_prefix("https://")
            .or_else(|| self.base_url.strip_prefix("http://"))?;
        let authority = rest.split('/').next().unwrap_or_default();
        let authority = authority.rsplit('@').next().unwrap_or_default();
        let host = if let Some(bracketed) = authority.strip_prefix('[') {
            bracketed.split(']').next().unwrap_or_default()
        } else {
            authority.split(':').next().unwrap_or_default()
        };
        Some(host).filter(|h| !h.is_empty())
    }

    /// The deployment this endpoint belongs to, judged by its host.
    pub fn environment(&self) -> BackendEnvironment {
        self.host()
            .map(BackendEnvironment::from_hostname)
            .unwrap_or_default()
    }
}

impl Default for BackendEndpoint {
    fn default() -> Self {
        Self::new(
            BackendEnvironment::default().base_url(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hostname() {
        assert_eq!(
            BackendEnvironment::from_hostname("localhost"),
            BackendEnvironment::Development
        );
        assert_eq!(
            BackendEnvironment::from_hostname("127.0.0.1"),
            BackendEnvironment::Development
        );
        assert_eq!(
            BackendEnvironment::from_hostname("book.example.org"),
            BackendEnvironment::Production
        );
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: RootConfig = toml::from_str(
            r#"
            [backend]
            environment = "development"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.environment, BackendEnvironment::Development);
        assert_eq!(config.backend.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.storage.profile_key, "ai_textbook_user");
        assert_eq!(config.endpoint().unwrap().base_url(), DEVELOPMENT_URL);
    }

    #[test]
    fn test_base_url_override_wins() {
        let mut config = RootConfig::default();
        config.backend.base_url = Some("http://10.0.0.5:9000/".to_string());
        config.backend.timeout_secs = 5;
        let endpoint = config.endpoint().unwrap();
        assert_eq!(endpoint.base_url(), "http://10.0.0.5:9000");
        assert_eq!(endpoint.url("/health"), "http://10.0.0.5:9000/health");
        assert_eq!(endpoint.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_base_url_without_scheme() {
        let mut config = RootConfig::default();
        config.backend.base_url = Some("localhost:8000".to_string());
        let err = config.endpoint().unwrap_err();
        assert!(err.is_config());

        config.backend.base_url = Some("http://".to_string());
        assert!(config.endpoint().unwrap_err().is_config());
    }

    #[test]
    fn test_endpoint_environment_follows_host() {
        let local = BackendEndpoint::new("http://127.0.0.1:8000/", Duration::from_secs(1));
        assert_eq!(local.host(), Some("127.0.0.1"));
        assert_eq!(local.environment(), BackendEnvironment::Development);

        let hosted = BackendEndpoint::new(PRODUCTION_URL, Duration::from_secs(1));
        assert_eq!(
            hosted.host(),
            Some("maazahmedsiddiqui-physical-ai-api.hf.space")
        );
        assert_eq!(hosted.environment(), BackendEnvironment::Production);

        assert_eq!(BackendEndpoint::default().environment(), BackendEnvironment::Production);
    }

    #[test]
    fn test_environment_parses_case_insensitively() {
        assert_eq!(
            "Development".parse::<BackendEnvironment>().unwrap(),
            BackendEnvironment::Development
        );
    }
}
