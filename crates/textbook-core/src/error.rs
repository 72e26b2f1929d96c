//! Error types for the textbook client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the storage and configuration layers.
///
/// Flow-specific failures (auth validation, augmentation, backend calls) have
/// their own enums; this one covers what every layer can run into when it
/// touches the device.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TextbookError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Storage slot error (key-value layer)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TextbookError {
    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for TextbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for TextbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TextbookError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for TextbookError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, TextbookError>`.
pub type Result<T> = std::result::Result<T, TextbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts_to_serialization() {
        let err: TextbookError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: JSON"));
    }

    #[test]
    fn test_io_error_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TextbookError = io.into();
        assert!(matches!(err, TextbookError::Io { .. }));
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_config_error() {
        let err = TextbookError::config("base_url must be an http(s) URL");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Configuration error: base_url must be an http(s) URL"
        );
    }
}
