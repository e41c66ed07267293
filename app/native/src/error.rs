//! Error types for Jester.
//!
//! The widget core recovers from its own failures; this type only surfaces
//! errors to the command line.

use thiserror::Error;

use crate::config::ConfigError;
use crate::modules::assets::AssetError;
use crate::modules::session::ActorError;

/// Errors returned by CLI commands.
#[derive(Debug, Error)]
pub enum JesterError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Asset loading error.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),
    /// The widget actor stopped or did not answer.
    #[error("Widget error: {0}")]
    Actor(#[from] ActorError),
    /// The widget task panicked or was cancelled.
    #[error("Widget task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<String> for JesterError {
    fn from(msg: String) -> Self { Self::InvalidArguments(msg) }
}

impl From<&str> for JesterError {
    fn from(msg: &str) -> Self { Self::InvalidArguments(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_invalid_arguments_display() {
        let err = JesterError::InvalidArguments("unknown gesture 'x'".to_string());
        assert_eq!(err.to_string(), "unknown gesture 'x'");
    }

    #[test]
    fn test_from_io_error() {
        let err: JesterError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, JesterError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_config_error() {
        let err: JesterError = ConfigError::NotFound.into();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_from_asset_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: JesterError = AssetError::Parse { path: PathBuf::from("jokes.json"), source }.into();
        assert!(err.to_string().contains("jokes.json"));
    }

    #[test]
    fn test_from_actor_error() {
        let err: JesterError = ActorError::SendFailed.into();
        assert!(err.to_string().contains("channel closed"));
    }

    #[test]
    fn test_from_str() {
        let err: JesterError = "bad".into();
        assert!(matches!(err, JesterError::InvalidArguments(msg) if msg == "bad"));
    }
}
