//! Error types for storage, configuration and boot script rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned by a [`PreferenceStore`](crate::PreferenceStore).
///
/// The controller never surfaces these to callers: a failed read resolves to
/// the fallback mode and a failed write leaves the preference session-only.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or missing (private browsing, policy, no window).
    #[error("preference storage is unavailable")]
    Unavailable,
    /// Reading or writing the backing file failed.
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The backing file exists but is not a JSON object of strings.
    #[error("preference file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The host rejected the operation (quota exceeded, security error).
    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// Error returned when loading or validating a [`ThemeConfig`](crate::ThemeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read theme config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid theme config: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A key or class name is empty or contains whitespace.
    #[error("theme config field '{field}' must be a non-empty token without whitespace")]
    InvalidName { field: &'static str },
    /// The light class and the changing class must be distinct.
    #[error("light class and changing class are both '{0}'")]
    ClassCollision(String),
}

/// Error returned when rendering the pre-paint boot script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to render boot script: {0}")]
    Render(#[from] minijinja::Error),
    #[error("failed to encode boot script literal: {0}")]
    Encode(#[from] serde_json::Error),
}
