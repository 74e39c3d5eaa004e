//! Error type shared by every fallible path in hook-guards
//!
//! None of these errors ever reach the agent: the binary turns every
//! `Err` into an allow with no output.

use std::path::PathBuf;

/// Errors raised while reading input, configuration, or project context
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Hook input was not valid JSON or had the wrong shape
    #[error("malformed hook input: {0}")]
    Input(#[from] serde_json::Error),

    /// A file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file did not parse
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// User settings file did not parse
    #[error("invalid settings {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading the hook payload from stdin failed
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

impl GuardError {
    /// Wrap an I/O error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GuardError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GuardError>;
