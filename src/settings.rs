//! User settings lookup
//!
//! Reads the Claude settings JSON once and answers whether a guard is
//! enabled. A guard is enabled unless its entry says `"enabled": false`.

use serde_json::Value;
use std::path::Path;

use crate::error::{GuardError, Result};

/// Read-only view of the user settings file
#[derive(Debug, Clone, Default)]
pub struct Settings {
    root: Value,
}

impl Settings {
    /// Settings with no entries: every guard enabled
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self {
            root: serde_json::from_str(json)?,
        })
    }

    /// Load settings from a file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GuardError::io(path, e))?;
        Self::from_json(&content).map_err(|source| GuardError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, treating a missing or unreadable file as empty
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        path.filter(|p| p.exists())
            .and_then(|p| Self::load_from(p).ok())
            .unwrap_or_default()
    }

    /// Whether the guard stored under `key` is enabled
    pub fn is_enabled(&self, key: &str) -> bool {
        self.root
            .get(key)
            .and_then(|entry| entry.get("enabled"))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }
}
