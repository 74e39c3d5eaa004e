//! Configuration loading for hook-guards
//!
//! Supports TOML configuration with embedded defaults. Every table the guards
//! use can be overridden; anything left out keeps its built-in value.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{GuardError, Result};
use crate::parser::wrapper::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_TIMEOUT_WRAPPERS};
use crate::rules::github::{WRITE_COMMANDS, WRITE_METHODS};
use crate::rules::modern_cli::DEFAULT_REPLACEMENTS;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,

    /// Path to the user settings JSON holding per-guard `enabled` flags
    pub settings_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: false,
            audit_path: Some("~/.claude/guards/audit.jsonl".to_string()),
            settings_path: Some("~/.claude/settings.json".to_string()),
        }
    }
}

/// GitHub CLI write guard tables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// Command prefixes that perform writes (e.g. "gh pr merge")
    pub write_commands: Vec<String>,

    /// HTTP methods that make `gh api` a write
    pub write_methods: Vec<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            write_commands: WRITE_COMMANDS.iter().map(|s| s.to_string()).collect(),
            write_methods: WRITE_METHODS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A legacy tool and the modern tool that should be used in its place
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
    pub legacy: String,
    pub modern: String,
}

/// Modern CLI guard tables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModernCliConfig {
    pub replacements: Vec<Replacement>,
}

impl Default for ModernCliConfig {
    fn default() -> Self {
        Self {
            replacements: DEFAULT_REPLACEMENTS
                .iter()
                .map(|(legacy, modern)| Replacement {
                    legacy: legacy.to_string(),
                    modern: modern.to_string(),
                })
                .collect(),
        }
    }
}

/// Native timeout guard settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Commands that wrap another command with a time limit
    pub wrappers: Vec<String>,

    /// Duration assumed when a wrapper has no duration argument
    pub default_seconds: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            wrappers: DEFAULT_TIMEOUT_WRAPPERS.iter().map(|s| s.to_string()).collect(),
            default_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub github: GithubConfig,
    pub modern_cli: ModernCliConfig,
    pub timeout: TimeoutConfig,
}

impl Config {
    /// Load configuration from the standard locations or use defaults
    ///
    /// A config that fails to read or parse is skipped silently; the guards
    /// must not write anything unless they block.
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".claude/guards/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/hook-guards/config.toml")),
        ];

        config_paths
            .into_iter()
            .flatten()
            .filter(|path| path.exists())
            .find_map(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GuardError::io(path, e))?;
        toml::from_str(&content).map_err(|source| GuardError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded)
    pub fn audit_path(&self) -> Option<PathBuf> {
        self.general.audit_path.as_deref().map(Self::expand_path)
    }

    /// Get the user settings path (expanded)
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.general.settings_path.as_deref().map(Self::expand_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = false
audit_path = "~/.claude/guards/audit.jsonl"
settings_path = "~/.claude/settings.json"

[github]
write_methods = ["POST", "PUT", "PATCH", "DELETE"]

[[modern_cli.replacements]]
legacy = "grep"
modern = "rg"

[[modern_cli.replacements]]
legacy = "find"
modern = "fd"

[[modern_cli.replacements]]
legacy = "cat"
modern = "bat"

[[modern_cli.replacements]]
legacy = "ls"
modern = "eza"

[timeout]
wrappers = ["timeout", "gtimeout"]
default_seconds = 5
"#;
