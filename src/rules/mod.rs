//! Guard catalogue for hook-guards
//!
//! Each guard is one policy set; this module names them and builds them
//! from configuration.

pub mod github;
pub mod modern_cli;
pub mod python_manager;
pub mod timeout;

use crate::config::Config;
use crate::engine::policy::PolicySet;

/// The available guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardKind {
    GithubWrite,
    ModernCli,
    NativeTimeout,
    PythonManager,
}

impl GuardKind {
    /// Every guard, in evaluation order
    pub const ALL: [GuardKind; 4] = [
        GuardKind::GithubWrite,
        GuardKind::ModernCli,
        GuardKind::NativeTimeout,
        GuardKind::PythonManager,
    ];

    /// Command-line name
    pub fn name(self) -> &'static str {
        match self {
            GuardKind::GithubWrite => "github-write",
            GuardKind::ModernCli => "modern-cli",
            GuardKind::NativeTimeout => "native-timeout",
            GuardKind::PythonManager => "python-manager",
        }
    }

    /// Key of the guard's entry in the user settings file
    pub fn settings_key(self) -> &'static str {
        match self {
            GuardKind::GithubWrite => "githubWriteGuard",
            GuardKind::ModernCli => "modernCliEnforcer",
            GuardKind::NativeTimeout => "nativeTimeoutEnforcer",
            GuardKind::PythonManager => "pythonManagerEnforcer",
        }
    }

    /// Parse a command-line name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Build the guard's policy set
    pub fn policy(self, config: &Config) -> PolicySet {
        match self {
            GuardKind::GithubWrite => github::policy(&config.github),
            GuardKind::ModernCli => modern_cli::policy(&config.modern_cli),
            GuardKind::NativeTimeout => timeout::policy(&config.timeout),
            GuardKind::PythonManager => python_manager::policy(),
        }
    }
}
