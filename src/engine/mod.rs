//! Guard engine for hook-guards
//!
//! Runs the selected guards over one request.

pub mod context;
pub mod matchers;
pub mod policy;

use std::env;

use crate::config::Config;
use crate::input::Request;
use crate::output::Decision;
use crate::rules::GuardKind;
use crate::settings::Settings;

use context::{PathLocator, RuleContext, ToolLocator};
use policy::PolicySet;

/// Environment variable that turns every guard off
pub const DISABLE_ENV: &str = "HOOK_GUARDS_DISABLED";

/// The main guard engine
pub struct GuardEngine {
    config: Config,
    policies: Vec<PolicySet>,
    locator: Box<dyn ToolLocator>,
    disabled: bool,
}

impl GuardEngine {
    /// Create an engine running `guards`, in catalogue order
    ///
    /// A guard whose settings entry has `enabled: false` is kept but
    /// always allows.
    pub fn new(config: Config, settings: &Settings, guards: &[GuardKind]) -> Self {
        let policies = GuardKind::ALL
            .into_iter()
            .filter(|kind| guards.contains(kind))
            .map(|kind| {
                let mut policy = kind.policy(&config);
                policy.set_enabled(settings.is_enabled(kind.settings_key()));
                policy
            })
            .collect();

        Self {
            config,
            policies,
            locator: Box::new(PathLocator),
            disabled: env::var_os(DISABLE_ENV).is_some(),
        }
    }

    /// Create an engine with every guard and no user settings
    pub fn with_defaults(config: Config) -> Self {
        Self::new(config, &Settings::empty(), &GuardKind::ALL)
    }

    /// Replace the tool locator
    pub fn with_locator(mut self, locator: impl ToolLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Check if the guards are disabled via environment
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Check a request and return a decision
    ///
    /// The first blocking guard decides. A guard that fails counts as
    /// allowing, so a fault never blocks a command.
    pub fn check(&self, request: &Request) -> Decision {
        if self.disabled || !request.is_bash() || request.command.trim().is_empty() {
            return Decision::Allow;
        }

        let ctx = RuleContext::new(request, self.locator.as_ref());

        self.policies
            .iter()
            .filter_map(|policy| policy.evaluate(&ctx).ok())
            .find(Decision::is_block)
            .unwrap_or(Decision::Allow)
    }

    /// The guards this engine runs, in evaluation order
    pub fn policies(&self) -> &[PolicySet] {
        &self.policies
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
