//! Python package-manager guard
//!
//! When a project is managed by poetry, uv, pdm and friends, a bare
//! `python ...` runs outside the managed environment. Such calls are
//! blocked with the wrapped equivalent. Invocations that bootstrap a
//! manager through `python -m <manager>` are always allowed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::context::RuleContext;
use crate::engine::policy::{PolicySet, Rule, Severity};
use crate::error::Result;
use crate::resolver::PackageManager;

static BOOTSTRAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^python3?\s+-m\s+(poetry|uv|pdm|hatch|rye|pixi|pip|conda|mamba)")
        .expect("bootstrap pattern is valid")
});

static DIRECT_PYTHON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(python3?)(\s.*)$").expect("python pattern is valid"));

/// Whether the command runs a package manager through `python -m`
pub fn is_bootstrapping_command(command: &str) -> bool {
    BOOTSTRAP.is_match(command.trim())
}

/// The same command routed through the manager's run prefix
///
/// `None` when the command is not a direct `python`/`python3` call.
pub fn suggest_replacement(command: &str, manager: PackageManager) -> Option<String> {
    let caps = DIRECT_PYTHON.captures(command.trim())?;
    let python = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str().trim();

    Some(format!("{} {} {}", manager.run_command(), python, rest))
}

/// Exemption for `python -m <manager>` bootstrapping
pub struct BootstrapRule;

impl Rule for BootstrapRule {
    fn id(&self) -> &'static str {
        "python-bootstrap"
    }

    fn severity(&self) -> Severity {
        Severity::Allow
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        Ok(is_bootstrapping_command(ctx.command())
            .then(|| "package manager bootstrapping".to_string()))
    }
}

/// Direct `python`/`python3` in a managed project
pub struct DirectPythonRule;

impl Rule for DirectPythonRule {
    fn id(&self) -> &'static str {
        "direct-python"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        if !DIRECT_PYTHON.is_match(ctx.command().trim()) {
            return Ok(None);
        }

        let Some(manager) = ctx.package_manager() else {
            return Ok(None);
        };

        Ok(suggest_replacement(ctx.command(), manager).map(|suggested| {
            format!(
                "Direct python blocked. Project uses {}: {}",
                manager, suggested
            )
        }))
    }
}

/// Build the python package-manager guard
pub fn policy() -> PolicySet {
    PolicySet::new("python-manager", "pythonManagerEnforcer")
        .with_rule(BootstrapRule)
        .with_rule(DirectPythonRule)
}
