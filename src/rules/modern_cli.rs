//! Modern CLI guard
//!
//! Steers legacy tools to their modern replacements, but only when the
//! replacement is actually installed.

use crate::config::{ModernCliConfig, Replacement};
use crate::engine::context::RuleContext;
use crate::engine::policy::{PolicySet, Rule};
use crate::error::Result;
use crate::parser;

/// Built-in `(legacy, modern)` pairs, checked in this order
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    ("grep", "rg"),
    ("find", "fd"),
    ("cat", "bat"),
    ("ls", "eza"),
];

/// A legacy tool used as a command while its replacement is installed
///
/// Every firing pair is reported in one reason.
pub struct LegacyToolRule {
    replacements: Vec<Replacement>,
}

impl Rule for LegacyToolRule {
    fn id(&self) -> &'static str {
        "legacy-cli"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        let suggestions: Vec<String> = self
            .replacements
            .iter()
            .filter(|r| {
                ctx.is_installed(&r.modern) && parser::has_command_word(&ctx.segments, &r.legacy)
            })
            .map(|r| format!("USE '{}' instead '{}'", r.modern, r.legacy))
            .collect();

        if suggestions.is_empty() {
            return Ok(None);
        }

        Ok(Some(format!("Legacy CLI blocked.\n{}", suggestions.join("\n"))))
    }
}

/// Build the modern CLI guard
pub fn policy(config: &ModernCliConfig) -> PolicySet {
    PolicySet::new("modern-cli", "modernCliEnforcer").with_rule(LegacyToolRule {
        replacements: config.replacements.clone(),
    })
}
