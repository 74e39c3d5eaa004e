//! Rules and the policy sets that order them

use crate::engine::context::RuleContext;
use crate::error::Result;
use crate::output::Decision;

/// What a matching rule does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Allow and stop evaluating the policy set (an exemption)
    Allow,
    /// Block with the rule's reason
    Block,
}

/// A stateless predicate over a request
pub trait Rule {
    /// Stable identifier reported with a block
    fn id(&self) -> &'static str;

    fn severity(&self) -> Severity {
        Severity::Block
    }

    /// `Some(reason)` when the rule matches
    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>>;
}

/// The ordered rules of one guard
pub struct PolicySet {
    name: &'static str,
    settings_key: &'static str,
    enabled: bool,
    rules: Vec<Box<dyn Rule>>,
}

impl PolicySet {
    pub fn new(name: &'static str, settings_key: &'static str) -> Self {
        Self {
            name,
            settings_key,
            enabled: true,
            rules: Vec::new(),
        }
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn settings_key(&self) -> &'static str {
        self.settings_key
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Rule IDs in evaluation order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Apply the rules in order; the first match decides
    ///
    /// A disabled set always allows. Errors from a rule propagate so the
    /// caller can fail open for the whole set.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Decision> {
        if !self.enabled {
            return Ok(Decision::Allow);
        }

        for rule in &self.rules {
            if let Some(reason) = rule.evaluate(ctx)? {
                return Ok(match rule.severity() {
                    Severity::Allow => Decision::Allow,
                    Severity::Block => Decision::block(self.name, rule.id(), reason),
                });
            }
        }

        Ok(Decision::Allow)
    }
}

impl std::fmt::Debug for PolicySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicySet")
            .field("name", &self.name)
            .field("settings_key", &self.settings_key)
            .field("enabled", &self.enabled)
            .field("rules", &self.rule_ids())
            .finish()
    }
}
