//! Native timeout guard
//!
//! The Bash tool takes a timeout parameter; wrapping the command in
//! `timeout` hides the limit from the caller. Direct wrapper use is blocked
//! with the equivalent tool call, wrapper use later in a chain is blocked
//! with a request to split the chain.

use crate::config::TimeoutConfig;
use crate::engine::context::RuleContext;
use crate::engine::policy::{PolicySet, Rule};
use crate::error::Result;
use crate::parser::wrapper;

/// The command starts with a timeout wrapper
pub struct DirectTimeoutRule {
    wrappers: Vec<String>,
    default_seconds: u64,
}

impl Rule for DirectTimeoutRule {
    fn id(&self) -> &'static str {
        "direct-timeout"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        // A bare `timeout` with nothing after it is left alone
        if ctx.tokens.len() < 2 {
            return Ok(None);
        }

        let Some(invocation) =
            wrapper::unwrap_timeout(&ctx.tokens, &self.wrappers, self.default_seconds)
        else {
            return Ok(None);
        };

        Ok(Some(format!(
            "Direct timeout blocked\nUse Bash timeout parameter: Bash(command=\"{}\", timeout={})\n",
            invocation.command,
            invocation.duration.as_millis()
        )))
    }
}

/// A timeout wrapper heads a later segment of a chain or pipeline
pub struct ChainedTimeoutRule {
    wrappers: Vec<String>,
}

impl Rule for ChainedTimeoutRule {
    fn id(&self) -> &'static str {
        "chained-timeout"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        let chained = ctx
            .segments
            .iter()
            .skip(1)
            .filter_map(|s| s.head())
            .any(|head| self.wrappers.iter().any(|w| w == head));

        if !chained {
            return Ok(None);
        }

        Ok(Some(
            "Timeout in command chain blocked\nSplit into separate Bash calls with timeout parameter\n"
                .to_string(),
        ))
    }
}

/// Build the native timeout guard
pub fn policy(config: &TimeoutConfig) -> PolicySet {
    PolicySet::new("native-timeout", "nativeTimeoutEnforcer")
        .with_rule(DirectTimeoutRule {
            wrappers: config.wrappers.clone(),
            default_seconds: config.default_seconds,
        })
        .with_rule(ChainedTimeoutRule {
            wrappers: config.wrappers.clone(),
        })
}
