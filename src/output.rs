//! Decision values and their rendering at the hook boundary
//!
//! A block is reported either as text on stderr with exit code 2 (the
//! default protocol), or as the PreToolUse JSON response on stdout.
//! An allow produces no output at all.

use serde::Serialize;
use std::io::{self, Write};

/// Glyph every block message starts with
pub const BLOCK_GLYPH: &str = "❌";

/// Exit code for an allowed command
pub const EXIT_ALLOW: u8 = 0;

/// Exit code for a blocked command
pub const EXIT_BLOCK: u8 = 2;

/// Outcome of evaluating one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allow the command
    Allow,

    /// Block the command
    Block {
        /// Guard that produced the block
        guard: String,
        /// Rule within the guard
        rule_id: String,
        reason: String,
    },
}

impl Decision {
    /// Create a block decision
    pub fn block(
        guard: impl Into<String>,
        rule_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Decision::Block {
            guard: guard.into(),
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an allow decision
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Check if this is a block decision
    pub fn is_block(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }

    /// Get the rule ID if applicable
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Block { rule_id, .. } => Some(rule_id),
        }
    }

    /// Get the guard name if applicable
    pub fn guard(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Block { guard, .. } => Some(guard),
        }
    }

    /// Get the reason if applicable
    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::Block { reason, .. } => Some(reason),
        }
    }

    /// Exit code signalling this decision
    pub fn exit_code(&self) -> u8 {
        match self {
            Decision::Allow => EXIT_ALLOW,
            Decision::Block { .. } => EXIT_BLOCK,
        }
    }

    /// The stderr message for a block, glyph-prefixed
    pub fn message(&self) -> Option<String> {
        self.reason().map(|reason| format!("{} {}", BLOCK_GLYPH, reason))
    }
}

/// How decisions are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Reason on stderr, exit code 2 on block
    #[default]
    ExitCode,
    /// PreToolUse JSON on stdout, exit code 0
    Json,
}

/// Main output structure for the JSON format
#[derive(Debug, Serialize)]
pub struct HookOutput {
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: HookSpecificOutput,
}

/// Hook-specific output with permission decision
#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    #[serde(rename = "permissionDecisionReason")]
    pub permission_decision_reason: String,
}

impl HookOutput {
    /// JSON response for a decision; `None` for allow
    pub fn from_decision(decision: &Decision) -> Option<Self> {
        let message = decision.message()?;
        Some(HookOutput {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: message,
            },
        })
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Write a decision and return the exit code to use
///
/// Write failures are ignored: a broken pipe must not turn into a crash.
pub fn emit<O: Write, E: Write>(
    decision: &Decision,
    format: OutputFormat,
    stdout: &mut O,
    stderr: &mut E,
) -> u8 {
    match format {
        OutputFormat::ExitCode => {
            if let Some(message) = decision.message() {
                let _ = write!(stderr, "{}", message);
                let _ = stderr.flush();
            }
            decision.exit_code()
        }
        OutputFormat::Json => {
            if let Some(output) = HookOutput::from_decision(decision) {
                let _ = writeln!(stdout, "{}", output.to_json());
                let _ = stdout.flush();
            }
            EXIT_ALLOW
        }
    }
}

/// [`emit`] to the process's real stdout and stderr
pub fn emit_to_stdio(decision: &Decision, format: OutputFormat) -> u8 {
    emit(decision, format, &mut io::stdout().lock(), &mut io::stderr().lock())
}
