//! Input parsing for Claude Code hook JSON format
//!
//! Parses the JSON input from stdin that Claude Code sends to hooks and turns
//! it into a [`Request`], the immutable value every guard evaluates.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;

/// Main input structure from Claude Code hooks
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash")
    #[serde(default)]
    pub tool_name: Option<String>,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: ToolInput,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Tool-specific input variants
#[derive(Debug, Clone, Default)]
pub enum ToolInput {
    /// Bash command execution
    Bash { command: String },

    /// Any other tool, or a Bash call without a usable command
    #[default]
    Other,
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        let Some(obj) = value.as_object() else {
            return Ok(ToolInput::Other);
        };

        match obj.get("command").and_then(|v| v.as_str()) {
            Some(command) => Ok(ToolInput::Bash {
                command: command.to_string(),
            }),
            None => Ok(ToolInput::Other),
        }
    }
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The proposed shell command, if this is a command-carrying call
    pub fn command(&self) -> Option<&str> {
        match &self.tool_input {
            ToolInput::Bash { command } => Some(command),
            ToolInput::Other => None,
        }
    }
}

/// One proposed tool call, as seen by the guards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub tool_name: String,
    pub command: String,
    /// Project root used for package-manager detection
    pub project_dir: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Request {
    /// Build a request for a Bash command
    pub fn bash(command: impl Into<String>) -> Self {
        Self {
            tool_name: "Bash".to_string(),
            command: command.into(),
            project_dir: None,
            session_id: None,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// Build a request from hook input
    ///
    /// Returns `None` when the input carries no tool name or no command;
    /// such calls are never blocked.
    pub fn from_hook_input(input: HookInput, project_dir: Option<PathBuf>) -> Option<Self> {
        let tool_name = input.tool_name?;
        match input.tool_input {
            ToolInput::Bash { command } => Some(Self {
                tool_name,
                command,
                project_dir,
                session_id: input.session_id,
            }),
            ToolInput::Other => None,
        }
    }

    /// Whether this request is a Bash tool call
    pub fn is_bash(&self) -> bool {
        self.tool_name == "Bash"
    }

    /// Get a summary of the request for logging
    pub fn summary(&self) -> String {
        let truncated: String = self.command.chars().take(100).collect();
        if truncated.len() < self.command.len() {
            format!("{}: {}...", self.tool_name, truncated)
        } else {
            format!("{}: {}", self.tool_name, truncated)
        }
    }
}
