//! hook-guards - Pre-execution command guards for Claude Code
//!
//! A fast hook that inspects a proposed Bash command before it runs and
//! either lets it through silently or blocks it with a reason.
//!
//! # Features
//!
//! - **GitHub write guard**: Blocks `gh` subcommands and `gh api` calls that write
//! - **Modern CLI guard**: Steers `grep`/`find`/`cat`/`ls` to installed replacements
//! - **Native timeout guard**: Replaces `timeout` wrappers with the Bash timeout parameter
//! - **Python manager guard**: Routes `python` through the project's package manager
//! - **Per-guard switches**: `<guard>.enabled` in the user settings file
//! - **Audit logging**: Optional JSONL log of all decisions
//!
//! # Example
//!
//! ```
//! use hook_guards::{Config, GuardEngine, HookInput, Request};
//!
//! let engine = GuardEngine::with_defaults(Config::default());
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"gh pr merge 123"}}"#;
//! let hook_input = HookInput::from_json(input).unwrap();
//! let request = Request::from_hook_input(hook_input, None).unwrap();
//!
//! let decision = engine.check(&request);
//! assert_eq!(decision.rule_id(), Some("gh-write-command"));
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod rules;
pub mod settings;

// Re-exports for convenience
pub use config::Config;
pub use engine::GuardEngine;
pub use error::{GuardError, Result};
pub use input::{HookInput, Request, ToolInput};
pub use output::{Decision, HookOutput, OutputFormat};
pub use rules::GuardKind;
pub use settings::Settings;
