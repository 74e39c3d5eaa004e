//! GitHub CLI write guard
//!
//! Blocks `gh` invocations that change state on GitHub: catalogue write
//! subcommands, and `gh api` calls that use a write method either
//! explicitly or implicitly through field flags.

use crate::config::GithubConfig;
use crate::engine::context::RuleContext;
use crate::engine::matchers;
use crate::engine::policy::{PolicySet, Rule};
use crate::error::Result;

/// `gh` subcommands that perform writes
pub const WRITE_COMMANDS: &[&str] = &[
    "gh repo create",
    "gh repo delete",
    "gh repo fork",
    "gh repo rename",
    "gh repo archive",
    "gh issue create",
    "gh issue edit",
    "gh issue close",
    "gh issue delete",
    "gh issue pin",
    "gh issue unpin",
    "gh issue transfer",
    "gh pr create",
    "gh pr edit",
    "gh pr close",
    "gh pr merge",
    "gh pr reopen",
    "gh pr ready",
    "gh pr comment",
    "gh pr review",
    "gh release create",
    "gh release delete",
    "gh release edit",
    "gh release upload",
    "gh run cancel",
    "gh run rerun",
    "gh workflow enable",
    "gh workflow disable",
    "gh workflow run",
    "gh gist create",
    "gh gist edit",
    "gh gist delete",
    "gh project create",
    "gh project edit",
    "gh project delete",
    "gh project item-add",
    "gh project item-edit",
    "gh project item-delete",
    "gh project field-create",
    "gh project field-delete",
];

/// HTTP methods that make a `gh api` call a write
pub const WRITE_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

/// Flags that add request fields, which makes `gh api` default to POST
const FIELD_FLAGS: &[&str] = &["-f", "-F", "--field", "--raw-field"];

/// `-fname=value` style: any token starting with these is a field flag
const FIELD_FLAG_PREFIXES: &[&str] = &["-f", "-F"];

const BLOCK_PREFIX: &str = "GitHub write blocked";

/// Whether the command runs the GitHub CLI at all
fn invokes_gh(ctx: &RuleContext<'_>) -> bool {
    ctx.command().starts_with("gh ")
}

fn is_gh_api(ctx: &RuleContext<'_>) -> bool {
    invokes_gh(ctx) && matches!(ctx.tokens.as_slice(), ["gh", "api", ..])
}

/// `gh api` with an explicit write method
pub struct ApiMethodRule {
    methods: Vec<String>,
}

impl Rule for ApiMethodRule {
    fn id(&self) -> &'static str {
        "gh-api-method"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        if !is_gh_api(ctx) {
            return Ok(None);
        }

        Ok(self
            .methods
            .iter()
            .find(|method| matchers::has_method(&ctx.tokens, method))
            .map(|method| format!("{}: gh api {}", BLOCK_PREFIX, method)))
    }
}

/// `gh api` with field flags and no explicit `GET`
pub struct ApiFieldRule;

impl Rule for ApiFieldRule {
    fn id(&self) -> &'static str {
        "gh-api-field"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        if !is_gh_api(ctx) {
            return Ok(None);
        }

        let has_fields = matchers::has_flag(&ctx.tokens, FIELD_FLAGS, FIELD_FLAG_PREFIXES);
        if has_fields && !matchers::has_exact_method(&ctx.tokens, "GET") {
            return Ok(Some(format!(
                "{}: gh api with -f/-F flags (defaults to POST)",
                BLOCK_PREFIX
            )));
        }

        Ok(None)
    }
}

/// A write subcommand from the catalogue
pub struct WriteCommandRule {
    commands: Vec<String>,
}

impl Rule for WriteCommandRule {
    fn id(&self) -> &'static str {
        "gh-write-command"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Option<String>> {
        if !invokes_gh(ctx) {
            return Ok(None);
        }

        Ok(matchers::matching_prefix(ctx.command(), &self.commands)
            .map(|prefix| format!("{}: {}", BLOCK_PREFIX, prefix)))
    }
}

/// Build the GitHub write guard
pub fn policy(config: &GithubConfig) -> PolicySet {
    PolicySet::new("github-write", "githubWriteGuard")
        .with_rule(ApiMethodRule {
            methods: config.write_methods.clone(),
        })
        .with_rule(ApiFieldRule)
        .with_rule(WriteCommandRule {
            commands: config.write_commands.clone(),
        })
}
