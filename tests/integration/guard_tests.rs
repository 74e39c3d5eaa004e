//! Integration tests for the guards, driven through hook JSON

use std::fs;
use std::path::Path;

use hook_guards::engine::context::ToolLocator;
use hook_guards::{Config, Decision, GuardEngine, HookInput, Request};
use tempfile::TempDir;

/// Every modern replacement is installed
struct AllTools;

impl ToolLocator for AllTools {
    fn is_installed(&self, _name: &str) -> bool {
        true
    }
}

fn engine() -> GuardEngine {
    let mut engine = GuardEngine::with_defaults(Config::default()).with_locator(AllTools);
    engine.set_disabled(false);
    engine
}

fn hook_json(command: &str) -> String {
    serde_json::json!({
        "tool_name": "Bash",
        "tool_input": { "command": command },
        "hook_event_name": "PreToolUse",
    })
    .to_string()
}

fn check_in(command: &str, project_dir: Option<&Path>) -> Decision {
    let input = HookInput::from_json(&hook_json(command)).unwrap();
    let request = Request::from_hook_input(input, project_dir.map(Path::to_path_buf)).unwrap();
    engine().check(&request)
}

fn check(command: &str) -> Decision {
    check_in(command, None)
}

// ============================================================================
// GitHub write guard
// ============================================================================

#[test]
fn test_gh_write_blocked_read_allowed() {
    let decision = check("gh pr merge 123");
    assert_eq!(decision.guard(), Some("github-write"));
    assert_eq!(
        decision.message().as_deref(),
        Some("❌ GitHub write blocked: gh pr merge")
    );

    assert!(check("gh pr list").is_allow());
    assert!(check("gh issue view 7 --comments").is_allow());
}

#[test]
fn test_gh_api_inference() {
    assert!(check("gh api repos/o/r/pulls").is_allow());
    assert_eq!(
        check("gh api repos/o/r/labels -f name=bug").rule_id(),
        Some("gh-api-field")
    );
    assert!(check("gh api search/code -f q=foo -X GET").is_allow());
    assert_eq!(
        check("gh api -X DELETE repos/o/r/labels/bug").reason(),
        Some("GitHub write blocked: gh api DELETE")
    );
}

// ============================================================================
// Modern CLI guard
// ============================================================================

#[test]
fn test_legacy_tool_as_command_vs_argument() {
    assert!(check("echo grep").is_allow());
    assert_eq!(check("grep foo").rule_id(), Some("legacy-cli"));
    assert_eq!(
        check("find . -name '*.rs'").reason(),
        Some("Legacy CLI blocked.\nUSE 'fd' instead 'find'")
    );
}

// ============================================================================
// Native timeout guard
// ============================================================================

#[test]
fn test_timeout_durations() {
    let cases = [
        ("timeout 30s sleep 100", "sleep 100", 30_000),
        ("timeout 2m make", "make", 120_000),
        ("timeout 7 make", "make", 7_000),
        ("timeout 1h make", "make", 3_600_000),
        ("timeout make", "make", 5_000),
    ];

    for (command, wrapped, millis) in cases {
        let decision = check(command);
        assert_eq!(decision.rule_id(), Some("direct-timeout"), "{}", command);
        let expected = format!("Bash(command=\"{}\", timeout={})", wrapped, millis);
        assert!(
            decision.reason().unwrap().contains(&expected),
            "{} -> {:?}",
            command,
            decision.reason()
        );
    }
}

#[test]
fn test_chained_timeout() {
    assert_eq!(
        check("npm ci && timeout 60 npm test").rule_id(),
        Some("chained-timeout")
    );
    assert!(check("echo done && sleep 1").is_allow());
}

// ============================================================================
// Python manager guard
// ============================================================================

fn project_with(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn test_python_routed_through_manager() {
    let dir = project_with(&[("uv.lock", "")]);
    let decision = check_in("python3 -m pytest -q", Some(dir.path()));
    assert_eq!(
        decision.reason(),
        Some("Direct python blocked. Project uses uv: uv run python3 -m pytest -q")
    );
}

#[test]
fn test_resolver_priority_through_guard() {
    let dir = project_with(&[
        ("uv.lock", ""),
        ("pyproject.toml", "[tool.pdm]\nversion = \"1\"\n"),
    ]);
    let decision = check_in("python app.py", Some(dir.path()));
    assert_eq!(
        decision.reason(),
        Some("Direct python blocked. Project uses pdm: pdm run python app.py")
    );
}

#[test]
fn test_conda_suggestion_keeps_placeholder() {
    let dir = project_with(&[("environment.yml", "name: x\n")]);
    let decision = check_in("python train.py", Some(dir.path()));
    assert_eq!(
        decision.reason(),
        Some("Direct python blocked. Project uses conda: conda run -n <env_name> python train.py")
    );
}

#[test]
fn test_bootstrap_exemption() {
    let dir = project_with(&[("poetry.lock", "")]);
    assert!(check_in("python -m uv pip install x", Some(dir.path())).is_allow());
    assert!(check_in("python -m poetry install", Some(dir.path())).is_allow());
}

#[test]
fn test_unmanaged_or_missing_project_allows() {
    let dir = TempDir::new().unwrap();
    assert!(check_in("python app.py", Some(dir.path())).is_allow());
    assert!(check_in("python app.py", Some(&dir.path().join("missing"))).is_allow());
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_non_bash_and_empty_requests_allow() {
    let json = r#"{"tool_name":"Read","tool_input":{"file_path":"/etc/passwd"}}"#;
    let input = HookInput::from_json(json).unwrap();
    assert!(Request::from_hook_input(input, None).is_none());

    let json = r#"{"tool_name":"Bash","tool_input":{}}"#;
    let input = HookInput::from_json(json).unwrap();
    assert!(Request::from_hook_input(input, None).is_none());

    assert!(check("").is_allow());
}

#[test]
fn test_malformed_input_is_an_error() {
    assert!(HookInput::from_json("{not json").is_err());
    assert!(HookInput::from_json("42").is_err());
}

#[test]
fn test_evaluation_is_idempotent() {
    let dir = project_with(&[("poetry.lock", "")]);
    for command in [
        "gh pr merge 1",
        "ls -la",
        "timeout 5 make",
        "python x.py",
        "cargo build",
    ] {
        let first = check_in(command, Some(dir.path()));
        let second = check_in(command, Some(dir.path()));
        assert_eq!(first, second, "{}", command);
    }
}

#[test]
fn test_guard_order_decides_overlaps() {
    // gh write and legacy tool in one command: github-write runs first
    assert_eq!(check("gh pr close 1 | cat").guard(), Some("github-write"));
    // legacy tool and chained timeout: modern-cli runs before native-timeout
    assert_eq!(check("ls && timeout 5 make").guard(), Some("modern-cli"));
}
