//! Integration tests for the hook-guards binary

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_hook-guards");

/// An isolated HOME, project dir and PATH for one binary run
struct Sandbox {
    home: TempDir,
    project: TempDir,
    bin: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            project: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
        }
    }

    /// Put an executable of this name on the sandbox PATH
    fn install(&self, tool: &str) -> &Self {
        self.place(tool, 0o755)
    }

    fn place(&self, tool: &str, mode: u32) -> &Self {
        let path = self.bin.path().join(tool);
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        self
    }

    fn project_file(&self, name: &str, content: &str) -> &Self {
        fs::write(self.project.path().join(name), content).unwrap();
        self
    }

    fn write_settings(&self, json: &str) -> &Self {
        let dir = self.home.path().join(".claude");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.json"), json).unwrap();
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(BIN);
        cmd.args(args)
            .env("HOME", self.home.path())
            .env("CLAUDE_PROJECT_DIR", self.project.path())
            .env("PATH", self.bin.path())
            .env_remove("HOOK_GUARDS_DISABLED")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn run_raw(&self, args: &[&str], stdin: &str) -> Output {
        run_with_stdin(self.command(args), stdin)
    }

    fn run(&self, args: &[&str], command: &str) -> Output {
        self.run_raw(args, &hook_json(command))
    }
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd.spawn().unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn hook_json(command: &str) -> String {
    serde_json::json!({
        "tool_name": "Bash",
        "tool_input": { "command": command },
    })
    .to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_allowed(output: &Output) {
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(output));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

fn assert_blocked(output: &Output, reason: &str) {
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert_eq!(stderr(output), format!("❌ {}", reason));
}

#[test]
fn test_block_exits_two_with_reason() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[], "gh pr merge 123");
    assert_blocked(&output, "GitHub write blocked: gh pr merge");
}

#[test]
fn test_allow_is_silent() {
    let sandbox = Sandbox::new();
    assert_allowed(&sandbox.run(&[], "gh pr list"));
    assert_allowed(&sandbox.run(&[], "cargo build --release"));
}

#[test]
fn test_malformed_and_empty_input_allow() {
    let sandbox = Sandbox::new();
    assert_allowed(&sandbox.run_raw(&[], "{not json"));
    assert_allowed(&sandbox.run_raw(&[], ""));
    assert_allowed(&sandbox.run_raw(&[], "   \n"));
    assert_allowed(&sandbox.run_raw(&[], r#"{"tool_input":{"command":"gh pr merge 1"}}"#));
    assert_allowed(&sandbox.run_raw(
        &[],
        r#"{"tool_name":"Write","tool_input":{"file_path":"a","content":"gh pr merge 1"}}"#,
    ));
}

#[test]
fn test_modern_cli_depends_on_path() {
    let sandbox = Sandbox::new();
    assert_allowed(&sandbox.run(&[], "grep foo src"));

    sandbox.install("rg");
    assert_blocked(
        &sandbox.run(&[], "grep foo src"),
        "Legacy CLI blocked.\nUSE 'rg' instead 'grep'",
    );
}

#[test]
fn test_non_executable_file_is_not_installed() {
    let sandbox = Sandbox::new();
    sandbox.place("rg", 0o644).place("fd", 0o600);
    assert_allowed(&sandbox.run(&[], "grep foo src"));
    assert_allowed(&sandbox.run(&[], "find . -name x"));

    sandbox.place("rg", 0o755);
    assert_eq!(sandbox.run(&[], "grep foo src").status.code(), Some(2));
}

#[test]
fn test_timeout_reason_format() {
    let sandbox = Sandbox::new();
    assert_blocked(
        &sandbox.run(&[], "timeout 30s sleep 100"),
        "Direct timeout blocked\nUse Bash timeout parameter: Bash(command=\"sleep 100\", timeout=30000)\n",
    );
}

#[test]
fn test_python_uses_project_dir() {
    let sandbox = Sandbox::new();
    assert_allowed(&sandbox.run(&[], "python app.py"));

    sandbox.project_file("poetry.lock", "");
    assert_blocked(
        &sandbox.run(&[], "python app.py"),
        "Direct python blocked. Project uses poetry: poetry run python app.py",
    );
    assert_allowed(&sandbox.run(&[], "python -m pip install poetry"));
}

#[test]
fn test_guard_selection_arguments() {
    let sandbox = Sandbox::new();
    assert_allowed(&sandbox.run(&["native-timeout"], "gh pr merge 1"));
    assert_eq!(
        sandbox.run(&["native-timeout"], "timeout 5 make").status.code(),
        Some(2)
    );
    assert_eq!(
        sandbox.run(&["all"], "gh pr merge 1").status.code(),
        Some(2)
    );
}

#[test]
fn test_settings_disable_guard() {
    let sandbox = Sandbox::new();
    sandbox.write_settings(r#"{"githubWriteGuard": {"enabled": false}}"#);
    assert_allowed(&sandbox.run(&[], "gh pr merge 1"));
    assert_eq!(sandbox.run(&[], "timeout 5 make").status.code(), Some(2));
}

#[test]
fn test_disabled_env_allows_everything() {
    let sandbox = Sandbox::new();
    let mut cmd = sandbox.command(&[]);
    cmd.env("HOOK_GUARDS_DISABLED", "1");
    assert_allowed(&run_with_stdin(cmd, &hook_json("gh pr merge 1")));
}

#[test]
fn test_json_output_format() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--json"], "gh repo delete me/x");
    assert_eq!(output.status.code(), Some(0));

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let specific = &response["hookSpecificOutput"];
    assert_eq!(specific["permissionDecision"], "deny");
    assert_eq!(
        specific["permissionDecisionReason"],
        "❌ GitHub write blocked: gh repo delete"
    );

    let output = sandbox.run(&["--json"], "gh repo view");
    assert_allowed(&output);
}

#[test]
fn test_explicit_config_path() {
    let sandbox = Sandbox::new();
    let config = sandbox.home.path().join("custom.toml");
    fs::write(&config, "[github]\nwrite_commands = [\"gh label create\"]\n").unwrap();
    let config = config.to_str().unwrap();

    assert_allowed(&sandbox.run(&["--config", config], "gh pr merge 1"));
    assert_eq!(
        sandbox.run(&["--config", config], "gh label create x").status.code(),
        Some(2)
    );
}

#[test]
fn test_audit_log_written_when_enabled() {
    let sandbox = Sandbox::new();
    let log = sandbox.home.path().join("audit.jsonl");
    let config = sandbox.home.path().join("audit.toml");
    fs::write(
        &config,
        format!("[general]\naudit_log = true\naudit_path = {:?}\n", log.to_str().unwrap()),
    )
    .unwrap();

    sandbox.run(&["-c", config.to_str().unwrap()], "gh pr merge 1");
    sandbox.run(&["-c", config.to_str().unwrap()], "gh pr list");

    let content = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"BLOCKED\""));
    assert!(lines[0].contains("gh-write-command"));
    assert!(lines[1].contains("\"ALLOWED\""));
}

#[test]
fn test_info_flags() {
    let sandbox = Sandbox::new();

    let output = sandbox.run_raw(&["--version"], "");
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("hook-guards "));

    let output = sandbox.run_raw(&["--list"], "");
    let listing = String::from_utf8_lossy(&output.stdout);
    for key in [
        "githubWriteGuard",
        "modernCliEnforcer",
        "nativeTimeoutEnforcer",
        "pythonManagerEnforcer",
    ] {
        assert!(listing.contains(key));
    }

    let output = sandbox.run_raw(&["--help"], "");
    assert!(String::from_utf8_lossy(&output.stdout).contains("USAGE:"));
}
