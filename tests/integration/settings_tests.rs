//! Integration tests for configuration and per-guard switches

use std::fs;

use hook_guards::engine::context::ToolLocator;
use hook_guards::{Config, GuardEngine, GuardKind, Request, Settings};
use tempfile::TempDir;

struct AllTools;

impl ToolLocator for AllTools {
    fn is_installed(&self, _name: &str) -> bool {
        true
    }
}

fn engine_with(config: Config, settings: &Settings) -> GuardEngine {
    let mut engine = GuardEngine::new(config, settings, &GuardKind::ALL).with_locator(AllTools);
    engine.set_disabled(false);
    engine
}

fn blocks(engine: &GuardEngine, command: &str) -> bool {
    engine.check(&Request::bash(command)).is_block()
}

#[test]
fn test_settings_file_disables_single_guard() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "nativeTimeoutEnforcer": {"enabled": false},
            "modernCliEnforcer": {"enabled": true}
        }"#,
    )
    .unwrap();

    let settings = Settings::load_or_empty(Some(&path));
    let engine = engine_with(Config::default(), &settings);

    assert!(!blocks(&engine, "timeout 5 make"));
    assert!(blocks(&engine, "grep foo"));
    assert!(blocks(&engine, "gh pr merge 1"));
}

#[test]
fn test_unreadable_settings_keep_guards_enabled() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ this is not json").unwrap();

    let settings = Settings::load_or_empty(Some(&path));
    let engine = engine_with(Config::default(), &settings);
    assert!(blocks(&engine, "timeout 5 make"));

    let missing = Settings::load_or_empty(Some(&dir.path().join("absent.json")));
    let engine = engine_with(Config::default(), &missing);
    assert!(blocks(&engine, "timeout 5 make"));
}

#[test]
fn test_custom_config_tables() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[github]
write_commands = ["gh label create"]
write_methods = ["DELETE"]

[modern_cli]
replacements = [{ legacy = "du", modern = "dust" }]

[timeout]
wrappers = ["timeout"]
default_seconds = 9
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let engine = engine_with(config, &Settings::empty());

    assert!(blocks(&engine, "gh label create bug"));
    assert!(!blocks(&engine, "gh pr merge 1"));
    assert!(!blocks(&engine, "gh api -X POST repos/o/r/issues"));
    assert!(blocks(&engine, "gh api -X DELETE repos/o/r"));

    assert!(blocks(&engine, "du -sh ."));
    assert!(!blocks(&engine, "grep foo"));

    assert!(!blocks(&engine, "gtimeout 5 make"));
    let decision = engine.check(&Request::bash("timeout make"));
    assert!(decision.reason().unwrap().contains("timeout=9000"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[timeout]\ndefault_seconds = \"soon\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
    assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
}
