//! hook-guards - Pre-execution command guards for Claude Code
//!
//! Reads one PreToolUse hook request from stdin. Allowed commands produce
//! no output and exit 0; blocked commands print the reason to stderr and
//! exit 2.
//!
//! # Usage
//!
//! ```bash
//! # Run every guard
//! echo '{"tool_name":"Bash","tool_input":{"command":"gh pr merge 1"}}' | hook-guards
//!
//! # Run selected guards only
//! hook-guards native-timeout python-manager
//! ```

use std::env;
use std::io::{self, Read};
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use hook_guards::{
    audit::AuditLogger,
    error::{GuardError, Result},
    output::{self, OutputFormat},
    Config, Decision, GuardEngine, GuardKind, HookInput, Request, Settings,
};

/// Print version information
fn print_version() {
    println!("hook-guards {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"hook-guards - Pre-execution command guards for Claude Code

USAGE:
    hook-guards [OPTIONS] [GUARD...]

GUARDS:
    github-write            Block GitHub CLI writes
    modern-cli              Prefer rg/fd/bat/eza over grep/find/cat/ls
    native-timeout          Use the Bash timeout parameter instead of timeout(1)
    python-manager          Run python through the project's package manager
    all                     Every guard (default)

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to config file
        --json              Print a JSON hook response instead of exiting 2
        --list              List guards and their settings keys

ENVIRONMENT:
    HOOK_GUARDS_DISABLED=1  Disable all guards
    CLAUDE_PROJECT_DIR      Project root for package-manager detection

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash",
          "hooks": [{{ "type": "command", "command": "hook-guards" }}]
        }}]
      }}
    }}

    Turn a single guard off with e.g. {{"githubWriteGuard": {{"enabled": false}}}}
"#
    );
}

fn print_guards() {
    for kind in GuardKind::ALL {
        println!("{:<16}{}", kind.name(), kind.settings_key());
    }
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    list: bool,
    json: bool,
    config_path: Option<String>,
    guards: Vec<GuardKind>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            list: false,
            json: false,
            config_path: None,
            guards: Vec::new(),
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "--list" => result.list = true,
                "--json" => result.json = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--config=") => {
                    let path = arg.trim_start_matches("--config=");
                    result.config_path = Some(path.to_string());
                }
                "all" => result.guards.extend(GuardKind::ALL),
                name => {
                    if let Some(kind) = GuardKind::from_name(name) {
                        result.guards.push(kind);
                    }
                }
            }
            i += 1;
        }

        if result.guards.is_empty() {
            result.guards = GuardKind::ALL.to_vec();
        }

        result
    }

    fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::ExitCode
        }
    }
}

/// Evaluate the request on stdin
fn run(args: &Args) -> Result<Decision> {
    let mut input_json = String::new();
    io::stdin()
        .read_to_string(&mut input_json)
        .map_err(GuardError::Stdin)?;

    // No input = nothing to check
    if input_json.trim().is_empty() {
        return Ok(Decision::Allow);
    }

    let input = HookInput::from_json(&input_json)?;

    let config = match args.config_path {
        Some(ref path) => Config::load_from(Path::new(path)).unwrap_or_default(),
        None => Config::load(),
    };
    let settings = Settings::load_or_empty(config.settings_path().as_deref());

    let project_dir = env::var_os("CLAUDE_PROJECT_DIR")
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok());

    let Some(request) = Request::from_hook_input(input, project_dir) else {
        return Ok(Decision::Allow);
    };

    let engine = GuardEngine::new(config.clone(), &settings, &args.guards);
    let decision = engine.check(&request);

    if config.general.audit_log {
        let mut logger = AuditLogger::new(config.audit_path().as_deref());
        let _ = logger.log_decision(&request, &decision, engine.is_disabled());
    }

    Ok(decision)
}

fn main() -> ExitCode {
    // A fault anywhere must read as "allow", with nothing on stderr
    panic::set_hook(Box::new(|_| {}));

    let args = Args::parse();

    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    if args.list {
        print_guards();
        return ExitCode::SUCCESS;
    }

    let decision = panic::catch_unwind(|| run(&args))
        .ok()
        .and_then(|result| result.ok())
        .unwrap_or(Decision::Allow);

    ExitCode::from(output::emit_to_stdio(&decision, args.format()))
}
