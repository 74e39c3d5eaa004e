//! Integration tests for hook-guards

#[cfg(unix)]
mod cli_tests;
mod guard_tests;
mod settings_tests;
