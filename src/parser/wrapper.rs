//! Timeout wrapper detection and unwrapping
//!
//! Handles `timeout`/`gtimeout` invocations: finds the duration argument and
//! the wrapped command so a guard can suggest the equivalent tool-call form.

use std::fmt;

/// Default wrapper names that impose a time limit on their command
pub const DEFAULT_TIMEOUT_WRAPPERS: &[&str] = &["timeout", "gtimeout"];

/// Duration used when a wrapper invocation carries no recognizable duration
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

/// Unit suffix on a duration argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Plain digits, treated as seconds
    Unspecified,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn from_suffix(c: char) -> Option<Self> {
        match c {
            's' => Some(TimeUnit::Seconds),
            'm' => Some(TimeUnit::Minutes),
            'h' => Some(TimeUnit::Hours),
            'd' => Some(TimeUnit::Days),
            _ => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Unspecified => "",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }

    /// Milliseconds per one of this unit
    pub fn millis(self) -> u64 {
        match self {
            TimeUnit::Unspecified | TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60_000,
            TimeUnit::Hours => 3_600_000,
            TimeUnit::Days => 86_400_000,
        }
    }
}

/// A duration argument such as `30s`, `2m` or `10`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSpec {
    pub value: u64,
    pub unit: TimeUnit,
}

impl DurationSpec {
    /// Parse a token as a duration
    ///
    /// Accepts a non-empty run of ASCII digits, optionally followed by exactly
    /// one of `s`, `m`, `h`, `d`. Anything else (fractions, signs, flags,
    /// values that overflow `u64`) is not a duration.
    pub fn parse(token: &str) -> Option<Self> {
        let (digits, unit) = match token.chars().last() {
            Some(c) if c.is_ascii_digit() => (token, TimeUnit::Unspecified),
            Some(c) => (&token[..token.len() - c.len_utf8()], TimeUnit::from_suffix(c)?),
            None => return None,
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let value = digits.parse().ok()?;
        Some(Self { value, unit })
    }

    /// Default duration used when none is given
    pub fn default_seconds(seconds: u64) -> Self {
        Self {
            value: seconds,
            unit: TimeUnit::Unspecified,
        }
    }

    /// The duration normalized to milliseconds (saturating)
    pub fn as_millis(&self) -> u64 {
        self.value.saturating_mul(self.unit.millis())
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// A parsed `timeout <duration> <command...>` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutInvocation {
    /// The wrapper used (`timeout` or `gtimeout`)
    pub wrapper: String,
    pub duration: DurationSpec,
    /// The wrapped command, tokens re-joined with single spaces
    pub command: String,
}

/// Unwrap a timeout wrapper invocation
///
/// Returns `None` unless the first token is one of `wrappers`. The first
/// token that parses as a duration is taken as the duration, skipping `--`
/// flags and any other token before it; everything after it is the wrapped
/// command. With no duration, `default_seconds` applies and every token after
/// the wrapper is the wrapped command.
pub fn unwrap_timeout(
    tokens: &[&str],
    wrappers: &[String],
    default_seconds: u64,
) -> Option<TimeoutInvocation> {
    let (&wrapper, rest) = tokens.split_first()?;
    if !wrappers.iter().any(|w| w == wrapper) {
        return None;
    }

    let mut duration = DurationSpec::default_seconds(default_seconds);
    let mut command_start = 0;

    for (idx, token) in rest.iter().enumerate() {
        if token.starts_with("--") {
            continue;
        }
        if let Some(parsed) = DurationSpec::parse(token) {
            duration = parsed;
            command_start = idx + 1;
            break;
        }
    }

    Some(TimeoutInvocation {
        wrapper: wrapper.to_string(),
        duration,
        command: rest[command_start..].join(" "),
    })
}
