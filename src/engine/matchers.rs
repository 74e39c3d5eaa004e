//! Matching primitives shared by the guard rules
//!
//! All matching is literal: exact token equality, literal prefixes, and
//! case folding only where a caller asks for it. There is no option-parsing
//! grammar here.

/// The first prefix the command starts with, compared case-sensitively
pub fn matching_prefix<'p>(command: &str, prefixes: &'p [String]) -> Option<&'p str> {
    prefixes
        .iter()
        .map(String::as_str)
        .find(|prefix| command.starts_with(prefix))
}

/// Whether any token equals one of `exact` or starts with one of `prefixes`
pub fn has_flag(tokens: &[&str], exact: &[&str], prefixes: &[&str]) -> bool {
    tokens
        .iter()
        .any(|t| exact.contains(t) || prefixes.iter().any(|p| t.starts_with(p)))
}

/// Values given to explicit method flags
///
/// Recognizes `-X <M>`, `-X<M>`, `--method <M>` and `--method=<M>`. Flag
/// names are compared case-insensitively.
pub fn method_values<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let mut values = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(&token) = iter.next() {
        if token.eq_ignore_ascii_case("-x") || token.eq_ignore_ascii_case("--method") {
            if let Some(&&value) = iter.peek() {
                values.push(value);
                iter.next();
            }
        } else if let Some(value) = strip_prefix_ignore_case(token, "--method=") {
            values.push(value);
        } else if let Some(value) = strip_prefix_ignore_case(token, "-x") {
            values.push(value);
        }
    }

    values
}

fn strip_prefix_ignore_case<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    let head = token.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&token[prefix.len()..])
    } else {
        None
    }
}

/// Whether an explicit method flag names `method`, ignoring case
pub fn has_method(tokens: &[&str], method: &str) -> bool {
    method_values(tokens)
        .iter()
        .any(|value| value.eq_ignore_ascii_case(method))
}

/// Whether the command spells out `method` exactly, case-sensitively
///
/// Only `-X <M>`, `--method <M>` and `--method=<M>` count.
pub fn has_exact_method(tokens: &[&str], method: &str) -> bool {
    let spelled = format!("--method={}", method);
    tokens.iter().enumerate().any(|(i, &token)| {
        token == spelled
            || ((token == "-X" || token == "--method") && tokens.get(i + 1) == Some(&method))
    })
}
