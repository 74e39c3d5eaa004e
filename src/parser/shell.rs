//! Textual shell segmentation
//!
//! Splits a command line into segments on `|`, `&&`, `||` and `;`, and each
//! segment into ASCII-whitespace tokens. This is not a shell parser: the
//! delimiters are found textually, so a quoted `"a|b"` still splits, and
//! subshells or `$(...)` are not descended into. Inputs are expected to be
//! simple command invocations.

/// One sub-command of a command line, delimited by shell control operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The raw text of this segment, untrimmed
    pub raw: &'a str,
    /// Whitespace-delimited tokens, in order
    pub tokens: Vec<&'a str>,
}

impl<'a> Segment<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            tokens: tokenize(raw),
        }
    }

    /// The first token: the word this segment runs as a command
    pub fn head(&self) -> Option<&'a str> {
        self.tokens.first().copied()
    }

    /// Tokens after the head
    pub fn args(&self) -> &[&'a str] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

/// Split a string into ASCII-whitespace tokens
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_ascii_whitespace().collect()
}

/// Split a command into segments
///
/// Segments with no tokens (e.g. between the two bars of `||` or after a
/// trailing `;`) are dropped. An empty command yields no segments.
pub fn segments(command: &str) -> Vec<Segment<'_>> {
    let bytes = command.as_bytes();
    let mut result = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let width = match bytes[i] {
            b'|' | b';' => 1,
            b'&' if bytes.get(i + 1) == Some(&b'&') => 2,
            _ => 0,
        };

        if width == 0 {
            i += 1;
            continue;
        }

        push_segment(&mut result, &command[start..i]);
        i += width;
        start = i;
    }
    push_segment(&mut result, &command[start..]);

    result
}

fn push_segment<'a>(segments: &mut Vec<Segment<'a>>, raw: &'a str) {
    let segment = Segment::new(raw);
    if !segment.tokens.is_empty() {
        segments.push(segment);
    }
}

/// Whether `word` is used as a command, i.e. heads some segment
///
/// `grep foo` uses grep as a command; `echo grep` does not.
pub fn has_command_word(segments: &[Segment<'_>], word: &str) -> bool {
    segments.iter().any(|s| s.head() == Some(word))
}
