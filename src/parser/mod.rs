//! Shell parsing utilities for hook-guards
//!
//! Provides textual segmentation, whitespace tokenization, and timeout
//! wrapper unwrapping.

pub mod shell;
pub mod wrapper;

pub use shell::{has_command_word, segments, tokenize, Segment};
pub use wrapper::{unwrap_timeout, DurationSpec, TimeUnit, TimeoutInvocation};
