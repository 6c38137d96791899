//! Lexing
//!
//!     Everything that works on raw characters lives here. The compiler reads its input one
//!     line at a time, and there are three character-level jobs:
//!
//!         1. Scanning: dropping blank lines and comments from a scope. See [scanner].
//!         2. Splitting: cutting a combinator line into sibling chains and nesting tokens,
//!            respecting quotes and braces. See [splitting].
//!         3. Tokenizing: breaking one element token into logos tokens for the element
//!            grammar. See [tokens].
//!
//!     The three share the same escape convention: a backslash makes the next character
//!     literal for the purpose of comment, quote and delimiter detection, and is itself kept
//!     in the text.

pub mod scanner;
pub mod splitting;
pub mod tokens;

pub use scanner::{strip_inline_comment, ScannedLine, Scanner};
pub use splitting::{split_combinators, split_top_level};
pub use tokens::{tokenize, ElementToken};

/// Split a scope into lines without their terminators.
///
/// Unlike `str::lines`, a trailing newline does not drop a final empty line from the count,
/// which keeps line numbers stable for sources edited in a live buffer.
pub fn source_lines(source: &str) -> Vec<&str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
