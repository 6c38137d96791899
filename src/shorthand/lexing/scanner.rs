//! Line scanner
//!
//!     The scanner turns the lines of one scope into a stream of significant lines: blank lines
//!     and the three comment forms are dropped, and trailing comments are cut off.
//!
//!     Block comment:
//!         A line whose trimmed form starts with `#{` opens a block comment. Following lines are
//!         discarded verbatim until one whose trimmed form ends with `#}`. The opener line never
//!         closes the comment, even when it ends with `#}` itself.
//!
//!     Full-line comment:
//!         The trimmed line starts with `#`.
//!
//!     Inline comment:
//!         The line is cut at the first `#` that sits outside quotes and is either the first
//!         character or preceded by whitespace. `div#main` keeps its id, `p{a} # note` loses the
//!         note. A backslash escapes the next character, so `\#` never starts a comment.
//!
//!     The scanner is a cursor, not a pre-pass. Block bodies are taken raw from the cursor by the
//!     block expander, so comment syntax inside a `style` or `script` body is never touched by
//!     the enclosing scope.

use crate::shorthand::error::UnclosedCommentError;

const BLOCK_COMMENT_OPEN: &str = "#{";
const BLOCK_COMMENT_CLOSE: &str = "#}";

/// A significant line: comments stripped, whitespace trimmed, never empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    /// 1-based line number in the original source
    pub number: usize,
    pub text: &'a str,
}

/// Cursor over the lines of one scope
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    lines: &'a [&'a str],
    first_line: usize,
    cursor: usize,
}

impl<'a> Scanner<'a> {
    /// `first_line` is the 1-based source line number of `lines[0]`
    pub fn new(lines: &'a [&'a str], first_line: usize) -> Self {
        Self {
            lines,
            first_line,
            cursor: 0,
        }
    }

    /// Raw lines not consumed yet
    pub fn remaining(&self) -> &'a [&'a str] {
        &self.lines[self.cursor..]
    }

    /// Source line number of the next unconsumed line
    pub fn next_line_number(&self) -> usize {
        self.first_line + self.cursor
    }

    /// Consume `count` raw lines without scanning them
    pub fn advance(&mut self, count: usize) {
        self.cursor = (self.cursor + count).min(self.lines.len());
    }

    /// Consume everything left in the scope
    pub fn exhaust(&mut self) {
        self.cursor = self.lines.len();
    }

    fn skip_block_comment(&mut self, opened_at: usize) -> Result<(), UnclosedCommentError> {
        let closing = self
            .remaining()
            .iter()
            .position(|raw| raw.trim().ends_with(BLOCK_COMMENT_CLOSE));

        match closing {
            Some(offset) => {
                self.advance(offset + 1);
                Ok(())
            }
            None => {
                self.exhaust();
                Err(UnclosedCommentError { line: opened_at })
            }
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<ScannedLine<'a>, UnclosedCommentError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.lines.len() {
            let number = self.next_line_number();
            let trimmed = self.lines[self.cursor].trim();
            self.cursor += 1;

            if trimmed.starts_with(BLOCK_COMMENT_OPEN) {
                if let Err(err) = self.skip_block_comment(number) {
                    return Some(Err(err));
                }
                continue;
            }

            let text = strip_inline_comment(trimmed);
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            return Some(Ok(ScannedLine { number, text }));
        }
        None
    }
}

/// Cut a line at its first unquoted comment marker and trim the rest.
///
/// A `#` starts a comment only at the beginning of the line or right after whitespace.
pub fn strip_inline_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev: Option<char> = None;

    for (i, ch) in line.char_indices() {
        let before = prev;
        prev = Some(ch);

        if escaped {
            escaped = false;
            continue;
        }

        match (ch, quote) {
            ('\\', _) => escaped = true,
            ('"' | '\'', None) => quote = Some(ch),
            (c, Some(open)) if c == open => quote = None,
            ('#', None) if before.map_or(true, char::is_whitespace) => {
                return line[..i].trim();
            }
            _ => {}
        }
    }

    line.trim()
}
