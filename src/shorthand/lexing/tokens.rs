//! Element token definitions
//!
//! One element token such as `input[type="text"]#name.wide{Hello}*2` is broken into the tokens
//! below by the logos lexer before the element grammar runs over them. Bracketed attributes and
//! braced content are single tokens, so whatever they contain never reaches the grammar.
//! Whitespace outside of them is not a token at all: it makes tokenization fail, which the
//! grammar reports as invalid syntax.

use logos::Logos;
use std::ops::Range;

/// Tokens of a single element
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementToken {
    /// Tag names, ids, class names and repeat counts
    #[regex(r"[A-Za-z0-9_-]+", |lex| lex.slice().to_string())]
    Name(String),

    /// `[...]`, stored without the brackets
    #[regex(r"\[[^\]]+\]", |lex| strip_delimiters(lex.slice()))]
    Attributes(String),

    /// `{...}`, stored without the braces
    #[regex(r"\{[^}]*\}", |lex| strip_delimiters(lex.slice()))]
    Content(String),

    #[token("#")]
    Hash,

    #[token(".")]
    Dot,

    #[token("*")]
    Star,

    /// `\{`, the block open delimiter
    #[token("\\{")]
    OpenDelimiter,
}

fn strip_delimiters(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}

/// Tokenize one element token with byte spans
///
/// Returns `None` when some part of the input is not a valid token.
pub fn tokenize(source: &str) -> Option<Vec<(ElementToken, Range<usize>)>> {
    let mut lexer = ElementToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => return None,
        }
    }

    Some(tokens)
}
