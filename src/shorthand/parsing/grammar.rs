//! Element grammar
//!
//! Grammar:
//!
//! ```text
//! <element>      = <head> <content>? <repeat>?
//! <block-opener> = <head> "\{"
//! <head>         = <name> <attributes>? <qualifier>*
//! <qualifier>    = "#" <name> | "." <name>
//! <attributes>   = "[" <anything but "]">+ "]"
//! <content>      = "{" <anything but "}">* "}"
//! <repeat>       = "*" <digits>
//! ```
//!
//! Ids and classes may come in any order after the attributes, with at most one id. The
//! grammar runs over the logos tokens of [tokens](crate::shorthand::lexing::tokens), so
//! brackets and braces are already single tokens when the combinators see them.

use crate::shorthand::ast::ElementDescriptor;
use crate::shorthand::error::GrammarError;
use crate::shorthand::lexing::tokens::{tokenize, ElementToken};
use chumsky::{prelude::*, Stream};
use std::ops::Range;

/// Type alias for parser error
type ParserError = Simple<ElementToken>;

/// Open delimiter of a block, as it appears at the end of the opener line
pub const BLOCK_OPEN: &str = "\\{";
/// Close delimiter of a block, alone on its line
pub const BLOCK_CLOSE: &str = "\\}";

#[derive(Debug, Clone)]
enum Qualifier {
    Id(String),
    Class(String),
}

fn name() -> impl Parser<ElementToken, String, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, token: ElementToken| match token {
        ElementToken::Name(name) => Ok(name),
        other => Err(Simple::custom(span, format!("expected a name, found {:?}", other))),
    })
}

fn attributes() -> impl Parser<ElementToken, String, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, token: ElementToken| match token {
        ElementToken::Attributes(attributes) => Ok(attributes),
        other => Err(Simple::custom(
            span,
            format!("expected attributes, found {:?}", other),
        )),
    })
}

fn content() -> impl Parser<ElementToken, String, Error = ParserError> + Clone {
    filter_map(|span: Range<usize>, token: ElementToken| match token {
        ElementToken::Content(content) => Ok(content),
        other => Err(Simple::custom(span, format!("expected content, found {:?}", other))),
    })
}

fn repeat() -> impl Parser<ElementToken, u32, Error = ParserError> + Clone {
    let count = filter_map(|span: Range<usize>, token: ElementToken| match token {
        ElementToken::Name(digits) if digits.bytes().all(|b| b.is_ascii_digit()) => digits
            .parse::<u32>()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| Simple::custom(span, "repeat count must be a positive integer")),
        other => Err(Simple::custom(
            span,
            format!("expected a repeat count, found {:?}", other),
        )),
    });

    just(ElementToken::Star).ignore_then(count)
}

fn qualifiers() -> impl Parser<ElementToken, Vec<Qualifier>, Error = ParserError> + Clone {
    let id = just(ElementToken::Hash).ignore_then(name()).map(Qualifier::Id);
    let class = just(ElementToken::Dot).ignore_then(name()).map(Qualifier::Class);

    id.or(class)
        .repeated()
        .try_map(|qualifiers: Vec<Qualifier>, span: Range<usize>| {
            let ids = qualifiers
                .iter()
                .filter(|q| matches!(q, Qualifier::Id(_)))
                .count();
            if ids > 1 {
                Err(Simple::custom(span, "an element takes at most one id"))
            } else {
                Ok(qualifiers)
            }
        })
}

fn head() -> impl Parser<ElementToken, ElementDescriptor, Error = ParserError> + Clone {
    name()
        .then(attributes().or_not())
        .then(qualifiers())
        .map(|((tag, attributes), qualifiers)| {
            let mut element =
                ElementDescriptor::new(tag).with_attributes(attributes.unwrap_or_default());
            for qualifier in qualifiers {
                element = match qualifier {
                    Qualifier::Id(id) => element.with_id(id),
                    Qualifier::Class(class) => element.with_class(class),
                };
            }
            element
        })
}

/// Parser for a complete element token
pub(crate) fn element() -> impl Parser<ElementToken, ElementDescriptor, Error = ParserError> + Clone
{
    head()
        .then(content().or_not())
        .then(repeat().or_not())
        .then_ignore(end())
        .map(|((element, content), repeat)| {
            element
                .with_content(content.unwrap_or_default())
                .with_repeat(repeat.unwrap_or(1))
        })
}

/// Parser for a block opener line
pub(crate) fn block_opener(
) -> impl Parser<ElementToken, ElementDescriptor, Error = ParserError> + Clone {
    head()
        .then_ignore(just(ElementToken::OpenDelimiter))
        .then_ignore(end())
}

fn run<O>(
    parser: impl Parser<ElementToken, O, Error = ParserError>,
    source: &str,
) -> Option<O> {
    let tokens: Vec<(ElementToken, Range<usize>)> = tokenize(source)?;
    let eoi = source.len()..source.len();
    parser.parse(Stream::from_iter(eoi, tokens.into_iter())).ok()
}

/// Parse one element token.
///
/// `line` is only used to locate the error.
pub fn parse_element(token: &str, line: usize) -> Result<ElementDescriptor, GrammarError> {
    run(element(), token).ok_or_else(|| {
        tracing::trace!(line, token, "token rejected by element grammar");
        GrammarError::new(token, line)
    })
}

/// Recognize a block opener such as `section#intro.wide\{`.
///
/// Returns the block head, or `None` when the line is not an opener.
pub fn parse_block_opener(line: &str) -> Option<ElementDescriptor> {
    if !line.ends_with(BLOCK_OPEN) {
        return None;
    }
    run(block_opener(), line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tag() {
        let element = parse_element("hr", 1).unwrap();
        assert_eq!(element, ElementDescriptor::new("hr"));
    }

    #[test]
    fn test_full_element() {
        let element = parse_element(r#"A[href="/home"]#top.nav.main{Home}*2"#, 1).unwrap();
        assert_eq!(element.tag, "a");
        assert_eq!(element.attributes, r#"href="/home""#);
        assert_eq!(element.id.as_deref(), Some("top"));
        assert_eq!(element.classes, vec!["nav", "main"]);
        assert_eq!(element.content, "Home");
        assert_eq!(element.repeat, 2);
    }

    #[test]
    fn test_class_before_id() {
        let element = parse_element("p.lead#intro{Hi}", 1).unwrap();
        assert_eq!(element.id.as_deref(), Some("intro"));
        assert_eq!(element.classes, vec!["lead"]);
    }

    #[test]
    fn test_empty_content_is_allowed() {
        let element = parse_element("td{}", 1).unwrap();
        assert_eq!(element.content, "");
    }

    #[test]
    fn test_rejections() {
        for token in [
            "",
            "p{unclosed",
            "p{a}{b}",
            "p#a#b",
            "p*0",
            "p*x",
            "p*99999999999",
            "div p",
            "p{a}.late",
            "[x]p",
            r"\}",
        ] {
            let err = parse_element(token, 7).unwrap_err();
            assert_eq!(err.line, 7);
            assert_eq!(err.to_string(), format!("Invalid syntax near \"{}\".", token));
        }
    }

    #[test]
    fn test_block_opener() {
        let head = parse_block_opener(r#"form[method="post"]#signup.card\{"#).unwrap();
        assert_eq!(head.tag, "form");
        assert_eq!(head.attributes, r#"method="post""#);
        assert_eq!(head.id.as_deref(), Some("signup"));
        assert_eq!(head.classes, vec!["card"]);
        assert_eq!(head.content, "");
        assert_eq!(head.repeat, 1);
    }

    #[test]
    fn test_not_a_block_opener() {
        assert_eq!(parse_block_opener("div{x}"), None);
        assert_eq!(parse_block_opener(r"div{x}\{"), None);
        assert_eq!(parse_block_opener(r"div \{"), None);
        assert_eq!(parse_block_opener(r"div*2\{"), None);
    }
}
