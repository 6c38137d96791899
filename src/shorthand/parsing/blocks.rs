//! Block expansion
//!
//!     A block starts at an opener line (`section.hero\{`) and ends at the line that is exactly
//!     `\}` once the delimiter depth returns to zero:
//!
//!         depth starts at 1
//!         a raw line whose trimmed form ends with `\{`    depth + 1
//!         a raw line whose trimmed form is `\}`           depth - 1
//!
//!     The lines in between are the body, taken raw from the scanner so that comments and
//!     indentation survive for verbatim tags. What happens to the body depends on the tag, see
//!     [`BlockBody`]. Markup bodies are parsed by a recursive call over the immutable sub-slice
//!     of lines, in a fresh diagnostics scope that is merged back when the call returns.

use super::parse_scope;
use crate::shorthand::ast::{Block, BlockBody, Document, ElementDescriptor};
use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::shorthand::error::UnclosedBlockError;
use crate::shorthand::lexing::Scanner;
use crate::shorthand::parsing::grammar::{BLOCK_CLOSE, BLOCK_OPEN};

/// Raw lines of a captured body and the source line number of the first one
struct Body<'a> {
    lines: &'a [&'a str],
    first_line: usize,
}

impl Body<'_> {
    /// Every body line followed by a newline, indentation kept
    fn text(&self) -> String {
        self.lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}

/// Take the body of a block whose opener was the last line the scanner yielded.
///
/// On success the scanner is left right after the close delimiter. When the delimiter depth
/// never returns to zero the whole rest of the scope is consumed and `None` is returned.
fn capture_body<'a>(scanner: &mut Scanner<'a>) -> Option<Body<'a>> {
    let remaining = scanner.remaining();
    let first_line = scanner.next_line_number();
    let mut depth = 1usize;

    for (offset, raw) in remaining.iter().enumerate() {
        let trimmed = raw.trim();
        if trimmed.ends_with(BLOCK_OPEN) {
            depth += 1;
        }
        if trimmed == BLOCK_CLOSE {
            depth -= 1;
            if depth == 0 {
                scanner.advance(offset + 1);
                return Some(Body {
                    lines: &remaining[..offset],
                    first_line,
                });
            }
        }
    }

    scanner.exhaust();
    None
}

/// Expand the block opened by `head` on source line `line`.
///
/// `depth` is the nesting level of the scope the opener belongs to (0 at the top level). An
/// unclosed block is returned as an error so the caller can stop its scope.
pub fn expand_block(
    head: ElementDescriptor,
    line: usize,
    scanner: &mut Scanner<'_>,
    depth: usize,
    options: &CompileOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Block, UnclosedBlockError> {
    let body = capture_body(scanner).ok_or_else(|| UnclosedBlockError {
        tag: head.tag.clone(),
        line,
    })?;

    tracing::debug!(
        tag = %head.tag,
        line,
        body_lines = body.lines.len(),
        "expanding block"
    );

    let body = if head.is_verbatim() {
        BlockBody::Verbatim(body.text())
    } else if head.is_raw() {
        BlockBody::Raw(body.text())
    } else if depth + 1 > options.max_block_depth {
        diagnostics.push(
            Diagnostic::at(
                line,
                format!(
                    "Block <{}> is nested deeper than {} levels; its body was dropped.",
                    head.tag, options.max_block_depth
                ),
            )
            .with_kind(DiagnosticKind::Limit),
        );
        BlockBody::Markup(Document::default())
    } else {
        let mut scope = Diagnostics::new();
        let document = parse_scope(body.lines, body.first_line, depth + 1, options, &mut scope);
        diagnostics.merge(scope);
        BlockBody::Markup(document)
    };

    Ok(Block {
        element: head,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shorthand::ast::NodeKind;

    type Expanded = (Result<Block, UnclosedBlockError>, Diagnostics, usize);

    fn expand(source: &str, options: &CompileOptions) -> Expanded {
        let lines: Vec<&str> = source.lines().collect();
        let mut scanner = Scanner::new(&lines, 1);
        let opener = scanner.next().unwrap().unwrap();
        let head = crate::shorthand::parsing::grammar::parse_block_opener(opener.text).unwrap();
        let mut diagnostics = Diagnostics::new();
        let result = expand_block(head, opener.number, &mut scanner, 0, options, &mut diagnostics);
        let next = scanner.next_line_number();
        (result, diagnostics, next)
    }

    #[test]
    fn test_markup_body_is_parsed() {
        let (block, diagnostics, next) =
            expand("div\\{\n  p{Hello}\n\\}\np{after}", &CompileOptions::default());
        let block = block.unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(next, 4);

        match block.body {
            BlockBody::Markup(document) => {
                assert_eq!(document.len(), 1);
                assert_eq!(document.nodes[0].line, 2);
                assert!(matches!(document.nodes[0].kind, NodeKind::Inline(_)));
            }
            other => panic!("expected markup body, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_delimiters_are_balanced() {
        let source = "section\\{\n  div\\{\n    p{x}\n  \\}\n\\}";
        let (block, _, next) = expand(source, &CompileOptions::default());
        let block = block.unwrap();
        assert_eq!(next, 6);

        let BlockBody::Markup(document) = block.body else {
            panic!("expected markup body");
        };
        let inner = document.nodes[0].as_block().unwrap();
        assert_eq!(inner.element.tag, "div");
        assert_eq!(document.nodes[0].line, 2);
    }

    #[test]
    fn test_verbatim_body_keeps_comments_and_indentation() {
        let source = "style\\{\n  # not a comment here\n  p { color: red; }\n\\}";
        let (block, _, _) = expand(source, &CompileOptions::default());
        assert_eq!(
            block.unwrap().body,
            BlockBody::Verbatim("  # not a comment here\n  p { color: red; }\n".to_string())
        );
    }

    #[test]
    fn test_raw_body_is_kept_as_text() {
        let (block, _, _) = expand("raw\\{\n<b>x</b>\n\\}", &CompileOptions::default());
        assert_eq!(block.unwrap().body, BlockBody::Raw("<b>x</b>\n".to_string()));
    }

    #[test]
    fn test_unclosed_block() {
        let (block, _, next) = expand("div\\{\n  p{never closed}", &CompileOptions::default());
        let err = block.unwrap_err();
        assert_eq!(err.tag, "div");
        assert_eq!(err.line, 1);
        assert_eq!(next, 3);
    }

    #[test]
    fn test_depth_limit_drops_body() {
        let options = CompileOptions {
            max_block_depth: 0,
            ..CompileOptions::default()
        };
        let (block, diagnostics, _) = expand("div\\{\np{x}\n\\}", &options);
        assert_eq!(block.unwrap().body, BlockBody::Markup(Document::default()));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().kind, DiagnosticKind::Limit);
    }
}
