//! Parsing
//!
//!     Turns source text into a [`Document`]. Every significant line of a scope is classified
//!     into one node:
//!
//!         1. A block opener (`tag...\{`) takes its body from the following lines. See [blocks].
//!         2. A line that is one whole element token is an inline element.
//!         3. Anything else is split on the combinators into sibling chains of nesting tokens,
//!            and each token goes through the element grammar on its own. See [grammar].
//!
//!     Parsing never fails. Problems are recorded in [`Diagnostics`] and the line is kept in
//!     the best form available: a chain token that does not parse becomes a literal link that
//!     renders as escaped text. Two problems stop the current scope: a block without its close
//!     delimiter and a block comment without its end marker. Both consume the rest of the
//!     scope anyway, so nothing after them could be parsed reliably.

pub mod blocks;
pub mod grammar;

pub use blocks::expand_block;
pub use grammar::{parse_block_opener, parse_element, BLOCK_CLOSE, BLOCK_OPEN};

use crate::shorthand::ast::{Chain, ChainLink, Document, Node, NodeKind};
use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::Diagnostics;
use crate::shorthand::error::GrammarError;
use crate::shorthand::lexing::{source_lines, split_combinators, ScannedLine, Scanner};
use serde::Serialize;

/// Result of the parsing phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parsed {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// Parse a whole source text.
pub fn parse(source: &str, options: &CompileOptions) -> Parsed {
    let lines = source_lines(source);
    let mut diagnostics = Diagnostics::new();
    let document = parse_scope(&lines, 1, 0, options, &mut diagnostics);
    Parsed {
        document,
        diagnostics,
    }
}

/// Parse the lines of one scope.
///
/// `first_line` is the source line number of `lines[0]` and `depth` the block nesting level
/// of the scope.
pub(crate) fn parse_scope(
    lines: &[&str],
    first_line: usize,
    depth: usize,
    options: &CompileOptions,
    diagnostics: &mut Diagnostics,
) -> Document {
    let mut scanner = Scanner::new(lines, first_line);
    let mut nodes = Vec::new();

    while let Some(scanned) = scanner.next() {
        let line = match scanned {
            Ok(line) => line,
            Err(unclosed) => {
                diagnostics.push(unclosed);
                break;
            }
        };

        if let Some(head) = parse_block_opener(line.text) {
            match expand_block(head, line.number, &mut scanner, depth, options, diagnostics) {
                Ok(block) => nodes.push(Node::new(line.number, NodeKind::Block(block))),
                Err(unclosed) => {
                    diagnostics.push(unclosed);
                    break;
                }
            }
            continue;
        }

        if line.text == BLOCK_CLOSE {
            tracing::debug!(line = line.number, "ignoring close delimiter without a block");
            continue;
        }

        nodes.push(classify(line, diagnostics));
    }

    Document::new(nodes)
}

/// Classify a line that is not part of a block.
fn classify(line: ScannedLine<'_>, diagnostics: &mut Diagnostics) -> Node {
    if let Ok(element) = parse_element(line.text, line.number) {
        return Node::new(line.number, NodeKind::Inline(element));
    }

    let mut chains: Vec<Chain> = split_combinators(line.text)
        .into_iter()
        .map(|tokens| parse_chain(&tokens, line.number, diagnostics))
        .filter(|chain| !chain.is_empty())
        .collect();

    if chains.is_empty() {
        diagnostics.push(GrammarError::new(line.text, line.number));
        let literal = Chain::new(vec![ChainLink::Literal(line.text.to_string())]);
        return Node::new(line.number, NodeKind::Nesting(literal));
    }

    let parent = chains.remove(0);
    let kind = if chains.is_empty() {
        NodeKind::Nesting(parent)
    } else {
        NodeKind::Sibling {
            parent,
            siblings: chains,
        }
    };
    Node::new(line.number, kind)
}

/// Parse the tokens of one `>` chain, keeping tokens that fail as literal links.
fn parse_chain(tokens: &[&str], line: usize, diagnostics: &mut Diagnostics) -> Chain {
    let links = tokens
        .iter()
        .map(|token| match parse_element(token, line) {
            Ok(element) => ChainLink::Element(element),
            Err(err) => {
                diagnostics.push(err);
                ChainLink::Literal(token.to_string())
            }
        })
        .collect();
    Chain::new(links)
}
