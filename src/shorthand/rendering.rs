//! Rendering
//!
//!     Walks a parsed [`Document`] and produces HTML text. Each node kind has its own path:
//!
//!         Block     `&index;` in the head's attributes and id becomes `1`, body wrapped in
//!                   the head's tag. Raw bodies are escaped and written without the wrapper.
//!         Inline    expanded by [repetition].
//!         Nesting   rendered by [combinators].
//!         Sibling   rendered by [combinators] with the sibling chains spliced in.
//!
//!     Markup block bodies are rendered recursively into their own string before they are
//!     wrapped. Expression spans are left alone here; they are substituted once over the whole
//!     output by [evaluation](crate::shorthand::evaluation).
//!
//!     One [`ElementBudget`] of `max_elements` nodes covers the whole document, block bodies
//!     included.

pub mod budget;
pub mod combinators;
pub mod html;
pub mod repetition;

pub use budget::ElementBudget;
pub use html::{escape_html, Html};

use crate::shorthand::ast::{Block, BlockBody, Document, Node, NodeKind};
use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::Diagnostics;

/// Render a document to HTML.
pub fn render(
    document: &Document,
    options: &CompileOptions,
    diagnostics: &mut Diagnostics,
) -> String {
    let mut budget = ElementBudget::new(options.max_elements);
    render_scope(document, options, &mut budget, diagnostics)
}

fn render_scope(
    document: &Document,
    options: &CompileOptions,
    budget: &mut ElementBudget,
    diagnostics: &mut Diagnostics,
) -> String {
    let mut out = String::new();
    for node in document.iter() {
        for html in render_node(node, options, budget, diagnostics) {
            html.write_to(&mut out);
        }
    }
    out
}

fn render_node(
    node: &Node,
    options: &CompileOptions,
    budget: &mut ElementBudget,
    diagnostics: &mut Diagnostics,
) -> Vec<Html> {
    match &node.kind {
        NodeKind::Block(block) => render_block(block, node.line, options, budget, diagnostics)
            .into_iter()
            .collect(),
        NodeKind::Inline(element) => {
            repetition::expand(element, &[], node.line, options, budget, diagnostics)
        }
        NodeKind::Nesting(chain) => {
            combinators::render_chain(chain, node.line, options, budget, diagnostics)
        }
        NodeKind::Sibling { parent, siblings } => combinators::render_siblings(
            parent,
            siblings,
            node.line,
            options,
            budget,
            diagnostics,
        ),
    }
}

fn render_block(
    block: &Block,
    line: usize,
    options: &CompileOptions,
    budget: &mut ElementBudget,
    diagnostics: &mut Diagnostics,
) -> Option<Html> {
    if !budget.charge(1, line, diagnostics) {
        return None;
    }

    let inner = match &block.body {
        BlockBody::Raw(text) => return Some(Html::Markup(escape_html(text))),
        BlockBody::Verbatim(text) => text.clone(),
        BlockBody::Markup(document) => render_scope(document, options, budget, diagnostics),
    };

    let head = repetition::instantiate_head(&block.element);
    Some(Html::Block {
        tag: head.tag,
        attributes: head.attributes,
        inner,
    })
}
