//! Combinator rendering
//!
//! A nesting chain renders from the inside out: the last link is the innermost element, and
//! every earlier link wraps whatever the rest of the chain rendered to. A literal link (a token
//! that failed the element grammar) becomes an escaped text line, and the rest of the chain
//! renders next to it at the same level.
//!
//! Sibling chains are inserted directly into the parent chain's tree. When the parent chain
//! has more than one link, they become the last children of the outermost element, in its
//! final repetition only. A single-link parent has no enclosing element, so the siblings
//! follow it in document order:
//!
//! ```text
//! ul > li{a} + li{b}          <ul><li>a</li><li>b</li></ul>
//! div > ul > li{a} + li{b}    <div><ul><li>a</li></ul><li>b</li></div>
//! a{1} + b{2}                 <a>1</a><b>2</b>
//! ```

use super::budget::ElementBudget;
use super::html::{escape_html, Html};
use super::repetition;
use crate::shorthand::ast::{Chain, ChainLink};
use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::Diagnostics;

/// Render one nesting chain.
pub fn render_chain(
    chain: &Chain,
    line: usize,
    options: &CompileOptions,
    budget: &mut ElementBudget,
    diagnostics: &mut Diagnostics,
) -> Vec<Html> {
    render_links(&chain.links, line, options, budget, diagnostics)
}

fn render_links(
    links: &[ChainLink],
    line: usize,
    options: &CompileOptions,
    budget: &mut ElementBudget,
    diagnostics: &mut Diagnostics,
) -> Vec<Html> {
    let Some((first, rest)) = links.split_first() else {
        return Vec::new();
    };

    match first {
        ChainLink::Literal(text) => {
            let mut out = Vec::new();
            if budget.charge(1, line, diagnostics) {
                out.push(Html::Text(escape_html(text)));
            }
            out.extend(render_links(rest, line, options, budget, diagnostics));
            out
        }
        ChainLink::Element(element) => {
            let children = render_links(rest, line, options, budget, diagnostics);
            repetition::expand(element, &children, line, options, budget, diagnostics)
        }
    }
}

/// Render a parent chain with its sibling chains spliced in.
pub fn render_siblings(
    parent: &Chain,
    siblings: &[Chain],
    line: usize,
    options: &CompileOptions,
    budget: &mut ElementBudget,
    diagnostics: &mut Diagnostics,
) -> Vec<Html> {
    tracing::trace!(line, siblings = siblings.len(), "splicing sibling chains");

    let mut out = render_chain(parent, line, options, budget, diagnostics);
    let mut spliced = Vec::new();
    for sibling in siblings {
        spliced.extend(render_chain(sibling, line, options, budget, diagnostics));
    }

    let encloses = parent.len() > 1
        && matches!(parent.links.first(), Some(ChainLink::Element(element)) if !element.is_raw());
    match out.last_mut() {
        Some(Html::Element(outermost)) if encloses => outermost.children.extend(spliced),
        _ => out.extend(spliced),
    }
    out
}
