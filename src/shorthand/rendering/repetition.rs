//! Repetition expansion
//!
//! An element with repeat count N renders N times. Every rendering substitutes `&index;` with
//! its own 1-based index in the attributes, the id, each class and the content. Children are
//! rendered before the element is expanded and are cloned into every repetition unchanged, so
//! an outer index never reaches inner elements and nested repeats multiply.
//!
//! Each repetition is charged to the [`ElementBudget`] for itself and for every child it
//! clones. A repetition that does not fit ends the expansion.

use super::budget::ElementBudget;
use super::html::{attribute_string, escape_html, Html, HtmlElement};
use crate::shorthand::ast::{ElementDescriptor, INDEX_PLACEHOLDER};
use crate::shorthand::config::CompileOptions;
use crate::shorthand::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

pub fn substitute_index(text: &str, index: u32) -> String {
    text.replace(INDEX_PLACEHOLDER, &index.to_string())
}

/// Render the element for one repetition, without children
pub fn instantiate(element: &ElementDescriptor, index: u32) -> HtmlElement {
    let id = element.id.as_deref().map(|id| substitute_index(id, index));
    let classes: Vec<String> = element
        .classes
        .iter()
        .map(|class| substitute_index(class, index))
        .collect();

    HtmlElement {
        tag: element.tag.clone(),
        attributes: attribute_string(
            &substitute_index(&element.attributes, index),
            id.as_deref(),
            &classes,
        ),
        content: substitute_index(&element.content, index),
        children: Vec::new(),
    }
}

/// Render a block head: `&index;` becomes `1` in the attributes and the id. Class names are
/// kept as written.
pub fn instantiate_head(element: &ElementDescriptor) -> HtmlElement {
    let id = element.id.as_deref().map(|id| substitute_index(id, 1));

    HtmlElement {
        tag: element.tag.clone(),
        attributes: attribute_string(
            &substitute_index(&element.attributes, 1),
            id.as_deref(),
            &element.classes,
        ),
        content: String::new(),
        children: Vec::new(),
    }
}

/// The repeat count to use, clamped to `max_repeat`.
pub fn repeat_count(
    element: &ElementDescriptor,
    line: usize,
    options: &CompileOptions,
    diagnostics: &mut Diagnostics,
) -> u32 {
    if element.repeat <= options.max_repeat {
        return element.repeat;
    }

    diagnostics.push(
        Diagnostic::at(
            line,
            format!(
                "Repeat count {} of <{}> exceeds the limit of {}.",
                element.repeat, element.tag, options.max_repeat
            ),
        )
        .with_kind(DiagnosticKind::Limit),
    );
    options.max_repeat
}

/// Expand `element` around already rendered `children`.
///
/// A `raw` element has no wrapper: each repetition is its escaped content followed by the
/// children.
pub fn expand(
    element: &ElementDescriptor,
    children: &[Html],
    line: usize,
    options: &CompileOptions,
    budget: &mut ElementBudget,
    diagnostics: &mut Diagnostics,
) -> Vec<Html> {
    let count = repeat_count(element, line, options, diagnostics);
    let cost = 1 + children.iter().map(Html::size).sum::<usize>();
    let mut out = Vec::new();

    for index in 1..=count {
        if !budget.charge(cost, line, diagnostics) {
            break;
        }
        let mut instance = instantiate(element, index);
        if element.is_raw() {
            if !instance.content.is_empty() {
                out.push(Html::Text(escape_html(&instance.content)));
            }
            out.extend_from_slice(children);
        } else {
            instance.children = children.to_vec();
            out.push(Html::Element(instance));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shorthand::rendering::html::to_html;

    fn unlimited() -> ElementBudget {
        ElementBudget::new(usize::MAX)
    }

    fn expand_default(element: &ElementDescriptor, children: &[Html]) -> String {
        let mut diagnostics = Diagnostics::new();
        let html = expand(
            element,
            children,
            1,
            &CompileOptions::default(),
            &mut unlimited(),
            &mut diagnostics,
        );
        assert!(diagnostics.is_empty());
        to_html(&html)
    }

    #[test]
    fn test_index_substitution_everywhere() {
        let element = ElementDescriptor::new("li")
            .with_attributes(r#"data-n="&index;""#)
            .with_id("item-&index;")
            .with_class("c&index;")
            .with_content("Item &index; of &index;")
            .with_repeat(2);

        assert_eq!(
            expand_default(&element, &[]),
            concat!(
                "<li data-n=\"1\" id=\"item-1\" class=\"c1\">Item 1 of 1</li>\n",
                "<li data-n=\"2\" id=\"item-2\" class=\"c2\">Item 2 of 2</li>\n",
            )
        );
    }

    #[test]
    fn test_children_keep_their_own_index() {
        let child = ElementDescriptor::new("span").with_content("&index;");
        let mut diagnostics = Diagnostics::new();
        let children = expand(
            &child,
            &[],
            1,
            &CompileOptions::default(),
            &mut unlimited(),
            &mut diagnostics,
        );

        let parent = ElementDescriptor::new("p").with_content("p&index;").with_repeat(2);
        assert_eq!(
            expand_default(&parent, &children),
            "<p>p1\n<span>1</span>\n</p>\n<p>p2\n<span>1</span>\n</p>\n"
        );
    }

    #[test]
    fn test_raw_element_has_no_wrapper() {
        let element = ElementDescriptor::new("raw").with_content("<b>x</b>");
        assert_eq!(expand_default(&element, &[]), "&lt;b&gt;x&lt;/b&gt;\n");
    }

    #[test]
    fn test_repeat_is_clamped() {
        let options = CompileOptions {
            max_repeat: 2,
            ..CompileOptions::default()
        };
        let mut diagnostics = Diagnostics::new();
        let element = ElementDescriptor::new("i").with_repeat(5);
        let html = expand(&element, &[], 3, &options, &mut unlimited(), &mut diagnostics);

        assert_eq!(html.len(), 2);
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.kind, DiagnosticKind::Limit);
        assert_eq!(diagnostic.line, Some(3));
        assert_eq!(
            diagnostic.message,
            "Repeat count 5 of <i> exceeds the limit of 2."
        );
    }

    #[test]
    fn test_budget_pays_for_cloned_children() {
        let child = Html::Text("x".to_string());
        let children = vec![child.clone(), child];
        let element = ElementDescriptor::new("p").with_repeat(5);

        let mut diagnostics = Diagnostics::new();
        let mut budget = ElementBudget::new(7);
        let html = expand(
            &element,
            &children,
            4,
            &CompileOptions::default(),
            &mut budget,
            &mut diagnostics,
        );

        assert_eq!(html.len(), 2);
        assert!(budget.is_exhausted());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().kind, DiagnosticKind::Limit);
        assert_eq!(diagnostics.iter().next().unwrap().line, Some(4));
    }

    #[test]
    fn test_block_head_keeps_class_placeholders() {
        let head = ElementDescriptor::new("section")
            .with_attributes(r#"data-n="&index;""#)
            .with_id("s&index;")
            .with_class("c&index;");
        assert_eq!(
            instantiate_head(&head).attributes,
            r#" data-n="1" id="s1" class="c&index;""#
        );
    }
}
