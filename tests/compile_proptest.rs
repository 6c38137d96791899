//! Property-based tests for the compiler
//!
//! These tests make sure that arbitrary input never escapes the compile boundary and that the
//! core expansions behave the same for every well-formed element.

use proptest::prelude::*;
use shorthand::shorthand::lexing::strip_inline_comment;
use shorthand::shorthand::rendering::escape_html;
use shorthand::{compile, compile_with_options, CompileOptions, DiagnosticKind, NoEvaluator};

fn small_limits() -> CompileOptions {
    CompileOptions {
        max_repeat: 4,
        max_block_depth: 8,
        max_elements: 2_000,
        ..CompileOptions::default()
    }
}

/// Tags that render with a wrapper element
fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}".prop_filter("raw has no wrapper", |tag| tag != "raw")
}

proptest! {
    #[test]
    fn escaping_is_identity_without_special_characters(text in "[^&<>\"']*") {
        prop_assert_eq!(escape_html(&text), text);
    }

    #[test]
    fn escaped_text_has_no_special_characters(text in ".*") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
    }

    #[test]
    fn strip_inline_comment_never_panics(line in ".{0,80}") {
        let stripped = strip_inline_comment(&line);
        prop_assert!(line.contains(stripped));
    }

    #[test]
    fn compile_never_fails_internally(
        source in "[a-z#.{}\\[\\]*+>\\\\ \n0-9&;<$\"'=]{0,160}"
    ) {
        let compilation = compile_with_options(&source, &NoEvaluator, &small_limits());
        prop_assert!(compilation
            .diagnostics
            .iter()
            .all(|d| d.kind != DiagnosticKind::Internal));
    }

    #[test]
    fn repeated_inline_element_renders_n_fragments(
        tag in tag_strategy(),
        content in "[a-zA-Z0-9 ,.!?]{0,20}",
        count in 1u32..6,
    ) {
        let source = format!("{}.cls#id{{{}}}*{}", tag, content, count);
        let compilation = compile(&source, &NoEvaluator);

        let fragment = format!("<{0} id=\"id\" class=\"cls\">{1}</{0}>\n", tag, content);
        prop_assert!(compilation.is_clean());
        prop_assert_eq!(compilation.html, fragment.repeat(count as usize));
    }

    #[test]
    fn index_counts_up_from_one(tag in tag_strategy(), count in 1u32..8) {
        let source = format!("{}{{&index;}}*{}", tag, count);
        let compilation = compile(&source, &NoEvaluator);

        let expected: String = (1..=count)
            .map(|i| format!("<{0}>{1}</{0}>\n", tag, i))
            .collect();
        prop_assert_eq!(compilation.html, expected);
    }

    #[test]
    fn trailing_comment_does_not_change_output(
        tag in tag_strategy(),
        content in "[a-zA-Z0-9 ]{0,20}",
        comment in "[a-zA-Z0-9 #]{0,20}",
    ) {
        let line = format!("{}{{{}}}", tag, content);
        let commented = format!("{} # {}", line, comment);
        prop_assert_eq!(
            compile(&commented, &NoEvaluator),
            compile(&line, &NoEvaluator)
        );
    }

    #[test]
    fn top_level_siblings_follow_in_order(
        first in tag_strategy(),
        second in tag_strategy(),
    ) {
        let source = format!("{}{{1}} + {}{{2}}", first, second);
        let compilation = compile(&source, &NoEvaluator);
        prop_assert_eq!(
            compilation.html,
            format!("<{0}>1</{0}>\n<{1}>2</{1}>\n", first, second)
        );
    }
}
