//! Combinator splitting
//!
//! A combinator line is split first on top-level `+` (siblings), then each sibling on
//! top-level `>` (nesting). A delimiter is top-level when it is outside quotes and outside
//! braced content. Quote state and brace depth are tracked left to right, and a backslash
//! escapes the character after it.

/// Sibling combinator
pub const SIBLING: char = '+';
/// Nesting combinator
pub const NESTING: char = '>';

/// Split on every top-level occurrence of `delimiter`.
///
/// Parts are trimmed and empty parts are dropped, so `a + ` yields only `a`.
pub fn split_top_level(line: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;

    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match (ch, quote) {
            ('\\', _) => escaped = true,
            ('"' | '\'', None) => quote = Some(ch),
            (c, Some(open)) if c == open => quote = None,
            ('{', None) => depth += 1,
            ('}', None) => depth = depth.saturating_sub(1),
            (c, None) if c == delimiter && depth == 0 => {
                parts.push(&line[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&line[start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Split a line into sibling chains, each chain being its nesting tokens in order
pub fn split_combinators(line: &str) -> Vec<Vec<&str>> {
    split_top_level(line, SIBLING)
        .into_iter()
        .map(|sibling| split_top_level(sibling, NESTING))
        .filter(|chain| !chain.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_siblings() {
        assert_eq!(split_top_level("a{1} + b{2}", SIBLING), vec!["a{1}", "b{2}"]);
    }

    #[test]
    fn test_braces_protect_delimiters() {
        assert_eq!(
            split_top_level("p{1 + 2 > 0} + span", SIBLING),
            vec!["p{1 + 2 > 0}", "span"]
        );
        assert_eq!(split_top_level("p{a > b}", NESTING), vec!["p{a > b}"]);
    }

    #[test]
    fn test_quotes_protect_delimiters() {
        assert_eq!(
            split_top_level(r#"a[title="x > y"] > b"#, NESTING),
            vec![r#"a[title="x > y"]"#, "b"]
        );
        assert_eq!(
            split_top_level("a[title='1+1'] + b", SIBLING),
            vec!["a[title='1+1']", "b"]
        );
    }

    #[test]
    fn test_escaped_delimiter_is_kept() {
        assert_eq!(split_top_level(r"a\+b + c", SIBLING), vec![r"a\+b", "c"]);
    }

    #[test]
    fn test_empty_parts_are_dropped() {
        assert_eq!(split_top_level("a >> b >", NESTING), vec!["a", "b"]);
        assert_eq!(split_top_level("  ", NESTING), Vec::<&str>::new());
    }

    #[test]
    fn test_split_combinators() {
        assert_eq!(
            split_combinators("ul > li{a} + li{b} > em"),
            vec![vec!["ul", "li{a}"], vec!["li{b}", "em"]]
        );
    }
}
