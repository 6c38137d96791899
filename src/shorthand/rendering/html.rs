//! HTML output
//!
//! Rendering builds a small tree of [`Html`] nodes and writes it out in one pass. The layout
//! is line oriented:
//!
//! ```text
//! leaf element          <tag attrs>content</tag>\n
//! element with children <tag attrs>content\n  children  </tag>\n
//! block                 <tag attrs>\n  inner  </tag>\n
//! text                  text\n
//! markup                written as is
//! ```

/// Escape the five HTML special characters.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Build the attribute part of an opening tag, including its leading space.
///
/// Order is raw attributes, then `id`, then `class`. Empty parts are left out.
pub fn attribute_string(attributes: &str, id: Option<&str>, classes: &[String]) -> String {
    let mut out = String::new();
    if !attributes.is_empty() {
        out.push(' ');
        out.push_str(attributes);
    }
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        out.push_str(&format!(" id=\"{}\"", id));
    }
    if !classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
    }
    out
}

/// An element ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub tag: String,
    /// Output of [`attribute_string`]
    pub attributes: String,
    pub content: String,
    pub children: Vec<Html>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Html {
    Element(HtmlElement),
    /// A block wrapper around already rendered inner output
    Block {
        tag: String,
        attributes: String,
        inner: String,
    },
    /// Escaped text on a line of its own
    Text(String),
    /// Output that is already final
    Markup(String),
}

impl Html {
    /// Number of nodes in this subtree, itself included
    pub fn size(&self) -> usize {
        match self {
            Html::Element(element) => 1 + element.children.iter().map(Html::size).sum::<usize>(),
            _ => 1,
        }
    }

    pub fn write_to(&self, out: &mut String) {
        match self {
            Html::Element(element) => {
                out.push_str(&format!("<{}{}>", element.tag, element.attributes));
                out.push_str(&element.content);
                if !element.children.is_empty() {
                    out.push('\n');
                    for child in &element.children {
                        child.write_to(out);
                    }
                }
                out.push_str(&format!("</{}>\n", element.tag));
            }
            Html::Block {
                tag,
                attributes,
                inner,
            } => {
                out.push_str(&format!("<{}{}>\n", tag, attributes));
                out.push_str(inner);
                out.push_str(&format!("</{}>\n", tag));
            }
            Html::Text(text) => {
                out.push_str(text);
                out.push('\n');
            }
            Html::Markup(markup) => out.push_str(markup),
        }
    }
}

/// Write a sequence of nodes into one string
pub fn to_html(nodes: &[Html]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_to(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str, content: &str) -> Html {
        Html::Element(HtmlElement {
            tag: tag.to_string(),
            attributes: String::new(),
            content: content.to_string(),
            children: vec![],
        })
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_attribute_order() {
        let classes = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            attribute_string(r#"type="text""#, Some("name"), &classes),
            r#" type="text" id="name" class="a b""#
        );
        assert_eq!(attribute_string("", None, &[]), "");
        assert_eq!(attribute_string("", Some(""), &[]), "");
    }

    #[test]
    fn test_layout() {
        let list = Html::Element(HtmlElement {
            tag: "ul".to_string(),
            attributes: String::new(),
            content: String::new(),
            children: vec![leaf("li", "a"), Html::Text("&lt;x&gt;".to_string())],
        });
        let block = Html::Block {
            tag: "div".to_string(),
            attributes: r#" class="card""#.to_string(),
            inner: "<p>Hi</p>\n".to_string(),
        };

        assert_eq!(
            to_html(&[list, block]),
            "<ul>\n<li>a</li>\n&lt;x&gt;\n</ul>\n<div class=\"card\">\n<p>Hi</p>\n</div>\n"
        );
    }

    #[test]
    fn test_size_counts_nested_children() {
        let list = Html::Element(HtmlElement {
            tag: "ul".to_string(),
            attributes: String::new(),
            content: String::new(),
            children: vec![leaf("li", "a"), leaf("li", "b"), Html::Text("c".to_string())],
        });
        assert_eq!(list.size(), 4);
        assert_eq!(Html::Markup("<p>x</p>\n".to_string()).size(), 1);
    }

    #[test]
    fn test_empty_block() {
        let block = Html::Block {
            tag: "section".to_string(),
            attributes: String::new(),
            inner: String::new(),
        };
        assert_eq!(to_html(&[block]), "<section>\n</section>\n");
    }
}
