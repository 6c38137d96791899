//! Syntax tree
//!
//!     Each significant source line becomes one [`Node`]. The variants mirror the four line
//!     shapes of the language:
//!
//!         Block     `div.card\{` ... `\}`, with a body that is verbatim text, raw text to
//!                   escape, or a nested [`Document`]
//!         Inline    `li.item{Text &index;}*3`, a single element
//!         Nesting   `ul > li > a{x}`, a chain where each link wraps the rest
//!         Sibling   `ul > li{a} + li{b}`, a parent chain plus chains spliced next to its
//!                   last link
//!
//!     Everything here is plain data. Parsing builds it (see [parsing](crate::shorthand::parsing))
//!     and rendering walks it (see [rendering](crate::shorthand::rendering)).

use serde::Serialize;

/// Placeholder replaced with the 1-based repetition index
pub const INDEX_PLACEHOLDER: &str = "&index;";

/// Tags whose block body is passed through untouched
pub const VERBATIM_TAGS: [&str; 3] = ["script", "style", "html"];

/// Tag whose body is escaped and emitted without a wrapping element
pub const RAW_TAG: &str = "raw";

/// A parsed element token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementDescriptor {
    /// Lowercase tag name
    pub tag: String,
    /// Attribute text between the brackets, copied verbatim
    pub attributes: String,
    pub id: Option<String>,
    /// Class names in source order, never empty strings
    pub classes: Vec<String>,
    /// Raw content between the braces
    pub content: String,
    /// Repeat count, at least 1
    pub repeat: u32,
}

impl ElementDescriptor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: String::new(),
            id: None,
            classes: Vec::new(),
            content: String::new(),
            repeat: 1,
        }
    }

    pub fn with_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.classes.push(class);
        }
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat.max(1);
        self
    }

    pub fn is_raw(&self) -> bool {
        self.tag == RAW_TAG
    }

    pub fn is_verbatim(&self) -> bool {
        VERBATIM_TAGS.contains(&self.tag.as_str())
    }
}

/// Body of a block, classified by the block's tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockBody {
    /// `script`, `style` and `html`: emitted as is
    Verbatim(String),
    /// `raw`: escaped, no wrapping tag
    Raw(String),
    /// Any other tag: compiled as a nested scope
    Markup(Document),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Block head; content is always empty and repeat always 1
    pub element: ElementDescriptor,
    pub body: BlockBody,
}

/// One link of a nesting chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainLink {
    Element(ElementDescriptor),
    /// A token that failed the element grammar, kept as text
    Literal(String),
}

/// Tokens of a `>` chain, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chain {
    pub links: Vec<ChainLink>,
}

impl Chain {
    pub fn new(links: Vec<ChainLink>) -> Self {
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Block(Block),
    Inline(ElementDescriptor),
    Nesting(Chain),
    Sibling { parent: Chain, siblings: Vec<Chain> },
}

/// A classified source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// 1-based source line where the node starts
    pub line: usize,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(line: usize, kind: NodeKind) -> Self {
        Self { line, kind }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match &self.kind {
            NodeKind::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_inline(&self) -> Option<&ElementDescriptor> {
        match &self.kind {
            NodeKind::Inline(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_nesting(&self) -> Option<&Chain> {
        match &self.kind {
            NodeKind::Nesting(chain) => Some(chain),
            _ => None,
        }
    }

    pub fn as_sibling(&self) -> Option<(&Chain, &[Chain])> {
        match &self.kind {
            NodeKind::Sibling { parent, siblings } => Some((parent, siblings.as_slice())),
            _ => None,
        }
    }
}

/// The nodes of one scope, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}
