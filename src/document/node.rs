use std::fmt;

use crate::text::{escape_markup, LITERAL_CLOSE, LITERAL_OPEN};
use crate::tokenizer::{parse_attributes, Attributes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Element,
    SelfClosing,
    Text,
    LiteralBlock,
    Comment,
}

/// Name and raw attribute text of a tag.
///
/// The attribute text is kept exactly as written (leading whitespace
/// included) and parsed only when asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attribute_source: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, attribute_source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_source: attribute_source.into(),
        }
    }

    /// Builds a tag whose attribute text is synthesized from `attributes`.
    pub fn with_attributes(name: impl Into<String>, attributes: &[(&str, &str)]) -> Self {
        let source = attributes
            .iter()
            .map(|(key, value)| format!(" {}=\"{}\"", key, escape_markup(value)))
            .collect::<String>();
        Self::new(name, source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute_source(&self) -> &str {
        &self.attribute_source
    }

    pub fn attributes(&self) -> Attributes {
        parse_attributes(&self.attribute_source)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes().get(name).map(str::to_string)
    }

    fn write_open(&self, f: &mut fmt::Formatter<'_>, self_closing: bool) -> fmt::Result {
        let close = if self_closing { "/>" } else { ">" };
        write!(f, "<{}{}{}", self.name, self.attribute_source, close)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element { tag: Tag, children: Vec<Node> },
    SelfClosing(Tag),
    Text(String),
    LiteralBlock(String),
    Comment(String),
}

impl Node {
    pub fn element(tag: Tag, children: Vec<Node>) -> Self {
        Node::Element { tag, children }
    }

    pub fn self_closing(tag: Tag) -> Self {
        Node::SelfClosing(tag)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element { .. } => NodeKind::Element,
            Node::SelfClosing(_) => NodeKind::SelfClosing,
            Node::Text(_) => NodeKind::Text,
            Node::LiteralBlock(_) => NodeKind::LiteralBlock,
            Node::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Node::Element { tag, .. } | Node::SelfClosing(tag) => Some(tag),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.tag().map(Tag::name)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.tag().and_then(|tag| tag.attribute(name))
    }

    pub fn attributes(&self) -> Attributes {
        self.tag().map(Tag::attributes).unwrap_or_default()
    }

    /// Children of an element; empty for every other kind.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_self_closing(&self) -> bool {
        matches!(self, Node::SelfClosing(_))
    }

    /// Markup that opens this node (`<name attrs>` or `<name attrs/>`).
    pub fn open_markup(&self) -> String {
        match self {
            Node::Element { tag, .. } => format!("<{}{}>", tag.name, tag.attribute_source),
            Node::SelfClosing(tag) => format!("<{}{}/>", tag.name, tag.attribute_source),
            _ => String::new(),
        }
    }

    pub fn close_markup(&self) -> String {
        match self {
            Node::Element { tag, .. } => format!("</{}>", tag.name),
            _ => String::new(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element { tag, children } => {
                tag.write_open(f, false)?;
                for child in children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", tag.name)
            }
            Node::SelfClosing(tag) => tag.write_open(f, true),
            Node::Text(text) => f.write_str(text),
            Node::LiteralBlock(text) => write!(f, "{}{}{}", LITERAL_OPEN, text, LITERAL_CLOSE),
            Node::Comment(text) => write!(f, "<!--{}-->", text),
        }
    }
}

/// A parsed template: the top-level node sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}
