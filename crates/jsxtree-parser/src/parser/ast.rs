use core::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Attributes of an element in source order.
///
/// A key written twice keeps its first position and takes the last value.
pub type Attributes = IndexMap<String, AttributeValue>;

/// The value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum AttributeValue {
    /// `key="text"` or `key='text'`.
    ///
    /// A quoted value cannot contain its own quote character, so a value
    /// holding both `'` and `"` has no markup form. The parser never builds
    /// one; the printed form of a hand-built one does not parse back.
    StringLiteral(String),
    /// `key` with no assignment, meaning `true`.
    Boolean,
    /// `key={...}`: the raw text between the braces, unevaluated.
    Expression(String),
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    /// A tag with attributes and children.
    Element(Element),
    /// A run of literal text.
    Text {
        /// The text as scanned.
        value: String,
    },
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Element data if this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text { .. } => None,
        }
    }

    /// Text if this node is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { value } => Some(value),
            Self::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element: tag name, attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// The tag name as written after `<`.
    pub tag: String,
    /// Attributes in source order.
    pub attributes: Attributes,
    /// Children in source order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes and no children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute insertion.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        let _ = self.attributes.insert(key.into(), value);
        self
    }

    /// Builder-style child insertion.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// The value of the named attribute, if present.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// The root-level nodes produced by one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    /// Root nodes in source order.
    pub nodes: Vec<Node>,
}

impl Document {
    /// Wrap a list of root nodes.
    #[must_use]
    pub const fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Number of root nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the document has no root nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the root nodes.
    pub fn iter(&self) -> core::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Node;
    type IntoIter = core::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// Markup output. Elements without children are written self-closing, so
// `<a></a>` comes back as `<a />`; both parse to the same tree. Any tree the
// parser built prints back to markup that parses to an equal tree.

impl AttributeValue {
    /// Whether the printed form of this value parses back to the same value.
    /// Only false for a string holding both quote characters.
    #[must_use]
    pub fn has_markup_form(&self) -> bool {
        match self {
            Self::StringLiteral(value) => !(value.contains('"') && value.contains('\'')),
            Self::Boolean | Self::Expression(_) => true,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StringLiteral(value) if value.contains('"') => write!(f, "'{value}'"),
            Self::StringLiteral(value) => write!(f, "\"{value}\""),
            Self::Boolean => f.write_str("{true}"),
            Self::Expression(source) => write!(f, "{{{source}}}"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (key, value) in &self.attributes {
            match value {
                AttributeValue::Boolean => write!(f, " {key}")?,
                _ => write!(f, " {key}={value}")?,
            }
        }
        if self.children.is_empty() {
            return write!(f, " />");
        }
        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => write!(f, "{element}"),
            Self::Text { value } => f.write_str(value),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
