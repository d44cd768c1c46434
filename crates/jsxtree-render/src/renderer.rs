//! Materializes a parsed [`Document`] into a [`DomTree`].
//!
//! # Architecture
//!
//! The renderer is the last stage of the pipeline:
//!
//! ```text
//! Tokenize → Parse → Render
//!                      ↓
//!        Document + ExpressionResolver → DomTree
//! ```
//!
//! The renderer never evaluates expressions itself. Every `{...}` attribute
//! goes through the caller's [`ExpressionResolver`]; whatever comes back
//! decides whether the attribute becomes a style string, an event listener
//! or a plain attribute.

use jsxtree_common::warning::warn_once;
use jsxtree_dom::{DomTree, ElementData, NodeId, NodeType};
use jsxtree_parser::{
    AttributeValue, Document, Element, ExpressionResolver, Node, ResolveError, Resolved, Value,
};
use thiserror::Error;

/// Something the renderer could not apply, reported instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderIssue {
    /// The resolver rejected an expression. The raw text was kept as the
    /// attribute value, or the handler was skipped for an event attribute.
    #[error("<{tag}> {attribute}: {error}")]
    Unresolved {
        /// Tag of the element carrying the attribute.
        tag: String,
        /// Attribute key.
        attribute: String,
        /// Why resolution failed.
        error: ResolveError,
    },

    /// A callable was supplied for an attribute that is not an event.
    #[error("<{tag}> {attribute}: a handler is only valid on an on* attribute")]
    MisplacedCallable {
        /// Tag of the element carrying the attribute.
        tag: String,
        /// Attribute key.
        attribute: String,
    },
}

/// The output of [`render_document`].
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    /// Every root of the document appended under the tree's Document node.
    pub tree: DomTree,
    /// Attributes that could not be applied, in document order.
    pub issues: Vec<RenderIssue>,
}

/// Render every root of `document` under a fresh tree's Document node.
///
/// Text nodes become text leaves. Elements become element nodes whose
/// attributes are applied after resolution:
///
/// - `style` is stored as declaration text; a resolved map is converted
///   with [`Value::to_style_declarations`]
/// - `onXxx` with a resolved callable registers a listener for `xxx`
/// - anything else becomes a plain string attribute; `true` renders as the
///   empty string and `false` omits the attribute
#[must_use]
pub fn render_document(
    document: &Document,
    resolver: &dyn ExpressionResolver,
) -> RenderedDocument {
    let mut renderer = Renderer {
        tree: DomTree::new(),
        issues: Vec::new(),
        resolver,
    };
    let root = renderer.tree.root();
    for node in document {
        renderer.render_node(node, root);
    }
    RenderedDocument {
        tree: renderer.tree,
        issues: renderer.issues,
    }
}

struct Renderer<'r> {
    tree: DomTree,
    issues: Vec<RenderIssue>,
    resolver: &'r dyn ExpressionResolver,
}

impl Renderer<'_> {
    fn render_node(&mut self, node: &Node, parent: NodeId) {
        match node {
            Node::Text { value } => {
                let id = self.tree.alloc(NodeType::Text(value.clone()));
                self.tree.append_child(parent, id);
            }
            Node::Element(element) => {
                let id = self
                    .tree
                    .alloc(NodeType::Element(ElementData::new(element.tag.as_str())));
                self.tree.append_child(parent, id);
                self.apply_attributes(element, id);
                for child in &element.children {
                    self.render_node(child, id);
                }
            }
        }
    }

    fn apply_attributes(&mut self, element: &Element, id: NodeId) {
        for (key, resolved) in element.resolve_attributes(self.resolver) {
            match resolved {
                Ok(Resolved::Value(value)) => self.apply_value(id, key, &value),
                Ok(Resolved::Callable(listener)) => {
                    if let Some(event_type) = event_type(key) {
                        let _ = self.tree.add_event_listener(id, event_type, listener);
                    } else {
                        self.report(RenderIssue::MisplacedCallable {
                            tag: element.tag.clone(),
                            attribute: key.to_string(),
                        });
                    }
                }
                Err(error) => {
                    if let (None, Some(AttributeValue::Expression(raw))) =
                        (event_type(key), element.attribute(key))
                    {
                        self.apply_value(id, key, &Value::String(raw.clone()));
                    }
                    self.report(RenderIssue::Unresolved {
                        tag: element.tag.clone(),
                        attribute: key.to_string(),
                        error,
                    });
                }
            }
        }
    }

    fn apply_value(&mut self, id: NodeId, key: &str, value: &Value) {
        let Some(data) = self.tree.as_element_mut(id) else {
            return;
        };
        if key == "style" {
            data.style = Some(value.to_style_declarations());
            return;
        }
        let text = match value {
            Value::Bool(true) => String::new(),
            Value::Bool(false) => return,
            other => other.to_string(),
        };
        let _ = data.attrs.insert(key.to_string(), text);
    }

    fn report(&mut self, issue: RenderIssue) {
        warn_once("Renderer", &issue.to_string());
        self.issues.push(issue);
    }
}

/// `onClick` → `click`. `None` unless the key is `on` followed by an
/// upper-case letter.
fn event_type(key: &str) -> Option<String> {
    let name = key.strip_prefix("on")?;
    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        Some(name.to_ascii_lowercase())
    } else {
        None
    }
}
