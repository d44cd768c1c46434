//! Parser module: the AST and the recursive-descent parser that builds it.

/// AST node types.
pub mod ast;
/// Recursive-descent parser.
pub mod descent;

pub use ast::{AttributeValue, Attributes, Document, Element, Node};
pub use descent::{MAX_NESTING_DEPTH, Parser};

/// Print every root of `document` to stdout, one node per line, without a
/// depth limit.
pub fn print_document(document: &Document) {
    println!("Document");
    for node in document {
        print_tree(node, 1);
    }
}

/// Print the subtree rooted at `node` to stdout, indented two spaces per level.
pub fn print_tree(node: &Node, indent: usize) {
    let prefix = "  ".repeat(indent);
    match node {
        Node::Element(element) => {
            if element.attributes.is_empty() {
                println!("{prefix}<{}>", element.tag);
            } else {
                let attrs: Vec<String> = element
                    .attributes
                    .iter()
                    .map(|(k, v)| match v {
                        AttributeValue::Boolean => k.clone(),
                        _ => format!("{k}={v}"),
                    })
                    .collect();
                println!("{prefix}<{} {}>", element.tag, attrs.join(" "));
            }
            for child in &element.children {
                print_tree(child, indent + 1);
            }
        }
        Node::Text { value } => {
            let display = value.replace('\n', "\\n").replace(' ', "\u{00B7}");
            println!("{prefix}\"{display}\"");
        }
    }
}
