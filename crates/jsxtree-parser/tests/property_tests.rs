//! Property tests: printed markup parses back to the tree it came from.

use jsxtree_parser::{AttributeValue, Document, Element, Node, parse_markup};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const TAGS: &[&str] = &["div", "p", "li", "my-el", "h1"];
const KEYS: &[&str] = &["id", "class", "data-x", "on_click", "tabIndex"];
const STRINGS: &[&str] = &["", "v", "two words", "/path?q=1", "a > b", "it's", "say \"hi\""];
const EXPRESSIONS: &[&str] = &["count", "a ? {b:1} : {c:2}", "{color: 'red'}", "() => {}"];
const TEXTS: &[&str] = &["one", "two words", "3", "trailing "];

/// An element tree whose printed form is valid markup.
///
/// Adjacent text children are never generated: they print as one run and
/// would come back as a single node.
#[derive(Debug, Clone)]
struct Markup(Element);

fn pick(g: &mut Gen, items: &[&str]) -> String {
    (*g.choose(items).unwrap()).to_string()
}

fn arbitrary_element(g: &mut Gen, depth: usize) -> Element {
    let mut element = Element::new(pick(g, TAGS));

    for _ in 0..usize::arbitrary(g) % 4 {
        let value = match u8::arbitrary(g) % 3 {
            0 => AttributeValue::StringLiteral(pick(g, STRINGS)),
            1 => AttributeValue::Boolean,
            _ => AttributeValue::Expression(pick(g, EXPRESSIONS)),
        };
        element = element.with_attribute(pick(g, KEYS), value);
    }

    if depth > 0 {
        let mut last_was_text = false;
        for _ in 0..usize::arbitrary(g) % 4 {
            if !last_was_text && bool::arbitrary(g) {
                element = element.with_child(Node::text(pick(g, TEXTS)));
                last_was_text = true;
            } else {
                element = element.with_child(arbitrary_element(g, depth - 1));
                last_was_text = false;
            }
        }
    }

    element
}

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_element(g, 3))
    }
}

#[quickcheck]
fn printed_element_parses_back(markup: Markup) -> bool {
    let Markup(element) = markup;
    let printed = element.to_string();
    parse_markup(&printed) == Ok(Document::new(vec![Node::Element(element)]))
}

#[quickcheck]
fn printed_element_keeps_attribute_order(markup: Markup) -> bool {
    let Markup(element) = markup;
    let Ok(document) = parse_markup(&element.to_string()) else {
        return false;
    };
    let Some(parsed) = document.nodes.first().and_then(Node::as_element) else {
        return false;
    };
    parsed.attributes.keys().eq(element.attributes.keys())
}
