//! Integration tests for rendering documents into the visual tree.

use std::cell::Cell;
use std::rc::Rc;

use jsxtree_common::warning::has_warned;
use jsxtree_dom::{DomTree, NodeId};
use jsxtree_parser::{HandlerRegistry, LiteralResolver, ResolveError, parse_markup};
use jsxtree_render::{RenderIssue, RenderedDocument, render_document};

/// Helper to parse and render markup with the given resolver
fn render_with(input: &str, resolver: &dyn jsxtree_parser::ExpressionResolver) -> RenderedDocument {
    let document = parse_markup(input).expect("markup should parse");
    render_document(&document, resolver)
}

/// Helper to render with the literal-only resolver
fn render(input: &str) -> RenderedDocument {
    render_with(input, &LiteralResolver)
}

/// The first rendered root.
fn first_root(tree: &DomTree) -> NodeId {
    tree.children(tree.root())[0]
}

// ========== structure ==========

#[test]
fn test_elements_and_text_are_materialized_in_order() {
    let rendered = render("<ul><li>1</li>between<li>2</li></ul>");
    let tree = &rendered.tree;
    let ul = first_root(tree);
    assert_eq!(tree.as_element(ul).unwrap().tag_name, "ul");

    let children = tree.children(ul);
    assert_eq!(children.len(), 3);
    assert_eq!(tree.as_element(children[0]).unwrap().tag_name, "li");
    assert_eq!(tree.as_text(children[1]), Some("between"));
    assert_eq!(tree.text_content(children[2]), "2");
    assert_eq!(tree.parent(children[1]), Some(ul));
    assert_eq!(tree.text_content(ul), "1between2");
    assert!(rendered.issues.is_empty());
}

#[test]
fn test_root_text_is_rendered() {
    let rendered = render("<a/>tail");
    let tree = &rendered.tree;
    let roots = tree.children(tree.root());
    assert_eq!(roots.len(), 2);
    assert_eq!(tree.as_text(roots[1]), Some("tail"));
}

// ========== attributes ==========

#[test]
fn test_plain_attributes() {
    let rendered = render(r#"<div id="root" hidden data-n={2} off={false} label={'x'}/>"#);
    let div = rendered.tree.as_element(first_root(&rendered.tree)).unwrap();
    assert_eq!(div.id(), Some("root"));
    assert_eq!(div.attribute("hidden"), Some(""));
    assert_eq!(div.attribute("data-n"), Some("2"));
    assert_eq!(div.attribute("off"), None);
    assert_eq!(div.attribute("label"), Some("x"));

    let keys: Vec<&str> = div.attrs.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "hidden", "data-n", "label"]);
}

#[test]
fn test_style_map_becomes_declarations() {
    let rendered = render(r#"<p style={{color: "white", backgroundColor: 'red'}}/>"#);
    let p = rendered.tree.as_element(first_root(&rendered.tree)).unwrap();
    assert_eq!(
        p.style.as_deref(),
        Some("color: white; background-color: red")
    );
    assert_eq!(p.attribute("style"), None);
}

#[test]
fn test_style_string_is_kept() {
    let rendered = render(r#"<p style="margin: 0"/>"#);
    let p = rendered.tree.as_element(first_root(&rendered.tree)).unwrap();
    assert_eq!(p.style.as_deref(), Some("margin: 0"));
}

// ========== events ==========

#[test]
fn test_event_handler_is_registered_and_dispatched() {
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    let registry =
        HandlerRegistry::new().with_handler("handleClick", move |_| counter.set(counter.get() + 1));

    let rendered = render_with(
        "<button onClick={handleClick} type=\"button\">Go</button>",
        &registry,
    );
    let tree = &rendered.tree;
    let button = first_root(tree);
    let data = tree.as_element(button).unwrap();
    assert_eq!(data.listener_count("click"), 1);
    assert_eq!(data.attribute("onClick"), None);
    assert_eq!(data.attribute("type"), Some("button"));

    assert_eq!(tree.dispatch_event(button, "click"), 1);
    assert_eq!(tree.dispatch_event(button, "keydown"), 0);
    assert_eq!(clicks.get(), 1);
}

#[test]
fn test_events_do_not_bubble() {
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    let registry =
        HandlerRegistry::new().with_handler("outer", move |_| counter.set(counter.get() + 1));

    let rendered = render_with("<div onClick={outer}><span>x</span></div>", &registry);
    let tree = &rendered.tree;
    let span = tree.children(first_root(tree))[0];
    assert_eq!(tree.dispatch_event(span, "click"), 0);
    assert_eq!(clicks.get(), 0);
}

#[test]
fn test_non_callable_on_attribute_is_plain() {
    let rendered = render(r#"<a onHover="tip"/>"#);
    let a = rendered.tree.as_element(first_root(&rendered.tree)).unwrap();
    assert_eq!(a.attribute("onHover"), Some("tip"));
    assert!(a.listeners.is_empty());
}

// ========== issues ==========

#[test]
fn test_unresolved_handler_is_skipped() {
    let rendered = render("<button onClick={() => {\n  go();\n}}>Go</button>");
    let button = rendered.tree.as_element(first_root(&rendered.tree)).unwrap();
    assert_eq!(button.listener_count("click"), 0);
    assert_eq!(button.attribute("onClick"), None);

    assert_eq!(
        rendered.issues,
        vec![RenderIssue::Unresolved {
            tag: "button".to_string(),
            attribute: "onClick".to_string(),
            error: ResolveError::Unsupported {
                expression: "() => {\n  go();\n}".to_string()
            },
        }]
    );
}

#[test]
fn test_unresolved_attribute_keeps_raw_text() {
    let rendered = render("<a href={url}/>");
    let a = rendered.tree.as_element(first_root(&rendered.tree)).unwrap();
    assert_eq!(a.attribute("href"), Some("url"));
    assert_eq!(rendered.issues.len(), 1);
    assert!(has_warned(
        "Renderer",
        "<a> href: expression `url` is not supported by this resolver"
    ));
}

#[test]
fn test_callable_on_plain_attribute_is_reported() {
    let registry = HandlerRegistry::new().with_handler("handleClick", |_| {});
    let rendered = render_with("<a title={handleClick} onclick={handleClick}/>", &registry);
    let a = rendered.tree.as_element(first_root(&rendered.tree)).unwrap();
    assert!(a.attrs.is_empty());
    assert!(a.listeners.is_empty());
    assert_eq!(
        rendered.issues,
        vec![
            RenderIssue::MisplacedCallable {
                tag: "a".to_string(),
                attribute: "title".to_string(),
            },
            RenderIssue::MisplacedCallable {
                tag: "a".to_string(),
                attribute: "onclick".to_string(),
            },
        ]
    );
}

// ========== full page ==========

#[test]
fn test_full_page() {
    let page = r#"<div id={"root"} aria-disabled className="root-element">
  <button
    type="button"
    onClick={handleClick}
    style={{color: "white", backgroundColor: 'red'}}
  >
    Click me
  </button>
  <ul id="list" tabIndex="0">
    <li id="one">1</li>
    <li id="two">2</li>
    Text in between
    <li id="three">3</li>
  </ul>
  Last text in tree
</div>
"#;
    let registry = HandlerRegistry::new().with_handler("handleClick", |_| {});
    let rendered = render_with(page, &registry);
    assert!(rendered.issues.is_empty());

    let tree = &rendered.tree;
    let div = first_root(tree);
    let div_data = tree.as_element(div).unwrap();
    assert_eq!(div_data.id(), Some("root"));
    assert_eq!(div_data.attribute("aria-disabled"), Some(""));
    assert_eq!(div_data.attribute("className"), Some("root-element"));

    let children = tree.children(div);
    assert_eq!(children.len(), 3);
    let button = tree.as_element(children[0]).unwrap();
    assert_eq!(
        button.style.as_deref(),
        Some("color: white; background-color: red")
    );
    assert_eq!(button.listener_count("click"), 1);
    assert_eq!(tree.text_content(children[0]), "Click me");

    assert_eq!(tree.children(children[1]).len(), 4);
    assert_eq!(tree.as_text(children[2]), Some("Last text in tree"));
}
