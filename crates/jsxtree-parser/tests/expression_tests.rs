//! Tests for expression resolvers and attribute resolution.

use std::cell::Cell;
use std::rc::Rc;

use indexmap::IndexMap;
use jsxtree_dom::{Event, NodeId};
use jsxtree_parser::expression::parse_literal;
use jsxtree_parser::{
    ExpressionResolver, HandlerRegistry, LiteralResolver, ResolveError, Resolved, Value,
    parse_markup,
};

fn literal(source: &str) -> Value {
    parse_literal(source).expect("literal should parse")
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<IndexMap<_, _>>(),
    )
}

// ========== literals ==========

#[test]
fn test_string_literals() {
    assert_eq!(literal("\"root\""), Value::String("root".to_string()));
    assert_eq!(literal("'red'"), Value::String("red".to_string()));
    assert_eq!(
        literal(r#""a\"b\nc""#),
        Value::String("a\"b\nc".to_string())
    );
}

#[test]
fn test_scalar_literals() {
    assert_eq!(literal("42"), Value::Number(42.0));
    assert_eq!(literal("-1.5"), Value::Number(-1.5));
    assert_eq!(literal(" true "), Value::Bool(true));
    assert_eq!(literal("false"), Value::Bool(false));
    assert_eq!(literal("null"), Value::Null);
}

#[test]
fn test_object_literal_keeps_key_order() {
    assert_eq!(
        literal("{color: \"white\", backgroundColor: 'red'}"),
        map(&[
            ("color", Value::String("white".to_string())),
            ("backgroundColor", Value::String("red".to_string())),
        ])
    );
}

#[test]
fn test_nested_object_with_trailing_comma() {
    assert_eq!(
        literal("{ 'a': { b: 1, }, \"c-d\": null, }"),
        map(&[
            ("a", map(&[("b", Value::Number(1.0))])),
            ("c-d", Value::Null),
        ])
    );
}

#[test]
fn test_empty_object() {
    assert_eq!(literal("{}"), map(&[]));
}

#[test]
fn test_non_literals_are_unsupported() {
    for source in ["count", "() => {}", "{color: red}", "1 + 2", "f(1)"] {
        let err = parse_literal(source).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Unsupported {
                expression: source.to_string()
            },
            "for {source:?}"
        );
        assert_eq!(err.kind(), "Unsupported");
    }
}

#[test]
fn test_malformed_literals_are_syntax_errors() {
    for source in ["\"abc", "{color \"x\"}", "{a: 1", "", "1.2.3"] {
        let err = parse_literal(source).unwrap_err();
        assert_eq!(err.kind(), "Syntax", "for {source:?}");
    }
}

#[test]
fn test_syntax_error_reports_offset() {
    assert_eq!(
        parse_literal("{color \"x\"}"),
        Err(ResolveError::Syntax {
            message: "expected ':' after property name".to_string(),
            offset: 8,
        })
    );
}

// ========== values ==========

#[test]
fn test_value_display() {
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(
        literal("{a: 'x', b: 2}").to_string(),
        "{a: \"x\", b: 2}"
    );
}

#[test]
fn test_style_declarations() {
    let style = literal("{color: \"white\", backgroundColor: 'red', zIndex: 2}");
    assert_eq!(
        style.to_style_declarations(),
        "color: white; background-color: red; z-index: 2"
    );
    assert_eq!(
        Value::String("color: blue".to_string()).to_style_declarations(),
        "color: blue"
    );
}

// ========== resolvers ==========

#[test]
fn test_literal_resolver() {
    let resolved = LiteralResolver.resolve("{a: 1}").unwrap();
    assert_eq!(resolved.as_value(), Some(&map(&[("a", Value::Number(1.0))])));
    assert!(resolved.as_callable().is_none());
}

#[test]
fn test_registry_resolves_registered_names() {
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    let registry = HandlerRegistry::new().with_handler("handleClick", move |event: &Event| {
        assert_eq!(event.event_type, "click");
        counter.set(counter.get() + 1);
    });
    assert_eq!(registry.len(), 1);
    assert!(registry.get("handleClick").is_some());

    let resolved = registry.resolve(" handleClick ").unwrap();
    let listener = resolved.as_callable().unwrap();
    listener.call(&Event {
        event_type: "click".to_string(),
        target: NodeId::ROOT,
    });
    assert_eq!(clicks.get(), 1);
    assert!(listener.same_callback(registry.get("handleClick").unwrap()));
}

#[test]
fn test_registry_falls_back_to_literals() {
    let registry = HandlerRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(
        registry.resolve("'x'").unwrap().as_value(),
        Some(&Value::String("x".to_string()))
    );
    assert_eq!(
        registry.resolve("handleClick").unwrap_err().kind(),
        "Unsupported"
    );
}

#[test]
fn test_closure_resolver() {
    let resolver = |source: &str| -> Result<Resolved, ResolveError> {
        Ok(Resolved::Value(Value::String(source.to_uppercase())))
    };
    let resolved = resolver.resolve("abcd").unwrap();
    assert_eq!(resolved.as_value(), Some(&Value::String("ABCD".to_string())));
}

// ========== attribute resolution ==========

#[test]
fn test_resolve_attributes_in_source_order() {
    let document =
        parse_markup(r#"<button type="button" disabled onClick={go} tabIndex={2} />"#).unwrap();
    let button = document.nodes[0].as_element().unwrap();
    let registry = HandlerRegistry::new().with_handler("go", |_| {});

    let resolved = button.resolve_attributes(&registry);
    let keys: Vec<&str> = resolved.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, ["type", "disabled", "onClick", "tabIndex"]);

    assert_eq!(
        resolved[0].1.as_ref().unwrap().as_value(),
        Some(&Value::String("button".to_string()))
    );
    assert_eq!(
        resolved[1].1.as_ref().unwrap().as_value(),
        Some(&Value::Bool(true))
    );
    assert!(resolved[2].1.as_ref().unwrap().as_callable().is_some());
    assert_eq!(
        resolved[3].1.as_ref().unwrap().as_value(),
        Some(&Value::Number(2.0))
    );
}

#[test]
fn test_one_bad_expression_does_not_hide_others() {
    let document = parse_markup(r#"<a x={nope} y={"ok"} />"#).unwrap();
    let a = document.nodes[0].as_element().unwrap();
    let resolved = a.resolve_attributes(&LiteralResolver);
    assert!(resolved[0].1.is_err());
    assert!(resolved[1].1.is_ok());
}
