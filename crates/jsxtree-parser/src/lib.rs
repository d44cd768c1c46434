//! Tokenizer and parser for JSX-style markup.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a single forward scan that turns markup text into a flat
//!   [`Token`] stream (tags, attribute keys and values, embedded `{...}`
//!   expressions, text runs)
//! - **Parser** - recursive descent over that stream, producing a
//!   [`Document`] of [`Node`]s
//! - **Expression resolution** - the [`ExpressionResolver`] seam through which
//!   callers turn raw `{...}` text into values or event listeners; the parser
//!   itself never evaluates expressions
//!
//! # Not Supported
//!
//! - Comments, CDATA sections, namespaces
//! - Incremental or streaming parsing
//! - Source spans (errors carry a single [`Position`])
//!
//! # Example
//!
//! ```
//! use jsxtree_parser::{AttributeValue, parse_markup};
//!
//! let document = parse_markup(r#"<img src="a.png" hidden />"#).unwrap();
//! let img = document.nodes[0].as_element().unwrap();
//! assert_eq!(img.tag, "img");
//! assert_eq!(img.attribute("hidden"), Some(&AttributeValue::Boolean));
//! ```

/// Error types for tokenizing and parsing.
pub mod error;
/// Resolution of embedded expressions into values and listeners.
pub mod expression;
/// Recursive-descent parser and the AST it produces.
pub mod parser;
/// Tokenizer for converting markup text into tokens.
pub mod tokenizer;

pub use error::{Error, ParseError, TokenizeError};
pub use expression::{
    ExpressionResolver, HandlerRegistry, LiteralResolver, ResolveError, Resolved, Value,
};
pub use parser::{
    AttributeValue, Attributes, Document, Element, MAX_NESTING_DEPTH, Node, Parser, print_document,
    print_tree,
};
pub use tokenizer::{Position, Token, TokenKind, Tokenizer};

/// Tokenize `text` with the default (permissive) tokenizer.
///
/// # Errors
///
/// Returns [`TokenizeError::MalformedInput`] if `text` is empty or does not
/// start with `<`, or another [`TokenizeError`] if an attribute value or
/// embedded expression is never closed.
pub fn tokenize(text: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokenizer = Tokenizer::new(text);
    tokenizer.run()?;
    Ok(tokenizer.into_tokens())
}

/// Parse a token stream into a [`Document`] with strict closing-tag matching.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; no partial tree is produced.
pub fn parse(tokens: &[Token]) -> Result<Document, ParseError> {
    Parser::new(tokens).run()
}

/// Tokenize and parse `text` in one step.
///
/// # Errors
///
/// Returns [`Error::Tokenize`] or [`Error::Parse`] for the first problem found.
pub fn parse_markup(text: &str) -> Result<Document, Error> {
    let tokens = tokenize(text)?;
    Ok(parse(&tokens)?)
}
