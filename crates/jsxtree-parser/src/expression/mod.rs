//! Resolution of embedded expressions.
//!
//! The parser stores `{...}` attribute values as raw text
//! ([`AttributeValue::Expression`]). Turning that text into something usable
//! is left to an [`ExpressionResolver`] supplied by the caller, so parsing
//! stays purely syntactic and no code is ever executed by this crate.
//!
//! Two resolvers are provided:
//! - [`LiteralResolver`] understands literals only: strings, numbers,
//!   `true`/`false`/`null`, and object literals built from them
//! - [`HandlerRegistry`] maps handler names to registered
//!   [`EventListener`]s and falls back to literals

/// Literal-only resolver.
pub mod literal;
/// Named event-handler resolver.
pub mod registry;

use core::fmt;

use indexmap::IndexMap;
use jsxtree_dom::EventListener;
use serde::Serialize;
use strum_macros::IntoStaticStr;
use thiserror::Error;

use crate::parser::{AttributeValue, Element};

pub use literal::{LiteralResolver, parse_literal};
pub use registry::HandlerRegistry;

/// A capability that maps raw expression text to a value or a callable.
pub trait ExpressionResolver {
    /// Resolve the text captured between an attribute's braces.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if the resolver cannot make sense of
    /// `source`.
    fn resolve(&self, source: &str) -> Result<Resolved, ResolveError>;
}

impl<F> ExpressionResolver for F
where
    F: Fn(&str) -> Result<Resolved, ResolveError>,
{
    fn resolve(&self, source: &str) -> Result<Resolved, ResolveError> {
        self(source)
    }
}

/// What an expression resolved to.
#[derive(Debug, Clone)]
pub enum Resolved {
    /// A plain value, used for ordinary attributes and `style`.
    Value(Value),
    /// A callable, used for `on*` event attributes.
    Callable(EventListener),
}

impl Resolved {
    /// The value, if this is not a callable.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Callable(_) => None,
        }
    }

    /// The listener, if this is a callable.
    #[must_use]
    pub const fn as_callable(&self) -> Option<&EventListener> {
        match self {
            Self::Callable(listener) => Some(listener),
            Self::Value(_) => None,
        }
    }
}

/// A resolved scalar or map value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any number.
    Number(f64),
    /// A string.
    String(String),
    /// An object literal, keys in source order.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Render as inline style declarations.
    ///
    /// A map becomes `key: value` pairs joined by `; `, with camelCase keys
    /// converted to kebab-case (`backgroundColor` becomes
    /// `background-color`). Anything else is rendered as is.
    #[must_use]
    pub fn to_style_declarations(&self) -> String {
        match self {
            Self::Map(entries) => entries
                .iter()
                .map(|(key, value)| format!("{}: {value}", kebab_case(key)))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match value {
                        Self::String(s) => write!(f, "{key}: \"{s}\"")?,
                        other => write!(f, "{key}: {other}")?,
                    }
                }
                f.write_str("}")
            }
        }
    }
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Why an expression could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
pub enum ResolveError {
    /// The resolver does not handle this kind of expression.
    #[error("expression `{expression}` is not supported by this resolver")]
    Unsupported {
        /// The raw expression text.
        expression: String,
    },

    /// The expression looks like a literal but is malformed.
    #[error("invalid literal at offset {offset}: {message}")]
    Syntax {
        /// What went wrong.
        message: String,
        /// Byte offset into the expression text.
        offset: usize,
    },
}

impl ResolveError {
    /// The variant name, e.g. `"Unsupported"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl Element {
    /// Resolve every attribute of this element, in source order.
    ///
    /// String literals and boolean attributes pass through as [`Value`]s;
    /// expressions are handed to `resolver`. Each attribute gets its own
    /// result so one bad expression does not hide the others.
    #[must_use]
    pub fn resolve_attributes(
        &self,
        resolver: &dyn ExpressionResolver,
    ) -> Vec<(&str, Result<Resolved, ResolveError>)> {
        self.attributes
            .iter()
            .map(|(key, value)| {
                let resolved = match value {
                    AttributeValue::StringLiteral(text) => {
                        Ok(Resolved::Value(Value::String(text.clone())))
                    }
                    AttributeValue::Boolean => Ok(Resolved::Value(Value::Bool(true))),
                    AttributeValue::Expression(source) => resolver.resolve(source),
                };
                (key.as_str(), resolved)
            })
            .collect()
    }
}
