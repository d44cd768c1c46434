use std::collections::HashMap;

use jsxtree_dom::{Event, EventListener};

use super::{ExpressionResolver, LiteralResolver, ResolveError, Resolved};

/// Resolves handler names to registered listeners.
///
/// An expression that is exactly a registered name (surrounding whitespace
/// ignored) resolves to [`Resolved::Callable`]. Everything else goes to a
/// [`LiteralResolver`].
///
/// ```
/// use jsxtree_parser::{ExpressionResolver, HandlerRegistry};
///
/// let registry = HandlerRegistry::new().with_handler("handleClick", |_| {});
/// assert!(registry.resolve(" handleClick ").unwrap().as_callable().is_some());
/// assert!(registry.resolve("'text'").unwrap().as_value().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, EventListener>,
    literals: LiteralResolver,
}

impl HandlerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, listener: EventListener) {
        let _ = self.handlers.insert(name.into(), listener);
    }

    /// Builder-style registration of a closure.
    #[must_use]
    pub fn with_handler(
        mut self,
        name: impl Into<String>,
        callback: impl Fn(&Event) + 'static,
    ) -> Self {
        self.register(name, EventListener::new(callback));
        self
    }

    /// The listener registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EventListener> {
        self.handlers.get(name)
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl ExpressionResolver for HandlerRegistry {
    fn resolve(&self, source: &str) -> Result<Resolved, ResolveError> {
        if let Some(listener) = self.handlers.get(source.trim()) {
            return Ok(Resolved::Callable(listener.clone()));
        }
        self.literals.resolve(source)
    }
}
