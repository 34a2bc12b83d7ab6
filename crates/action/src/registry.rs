use std::collections::HashMap;

use crate::handler::Handler;

/// Lookup table from action type to [`Handler`].
///
/// The keys are the set of registered plugins; dispatching an action whose
/// type is not a key fails the whole batch (except for `call`, which falls
/// back to the runner).
///
/// # Example
///
/// ```rust
/// use courier_action::{Handler, HandlerRegistry};
///
/// let registry = HandlerRegistry::new()
///     .with("ping", Handler::value("pong"))
///     .with("echo", Handler::sync(|action| Ok(action.payload().clone())));
///
/// assert!(registry.contains("ping"));
/// assert!(registry.get("unknown").is_none());
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, action_type: impl Into<String>, handler: impl Into<Handler>) -> Self {
        self.register(action_type, handler);
        self
    }

    /// Register a handler. Returns the handler it replaced, if any.
    pub fn register(
        &mut self,
        action_type: impl Into<String>,
        handler: impl Into<Handler>,
    ) -> Option<Handler> {
        self.handlers.insert(action_type.into(), handler.into())
    }

    /// Look up the handler for an action type.
    pub fn get(&self, action_type: &str) -> Option<&Handler> {
        self.handlers.get(action_type)
    }

    /// Check whether a handler is registered for the given type.
    pub fn contains(&self, action_type: &str) -> bool {
        self.handlers.contains_key(action_type)
    }

    /// Remove a handler. Returns the removed handler, if any.
    pub fn unregister(&mut self, action_type: &str) -> Option<Handler> {
        self.handlers.remove(action_type)
    }

    /// Registered action types, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterate over all `(type, handler)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.handlers.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Handler)> for HandlerRegistry {
    fn from_iter<I: IntoIterator<Item = (K, Handler)>>(iter: I) -> Self {
        Self {
            handlers: iter.into_iter().map(|(k, h)| (k.into(), h)).collect(),
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("count", &self.handlers.len())
            .field("keys", &self.keys())
            .finish()
    }
}
