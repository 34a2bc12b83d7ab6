//! Handler values registered against an action type.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture, Shared};
use serde_json::Value;

use crate::action::Action;
use crate::error::ActionError;

/// Future produced when a [`Handler`] resolves an action.
pub type HandlerFuture = BoxFuture<'static, Result<Value, ActionError>>;

type HandlerFn = dyn Fn(Action) -> HandlerFuture + Send + Sync;

/// How an action type is resolved.
///
/// A handler is either a fixed value, a function of the action, or a future
/// shared by every action that hits it. A [`Handler::Future`] is polled at most
/// once; later actions observe the same settled result.
#[derive(Clone)]
pub enum Handler {
    /// Every action of this type resolves to the same value.
    Value(Value),
    /// Called with the full action.
    Function(Arc<HandlerFn>),
    /// Resolved once and shared.
    Future(Shared<HandlerFuture>),
}

impl Handler {
    /// A handler that always resolves to `value`.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// A synchronous function of the action.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(Action) -> Result<Value, ActionError> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(move |action| future::ready(f(action)).boxed()))
    }

    /// An async function of the action.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Action) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ActionError>> + Send + 'static,
    {
        Self::Function(Arc::new(move |action| f(action).boxed()))
    }

    /// A single future whose result every matching action receives.
    pub fn future<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Result<Value, ActionError>> + Send + 'static,
    {
        Self::Future(fut.boxed().shared())
    }

    /// A handler that has already failed with `error`.
    pub fn rejected(error: ActionError) -> Self {
        Self::future(future::ready(Err(error)))
    }

    /// Resolve `action` against this handler.
    pub fn resolve(&self, action: Action) -> HandlerFuture {
        match self {
            Self::Value(value) => future::ready(Ok(value.clone())).boxed(),
            Self::Function(f) => f(action),
            Self::Future(shared) => shared.clone().boxed(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Function(_) => "function",
            Self::Future(_) => "future",
        }
    }
}

impl From<Value> for Handler {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Future(_) => f.write_str("Future(..)"),
        }
    }
}
