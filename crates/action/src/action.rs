use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ActionError;
use crate::runner::TaskScope;

/// Action type reserved for deferred computations.
///
/// Without a handler registered under this key, `call` actions are handed to
/// the [`Runner`](crate::Runner) instead of failing the lookup.
pub const CALL: &str = "call";

/// Future produced by a [`Task`].
pub type TaskFuture = BoxFuture<'static, Result<Value, ActionError>>;

type TaskFn = dyn Fn(TaskScope) -> TaskFuture + Send + Sync;

/// A unit of work: a type tag selecting the handler, plus its payload.
///
/// On the wire an action is `{"type": "...", "payload": ...}`. `call`
/// actions additionally carry a [`Task`], which is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
    #[serde(skip)]
    task: Option<Task>,
}

impl Action {
    /// Create an action of the given type.
    pub fn new(action_type: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: payload.into(),
            task: None,
        }
    }

    /// Create an action with no payload.
    pub fn bare(action_type: impl Into<String>) -> Self {
        Self::new(action_type, Value::Null)
    }

    /// Attach a task, turning this into something a runner can execute.
    pub fn with_task(mut self, task: Task) -> Self {
        self.task = Some(task);
        self
    }

    /// The type tag used to look up the handler.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// The payload (`Null` when absent).
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The deferred computation, for `call` actions.
    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    /// Whether this action uses the reserved [`CALL`] type.
    pub fn is_call(&self) -> bool {
        self.action_type == CALL
    }

    /// Split into `(type, payload, task)`.
    pub fn into_parts(self) -> (String, Value, Option<Task>) {
        (self.action_type, self.payload, self.task)
    }
}

/// Build a `call` action running `task` with `payload`.
///
/// ```rust
/// use courier_action::{Task, call};
///
/// let task = Task::new("echo", |scope| async move { Ok(scope.into_payload()) });
/// let action = call(task.clone(), serde_json::json!({"foo": "bar"}));
///
/// assert!(action.is_call());
/// assert!(action.task().is_some_and(|t| t.ptr_eq(&task)));
/// ```
pub fn call(task: Task, payload: impl Into<Value>) -> Action {
    Action::new(CALL, payload).with_task(task)
}

/// A named, shareable deferred computation carried by `call` actions.
///
/// Clones share the same body; two tasks are equal only when they are clones
/// of one another.
#[derive(Clone)]
pub struct Task {
    name: Arc<str>,
    body: Arc<TaskFn>,
}

impl Task {
    /// Wrap an async closure as a task.
    pub fn new<F, Fut>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(TaskScope) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ActionError>> + Send + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            body: Arc::new(move |scope| body(scope).boxed()),
        }
    }

    /// Name given at construction, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether both handles point at the same task body.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.body), Arc::as_ptr(&other.body))
    }

    /// Start the task in the given scope.
    pub fn invoke(&self, scope: TaskScope) -> TaskFuture {
        (self.body)(scope)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("name", &self.name).finish()
    }
}
