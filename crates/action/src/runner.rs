//! Fallback execution of `call` actions.

use async_trait::async_trait;
use serde_json::Value;

use crate::action::{Action, Task};
use crate::dispatch::handle_actions;
use crate::error::{ActionError, BatchError};
use crate::registry::HandlerRegistry;
use crate::result::ActionOutcome;

/// Executes `call` actions when no `call` handler is registered.
///
/// Receives the handler table the batch is dispatched against, the action's
/// task (if any), and its payload. The returned value becomes the action's
/// payload; an error becomes a per-action failure.
#[async_trait]
pub trait Runner: Send + Sync {
    /// Run `task` with `payload`.
    async fn run(
        &self,
        handlers: &HandlerRegistry,
        task: Option<&Task>,
        payload: Value,
    ) -> Result<Value, ActionError>;
}

/// Runner that invokes the task body with a [`TaskScope`].
///
/// Tasks may dispatch further actions through the scope, against the same
/// handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskRunner;

#[async_trait]
impl Runner for TaskRunner {
    async fn run(
        &self,
        handlers: &HandlerRegistry,
        task: Option<&Task>,
        payload: Value,
    ) -> Result<Value, ActionError> {
        let task = task.ok_or(ActionError::MissingTask)?;
        tracing::trace!(task = task.name(), "running task");
        task.invoke(TaskScope::new(handlers.clone(), payload)).await
    }
}

/// Adapter turning a synchronous closure into a [`Runner`].
///
/// Built with [`runner_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnRunner<F>(F);

/// Wrap a closure as a [`Runner`].
///
/// ```rust
/// use courier_action::{runner_fn, HandlerRegistry};
///
/// let runner = runner_fn(|_handlers: &HandlerRegistry, _task, payload| Ok(payload));
/// # let _ = runner;
/// ```
pub fn runner_fn<F>(f: F) -> FnRunner<F>
where
    F: Fn(&HandlerRegistry, Option<&Task>, Value) -> Result<Value, ActionError> + Send + Sync,
{
    FnRunner(f)
}

#[async_trait]
impl<F> Runner for FnRunner<F>
where
    F: Fn(&HandlerRegistry, Option<&Task>, Value) -> Result<Value, ActionError> + Send + Sync,
{
    async fn run(
        &self,
        handlers: &HandlerRegistry,
        task: Option<&Task>,
        payload: Value,
    ) -> Result<Value, ActionError> {
        (self.0)(handlers, task, payload)
    }
}

/// What a [`Task`] sees while [`TaskRunner`] executes it.
#[derive(Debug, Clone)]
pub struct TaskScope {
    handlers: HandlerRegistry,
    payload: Value,
}

impl TaskScope {
    /// Create a scope over `handlers` carrying `payload`.
    pub fn new(handlers: HandlerRegistry, payload: Value) -> Self {
        Self { handlers, payload }
    }

    /// The payload of the `call` action.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Take the payload out of the scope.
    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// Handlers of the batch that started this task.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Dispatch nested actions against the same handlers.
    pub async fn handle(&self, actions: Vec<Action>) -> Result<Vec<ActionOutcome>, BatchError> {
        handle_actions(&TaskRunner, &self.handlers, actions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn task_runner_requires_task() {
        let got = TaskRunner
            .run(&HandlerRegistry::new(), None, json!(1))
            .await;
        assert_eq!(got, Err(ActionError::MissingTask));
    }

    #[tokio::test]
    async fn task_runner_passes_payload() {
        let task = Task::new("echo", |scope| async move { Ok(scope.into_payload()) });
        let got = TaskRunner
            .run(&HandlerRegistry::new(), Some(&task), json!({"foo": "bar"}))
            .await;
        assert_eq!(got, Ok(json!({"foo": "bar"})));
    }

    #[tokio::test]
    async fn fn_runner_forwards_arguments() {
        let runner = runner_fn(|handlers: &HandlerRegistry, task: Option<&Task>, payload| {
            Ok(json!({
                "handlers": handlers.keys(),
                "task": task.map(Task::name),
                "payload": payload,
            }))
        });
        let task = Task::new("t", |_| async { Ok(Value::Null) });
        let handlers = HandlerRegistry::new().with("x", json!(1));

        let got = runner.run(&handlers, Some(&task), json!(5)).await;
        assert_eq!(
            got,
            Ok(json!({"handlers": ["x"], "task": "t", "payload": 5}))
        );
    }
}
