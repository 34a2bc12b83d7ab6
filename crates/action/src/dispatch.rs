//! Resolving batches of actions against a handler table.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use futures::{FutureExt, future};
use serde_json::Value;
use tracing::Instrument;

use crate::action::Action;
use crate::config::DispatchConfig;
use crate::error::{ActionError, BatchError, DispatchError};
use crate::handler::Handler;
use crate::registry::HandlerRegistry;
use crate::result::ActionOutcome;
use crate::runner::{Runner, TaskRunner};

/// Where an action goes once its type has been looked up.
enum Route<'a> {
    Handler(&'a Handler),
    Runner,
}

fn route<'a>(handlers: &'a HandlerRegistry, action: &Action) -> Result<Route<'a>, DispatchError> {
    match handlers.get(action.action_type()) {
        Some(handler) => Ok(Route::Handler(handler)),
        None if action.is_call() => Ok(Route::Runner),
        None => Err(DispatchError::PluginNotRegistered(
            action.action_type().to_owned(),
        )),
    }
}

/// Resolve every action and return one outcome per action, in input order.
///
/// Uses [`DispatchConfig::default`], so all actions may be in flight at once.
/// See [`handle_actions_with`].
pub async fn handle_actions(
    runner: &dyn Runner,
    handlers: &HandlerRegistry,
    actions: Vec<Action>,
) -> Result<Vec<ActionOutcome>, BatchError> {
    handle_actions_with(runner, handlers, actions, DispatchConfig::default()).await
}

/// Resolve every action under `config`.
///
/// Every action type is looked up before any handler runs: an unregistered
/// type (other than `call`) rejects the whole batch with a [`BatchError`] and
/// nothing is invoked. Failures of individual handlers, including panics,
/// only fill that action's slot with [`ActionOutcome::Failure`].
///
/// `call` actions go to the `call` handler when one is registered (it gets
/// the full action), otherwise to `runner` with the action's task and payload.
pub async fn handle_actions_with(
    runner: &dyn Runner,
    handlers: &HandlerRegistry,
    actions: Vec<Action>,
    config: DispatchConfig,
) -> Result<Vec<ActionOutcome>, BatchError> {
    let span = tracing::debug_span!(
        "handle_actions",
        actions = actions.len(),
        max_in_flight = config.max_in_flight
    );

    async move {
        let routed = actions
            .into_iter()
            .enumerate()
            .map(|(index, action)| match route(handlers, &action) {
                Ok(target) => Ok((index, target, action)),
                Err(error) => Err(BatchError { index, error }),
            })
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                tracing::error!(index = e.index, error = %e.error, "rejecting batch");
            })?;

        let pending: Vec<_> = routed
            .into_iter()
            .map(|(index, target, action)| settle(runner, handlers, index, target, action))
            .collect();

        let outcomes = match config.max_in_flight {
            0 => future::join_all(pending).await,
            n => stream::iter(pending).buffered(n).collect::<Vec<_>>().await,
        };
        Ok(outcomes)
    }
    .instrument(span)
    .await
}

async fn settle(
    runner: &dyn Runner,
    handlers: &HandlerRegistry,
    index: usize,
    target: Route<'_>,
    action: Action,
) -> ActionOutcome {
    let action_type = action.action_type().to_owned();
    let resolved = AssertUnwindSafe(resolve(runner, handlers, target, action))
        .catch_unwind()
        .await;

    let outcome = match resolved {
        Ok(result) => ActionOutcome::from(result),
        Err(panic) => ActionOutcome::failure(ActionError::panicked(panic_message(&*panic))),
    };

    match &outcome {
        ActionOutcome::Success { .. } => {
            tracing::debug!(index, action = %action_type, "action resolved");
        }
        ActionOutcome::Failure { error } => {
            tracing::warn!(index, action = %action_type, %error, "action failed");
        }
    }
    outcome
}

async fn resolve(
    runner: &dyn Runner,
    handlers: &HandlerRegistry,
    target: Route<'_>,
    action: Action,
) -> Result<Value, ActionError> {
    match target {
        Route::Handler(handler) => handler.resolve(action).await,
        Route::Runner => {
            let (_, payload, task) = action.into_parts();
            runner.run(handlers, task.as_ref(), payload).await
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

/// A handler table, runner and config bundled for repeated dispatch.
///
/// ```rust
/// use courier_action::{Action, Dispatcher, Handler, HandlerRegistry};
///
/// let dispatcher = Dispatcher::new(HandlerRegistry::new().with("ping", Handler::value("pong")));
///
/// futures::executor::block_on(async {
///     let outcomes = dispatcher.dispatch(vec![Action::bare("ping")]).await.unwrap();
///     assert_eq!(outcomes[0].payload(), Some(&serde_json::json!("pong")));
/// });
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    runner: Arc<dyn Runner>,
    handlers: HandlerRegistry,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Dispatcher over `handlers` using [`TaskRunner`] and the default config.
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self {
            runner: Arc::new(TaskRunner),
            handlers,
            config: DispatchConfig::default(),
        }
    }

    /// Replace the runner used for `call` actions.
    pub fn with_runner(mut self, runner: impl Runner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    /// Replace the dispatch config.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The handler table.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Mutable access to the handler table between batches.
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    /// The active config.
    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Resolve a batch; see [`handle_actions_with`].
    pub async fn dispatch(&self, actions: Vec<Action>) -> Result<Vec<ActionOutcome>, BatchError> {
        handle_actions_with(self.runner.as_ref(), &self.handlers, actions, self.config).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers)
            .field("config", &self.config)
            .finish()
    }
}
