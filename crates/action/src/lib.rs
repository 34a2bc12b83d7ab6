//! # Courier Action Dispatch
//!
//! Resolves batches of actions against a table of handlers and normalizes
//! every outcome to success or failure.
//!
//! An [`Action`] is a type tag plus a JSON payload. The tag selects a
//! [`Handler`] from a [`HandlerRegistry`]; the handler may be a fixed value,
//! a function of the action, or a shared future. Actions of the reserved
//! [`CALL`] type carry a [`Task`] and fall back to a [`Runner`] when no `call`
//! handler is registered.
//!
//! Two error channels are kept apart:
//!
//! - [`BatchError`] — an action type nobody registered. The batch is rejected
//!   before any handler runs.
//! - [`ActionError`] — a handler failed. Only that action's
//!   [`ActionOutcome`] is a failure; the rest of the batch proceeds.
//!
//! ## Quick Start
//!
//! ```rust
//! use courier_action::prelude::*;
//! use serde_json::json;
//!
//! let handlers = HandlerRegistry::new()
//!     .with("greet", Handler::sync(|action| {
//!         Ok(json!(format!("hello, {}", action.payload())))
//!     }))
//!     .with("broken", Handler::rejected(ActionError::failed("nope")));
//!
//! let outcomes = futures::executor::block_on(handle_actions(
//!     &TaskRunner,
//!     &handlers,
//!     vec![Action::new("greet", "bob"), Action::bare("broken")],
//! ))
//! .unwrap();
//!
//! assert_eq!(outcomes[0], ActionOutcome::success("hello, \"bob\""));
//! assert_eq!(outcomes[1], ActionOutcome::failure(ActionError::failed("nope")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Actions, tasks and the `call` constructor.
pub mod action;
pub mod config;
pub mod dispatch;
/// Error types for batch rejection and per-action failure.
pub mod error;
pub mod handler;
/// Convenience re-exports.
pub mod prelude;
/// Handler lookup table.
pub mod registry;
/// Normalized per-action outcomes.
pub mod result;
pub mod runner;

// ── Public re-exports ───────────────────────────────────────────────────────

pub use action::{Action, CALL, Task, TaskFuture, call};
pub use config::DispatchConfig;
pub use dispatch::{Dispatcher, handle_actions, handle_actions_with};
pub use error::{ActionError, BatchError, DispatchError};
pub use handler::{Handler, HandlerFuture};
pub use registry::HandlerRegistry;
pub use result::ActionOutcome;
pub use runner::{FnRunner, Runner, TaskRunner, TaskScope, runner_fn};
