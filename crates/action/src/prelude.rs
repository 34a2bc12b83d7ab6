//! ```rust
//! use courier_action::prelude::*;
//! ```

pub use crate::action::{Action, Task, call};
pub use crate::config::DispatchConfig;
pub use crate::dispatch::{Dispatcher, handle_actions, handle_actions_with};
pub use crate::error::{ActionError, BatchError, DispatchError};
pub use crate::handler::Handler;
pub use crate::registry::HandlerRegistry;
pub use crate::result::ActionOutcome;
pub use crate::runner::{Runner, TaskRunner, TaskScope, runner_fn};
