use serde::{Deserialize, Serialize};

/// Error reported for a single action whose handler or runner failed.
///
/// These never abort a batch: the dispatcher records them in the action's
/// [`ActionOutcome`](crate::ActionOutcome) slot and keeps going.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ActionError {
    /// The handler rejected the action.
    #[error("{error}")]
    Failed {
        /// Human-readable error message.
        error: String,
        /// Optional structured details about the failure.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<serde_json::Value>,
    },

    /// The action's payload did not have the shape the handler expects.
    #[error("validation: {error}")]
    Validation {
        /// What was wrong with the payload.
        error: String,
    },

    /// A `call` action reached a runner without a task to execute.
    #[error("call action has no task to run")]
    MissingTask,

    /// The handler or runner panicked while resolving the action.
    #[error("handler panicked: {error}")]
    Panicked {
        /// The panic message, if it was a string.
        error: String,
    },
}

impl ActionError {
    /// Create a plain failure.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed {
            error: msg.into(),
            details: None,
        }
    }

    /// Create a failure with structured details.
    pub fn failed_with_details(msg: impl Into<String>, details: serde_json::Value) -> Self {
        Self::Failed {
            error: msg.into(),
            details: Some(details),
        }
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation { error: msg.into() }
    }

    pub(crate) fn panicked(msg: impl Into<String>) -> Self {
        Self::Panicked { error: msg.into() }
    }

    /// Extract the structured details, if present.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Failed { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

/// Why a batch could not be dispatched at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// No handler is registered for the action type, and it is not a `call`
    /// action the runner could pick up.
    #[error("\"{0}\" is not a registered plugin.")]
    PluginNotRegistered(String),
}

/// Batch-level rejection of [`handle_actions`](crate::handle_actions).
///
/// Raised before any handler runs. The underlying cause is kept in
/// [`error`](Self::error).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("action #{index} rejected the batch: {error}")]
pub struct BatchError {
    /// Position of the offending action in the input sequence.
    pub index: usize,
    /// The underlying cause.
    #[source]
    pub error: DispatchError,
}
