use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use crate::error::ActionError;

/// Normalized outcome of one dispatched action.
///
/// Serializes as `{"success": true, "payload": ...}` or
/// `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The handler resolved.
    Success {
        /// The resolved value.
        payload: Value,
    },
    /// The handler or runner failed; other actions were unaffected.
    Failure {
        /// Why this action failed.
        error: ActionError,
    },
}

impl ActionOutcome {
    /// Create a success outcome.
    pub fn success(payload: impl Into<Value>) -> Self {
        Self::Success {
            payload: payload.into(),
        }
    }

    /// Create a failure outcome.
    pub fn failure(error: ActionError) -> Self {
        Self::Failure { error }
    }

    /// Returns `true` for [`ActionOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The resolved payload, if successful.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success { payload } => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// The error, if failed.
    pub fn error(&self) -> Option<&ActionError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Convert back into a `Result`.
    pub fn into_result(self) -> Result<Value, ActionError> {
        match self {
            Self::Success { payload } => Ok(payload),
            Self::Failure { error } => Err(error),
        }
    }
}

impl From<Result<Value, ActionError>> for ActionOutcome {
    fn from(result: Result<Value, ActionError>) -> Self {
        match result {
            Ok(payload) => Self::Success { payload },
            Err(error) => Self::Failure { error },
        }
    }
}

impl Serialize for ActionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ActionOutcome", 2)?;
        match self {
            Self::Success { payload } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("payload", payload)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
