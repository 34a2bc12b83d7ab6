/// Result type for logger operations
pub type LogResult<T> = Result<T, LogError>;

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LogError {
    /// The filter directive could not be parsed
    #[error("invalid filter `{directive}`: {reason}")]
    Filter {
        /// The directive as configured
        directive: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("failed to install subscriber: {0}")]
    Init(String),
}
