//! # Courier Log
//!
//! `tracing` subscriber setup shared by courier binaries and tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> Result<(), courier_log::LogError> {
//!     let _guard = courier_log::auto_init()?;
//!     tracing::info!(actions = 3, "dispatching");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, FORMAT_ENV, Format, LEVEL_ENV};
pub use error::{LogError, LogResult};

/// Pick a configuration from the environment and build type, then install it
///
/// `COURIER_LOG` / `RUST_LOG` select [`Config::from_env`]; otherwise debug
/// builds get [`Config::development`] and release builds
/// [`Config::production`].
pub fn auto_init() -> LogResult<LoggerGuard> {
    if std::env::var(LEVEL_ENV).is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize for tests
///
/// Safe to call from every test: when a subscriber is already installed this
/// returns a guard that holds nothing.
pub fn init_test() -> LogResult<LoggerGuard> {
    if tracing::dispatcher::has_been_set() {
        return Ok(LoggerGuard::noop());
    }
    init_with(Config::test())
}
