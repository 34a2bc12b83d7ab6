//! Logger builder implementation

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the root span entered
///
/// Drop it when the process is done logging.
#[derive(Debug)]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

/// Installs `$filter` + `$layer` as the global subscriber, stripping
/// timestamps when `$time` is false.
macro_rules! install {
    ($filter:expr, $layer:expr, $time:expr) => {{
        let layer = $layer;
        if $time {
            Registry::default().with($filter).with(layer).try_init()
        } else {
            Registry::default()
                .with($filter)
                .with(layer.without_time())
                .try_init()
        }
    }};
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// The config this builder will apply
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the filter directive cannot be parsed
    /// - a global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            directive: self.config.level.clone(),
            reason: e.to_string(),
        })?;

        let colors = self.config.colors;
        let installed = match self.config.format {
            Format::Pretty => install!(
                filter,
                fmt::layer()
                    .pretty()
                    .with_ansi(colors)
                    .with_writer(std::io::stderr),
                self.config.time
            ),
            Format::Compact => install!(
                filter,
                fmt::layer()
                    .compact()
                    .with_ansi(colors)
                    .with_writer(std::io::stderr),
                self.config.time
            ),
            Format::Json => install!(
                filter,
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
                self.config.time
            ),
        };
        installed.map_err(|e| LogError::Init(e.to_string()))?;

        let root_span = self
            .config
            .service
            .as_deref()
            .map(|service| tracing::info_span!("app", service).entered());

        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}

impl LoggerGuard {
    /// A guard that holds nothing
    pub(crate) fn noop() -> Self {
        Self { _root_span: None }
    }
}
