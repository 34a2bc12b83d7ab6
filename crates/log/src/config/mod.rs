//! Configuration types

mod presets;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable holding the filter directive (falls back to `RUST_LOG`).
pub const LEVEL_ENV: &str = "COURIER_LOG";
/// Environment variable selecting the output [`Format`].
pub const FORMAT_ENV: &str = "COURIER_LOG_FORMAT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter directive (e.g., "info", "courier_action=debug,warn")
    pub level: String,

    /// Output format
    pub format: Format,

    /// Use ANSI colors
    pub colors: bool,

    /// Show event timestamps
    pub time: bool,

    /// Service name recorded on a root span, if set
    pub service: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            colors: true,
            time: true,
            service: None,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable, multi-line
    Pretty,
    /// Single-line output
    #[default]
    Compact,
    /// Structured JSON output
    Json,
}

impl FromStr for Format {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to [`Format::Compact`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        })
    }
}
