//! Dispatch configuration.

use serde::{Deserialize, Serialize};

/// Environment variable read by [`DispatchConfig::from_env`].
pub const MAX_IN_FLIGHT_ENV: &str = "COURIER_MAX_IN_FLIGHT";

/// Controls how a batch is driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum number of actions resolving at the same time.
    ///
    /// `0` means no limit. `1` resolves actions strictly one after another.
    /// Outcomes keep input order either way.
    pub max_in_flight: usize,
}

impl DispatchConfig {
    /// Every action in flight at once.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// One action at a time.
    pub fn sequential() -> Self {
        Self { max_in_flight: 1 }
    }

    /// At most `max_in_flight` actions at once (`0` = unbounded).
    pub fn bounded(max_in_flight: usize) -> Self {
        Self { max_in_flight }
    }

    /// Read overrides from `COURIER_MAX_IN_FLIGHT`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(MAX_IN_FLIGHT_ENV) {
            match parse_max_in_flight(&raw) {
                Some(n) => config.max_in_flight = n,
                None => tracing::warn!(
                    env = MAX_IN_FLIGHT_ENV,
                    value = %raw,
                    "ignoring invalid dispatch limit"
                ),
            }
        }
        config
    }

    /// Whether actions are resolved one at a time.
    pub fn is_sequential(&self) -> bool {
        self.max_in_flight == 1
    }
}

fn parse_max_in_flight(raw: &str) -> Option<usize> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "unbounded" | "" => Some(0),
        "sequential" => Some(1),
        n => n.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("4", Some(4))]
    #[case(" 0 ", Some(0))]
    #[case("sequential", Some(1))]
    #[case("Unbounded", Some(0))]
    #[case("", Some(0))]
    #[case("-1", None)]
    #[case("lots", None)]
    fn parses_max_in_flight(#[case] raw: &str, #[case] expected: Option<usize>) {
        assert_eq!(parse_max_in_flight(raw), expected);
    }

    #[test]
    fn presets() {
        assert_eq!(DispatchConfig::default().max_in_flight, 0);
        assert!(DispatchConfig::sequential().is_sequential());
        assert_eq!(DispatchConfig::bounded(8), DispatchConfig { max_in_flight: 8 });
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: DispatchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DispatchConfig::unbounded());

        let config: DispatchConfig = serde_json::from_str(r#"{"max_in_flight": 3}"#).unwrap();
        assert_eq!(config.max_in_flight, 3);
    }
}
