//! Configuration presets for common scenarios

use super::{Config, FORMAT_ENV, Format, LEVEL_ENV};

impl Config {
    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // COURIER_LOG wins over RUST_LOG
        if let Some(level) = lookup(LEVEL_ENV).or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup(FORMAT_ENV) {
            config.format = format.parse().unwrap_or_default();
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            colors: false,
            ..Self::default()
        }
    }

    /// Test configuration (compact, no colors or timestamps)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            colors: false,
            time: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn courier_log_wins_over_rust_log() {
        let config = Config::from_lookup(vars(&[
            ("COURIER_LOG", "courier_action=trace"),
            ("RUST_LOG", "warn"),
        ]));
        assert_eq!(config.level, "courier_action=trace");
    }

    #[test]
    fn falls_back_to_rust_log() {
        let config = Config::from_lookup(vars(&[("RUST_LOG", "warn")]));
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reads_format() {
        let config = Config::from_lookup(vars(&[("COURIER_LOG_FORMAT", "json")]));
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn empty_environment_is_default() {
        assert_eq!(Config::from_lookup(vars(&[])), Config::default());
    }

    #[test]
    fn presets_differ_in_format() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::production().format, Format::Json);
        assert!(!Config::test().time);
    }
}
