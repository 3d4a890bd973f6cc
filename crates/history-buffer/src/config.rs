/// Configuration for history buffers: capacity bound and how to load it.
use std::num::NonZeroUsize;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the capacity in `from_env`.
pub const CAPACITY_ENV_VAR: &str = "HISTORY_BUFFER_CAPACITY";

/// Configuration for a `HistoryBuffer`.
///
/// A zero capacity cannot be represented; JSON with `"capacity": 0` fails
/// to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of remembered items. `None` = unbounded.
    pub capacity: Option<NonZeroUsize>,
}

impl HistoryConfig {
    /// Unbounded history.
    pub fn unbounded() -> Self {
        Self { capacity: None }
    }

    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }

    /// Parses a config from a JSON string. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the capacity is zero.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse history config")
    }

    /// Serializes the config as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize history config")
    }

    /// Reads a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read history config: {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid history config: {}", path.display()))
    }

    /// Reads a config from `path`, returning defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default history config: {e:#}");
                Self::default()
            }
        }
    }

    /// Builds a config from the `HISTORY_BUFFER_CAPACITY` environment variable.
    ///
    /// Unset means unbounded. Values that are not a positive integer are
    /// ignored with a warning.
    pub fn from_env() -> Self {
        let Ok(raw) = std::env::var(CAPACITY_ENV_VAR) else {
            return Self::default();
        };
        match raw.trim().parse::<NonZeroUsize>() {
            Ok(capacity) => Self::bounded(capacity),
            Err(e) => {
                tracing::warn!("Ignoring {CAPACITY_ENV_VAR}={raw:?}: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(HistoryConfig::default().capacity, None);
        assert_eq!(HistoryConfig::default(), HistoryConfig::unbounded());
    }

    #[test]
    fn test_from_json_with_capacity() {
        let config = HistoryConfig::from_json(r#"{ "capacity": 25 }"#).expect("parse");
        assert_eq!(config.capacity, Some(nz(25)));
    }

    #[test]
    fn test_from_json_missing_fields_use_defaults() {
        let config = HistoryConfig::from_json("{}").expect("parse");
        assert_eq!(config, HistoryConfig::default());
    }

    #[test]
    fn test_from_json_null_capacity_is_unbounded() {
        let config = HistoryConfig::from_json(r#"{ "capacity": null }"#).expect("parse");
        assert_eq!(config.capacity, None);
    }

    #[test]
    fn test_from_json_rejects_zero_capacity() {
        assert!(HistoryConfig::from_json(r#"{ "capacity": 0 }"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_negative_capacity() {
        assert!(HistoryConfig::from_json(r#"{ "capacity": -3 }"#).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = HistoryConfig::bounded(nz(3));
        let json = config.to_json().expect("serialize");
        assert_eq!(HistoryConfig::from_json(&json).expect("parse"), config);
    }

    #[test]
    fn test_load_and_load_or_default() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{ "capacity": 4 }"#).expect("write");
        assert_eq!(HistoryConfig::load(&good).expect("load").capacity, Some(nz(4)));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").expect("write");
        assert!(HistoryConfig::load(&bad).is_err());
        assert_eq!(HistoryConfig::load_or_default(&bad), HistoryConfig::default());

        let missing = dir.path().join("missing.json");
        assert!(HistoryConfig::load(&missing).is_err());
        assert_eq!(HistoryConfig::load_or_default(&missing), HistoryConfig::default());
    }

    #[test]
    fn test_from_env() {
        // Save and restore env var
        let original = std::env::var(CAPACITY_ENV_VAR).ok();

        std::env::set_var(CAPACITY_ENV_VAR, "12");
        assert_eq!(HistoryConfig::from_env().capacity, Some(nz(12)));

        std::env::set_var(CAPACITY_ENV_VAR, "0");
        assert_eq!(HistoryConfig::from_env().capacity, None);

        std::env::set_var(CAPACITY_ENV_VAR, "lots");
        assert_eq!(HistoryConfig::from_env().capacity, None);

        std::env::remove_var(CAPACITY_ENV_VAR);
        assert_eq!(HistoryConfig::from_env().capacity, None);

        // Restore
        match original {
            Some(val) => std::env::set_var(CAPACITY_ENV_VAR, val),
            None => std::env::remove_var(CAPACITY_ENV_VAR),
        }
    }
}
