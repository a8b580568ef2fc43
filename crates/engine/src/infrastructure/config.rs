//! Environment-driven configuration.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `STOCKYARD_API_URL` | Inventory API base URL | unset (offline mode) |
//! | `STOCKYARD_SEED_PATH` | JSON snapshot used in offline mode | built-in demo tree |
//! | `STOCKYARD_CODE_SEQUENCE` | `monotonic` or `sibling-count` | `monotonic` |
//! | `STOCKYARD_REQUEST_TIMEOUT_SECS` | API request timeout | `30` |

use std::path::PathBuf;

use stockyard_domain::CodeSequence;
use url::Url;

use crate::infrastructure::inventory_api::DEFAULT_REQUEST_TIMEOUT_SECS;

pub const API_URL_VAR: &str = "STOCKYARD_API_URL";
pub const SEED_PATH_VAR: &str = "STOCKYARD_SEED_PATH";
pub const CODE_SEQUENCE_VAR: &str = "STOCKYARD_CODE_SEQUENCE";
pub const REQUEST_TIMEOUT_VAR: &str = "STOCKYARD_REQUEST_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {message}")]
    InvalidUrl { var: &'static str, message: String },

    #[error("{var} has an invalid value '{value}': {message}")]
    InvalidValue {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` means offline mode: mutations are applied locally only.
    pub api_base_url: Option<Url>,
    pub seed_path: Option<PathBuf>,
    pub code_sequence: CodeSequence,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            seed_path: None,
            code_sequence: CodeSequence::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = value(API_URL_VAR)
            .map(|raw| {
                Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
                    var: API_URL_VAR,
                    message: e.to_string(),
                })
            })
            .transpose()?;

        let code_sequence = match value(CODE_SEQUENCE_VAR) {
            Some(raw) => raw.parse().map_err(|e: stockyard_domain::DomainError| {
                ConfigError::InvalidValue {
                    var: CODE_SEQUENCE_VAR,
                    value: raw.clone(),
                    message: e.to_string(),
                }
            })?,
            None => CodeSequence::default(),
        };

        let request_timeout_secs = match value(REQUEST_TIMEOUT_VAR) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                var: REQUEST_TIMEOUT_VAR,
                value: raw.clone(),
                message: e.to_string(),
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url,
            seed_path: value(SEED_PATH_VAR).map(PathBuf::from),
            code_sequence,
            request_timeout_secs,
        })
    }

    pub fn is_offline(&self) -> bool {
        self.api_base_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_offline_monotonic() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, AppConfig::default());
        assert!(config.is_offline());
    }

    #[test]
    fn reads_all_variables() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL_VAR, "http://localhost:5000"),
            (SEED_PATH_VAR, "/tmp/seed.json"),
            (CODE_SEQUENCE_VAR, "sibling-count"),
            (REQUEST_TIMEOUT_VAR, "5"),
        ]))
        .expect("config");
        assert!(!config.is_offline());
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.code_sequence, CodeSequence::SiblingCount);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[(API_URL_VAR, "  ")])).expect("config");
        assert!(config.is_offline());
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup(&[(API_URL_VAR, "not a url")])).expect_err("url");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err =
            AppConfig::from_lookup(lookup(&[(CODE_SEQUENCE_VAR, "random")])).expect_err("sequence");
        assert!(err.to_string().contains(CODE_SEQUENCE_VAR));
    }
}
