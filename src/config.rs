//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Profiler configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the lead database lives.
    pub db_path: PathBuf,
    /// Model used for advice generation.
    pub model: String,
    /// API key for the advice provider. Absent means the fallback string is
    /// used for every session.
    pub api_key: Option<SecretString>,
    /// How long to wait for an advice completion before falling back.
    pub advice_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/fund-profiler.db"),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key: None,
            advice_timeout: Duration::from_secs(20),
        }
    }
}

impl Config {
    /// Read configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let db_path = std::env::var("FUND_PROFILER_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let model = std::env::var("FUND_PROFILER_MODEL").unwrap_or(defaults.model);

        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from);

        let advice_timeout = match std::env::var("FUND_PROFILER_ADVICE_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "FUND_PROFILER_ADVICE_TIMEOUT_SECS".to_string(),
                    message: format!("expected a number of seconds, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.advice_timeout,
        };

        Ok(Self {
            db_path,
            model,
            api_key,
            advice_timeout,
        })
    }
}
