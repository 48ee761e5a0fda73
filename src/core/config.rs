//! Advisor configuration with documented defaults
//!
//! Every section falls back to its `Default` so a partial TOML file (or no
//! file at all) produces a usable configuration.

use crate::advisor::scoring::ScoreWeights;
use crate::core::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the game service bearer token
pub const BEARER_ENV: &str = "GIGAVERSE_BEARER";

/// Connection settings for the game service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the game service API, without a trailing slash
    pub base_url: String,
    /// Bearer token sent with every request. Unauthenticated when absent.
    pub bearer_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gigaverse.io/api".to_string(),
            bearer_token: None,
        }
    }
}

impl ApiConfig {
    /// Fill the token from the environment if the file did not set one
    pub fn with_env_token(mut self) -> Self {
        if self.bearer_token.is_none() {
            self.bearer_token = std::env::var(BEARER_ENV).ok().filter(|t| !t.is_empty());
        }
        self
    }
}

/// Polling loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Seconds between successful polls
    pub interval_secs: u64,
    /// Seconds to wait after a failed poll before trying again
    pub error_backoff_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            error_backoff_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// JSON file the session's snapshots are written to
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("game_history.json"),
        }
    }
}

/// Complete advisor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub api: ApiConfig,
    pub poll: PollConfig,
    pub history: HistoryConfig,
    pub scoring: ScoreWeights,
}

impl AdvisorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AdvisorConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AdvisorError::Config("api.base_url must not be empty".into()));
        }

        if self.poll.interval_secs == 0 {
            return Err(AdvisorError::Config(
                "poll.interval_secs must be at least 1".into(),
            ));
        }

        let scoring = &self.scoring;
        for (name, value) in [
            ("damage_dealt_weight", scoring.damage_dealt_weight),
            ("damage_taken_weight", scoring.damage_taken_weight),
            ("finisher_bonus", scoring.finisher_bonus),
            ("charge_denominator", scoring.charge_denominator),
        ] {
            if !value.is_finite() {
                return Err(AdvisorError::Config(format!(
                    "scoring.{} ({}) must be a finite number",
                    name, value
                )));
            }
        }

        if scoring.charge_denominator <= 0.0 {
            return Err(AdvisorError::Config(format!(
                "scoring.charge_denominator ({}) must be positive",
                scoring.charge_denominator
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AdvisorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll.interval_secs, 2);
        assert_eq!(config.poll.error_backoff_secs, 5);
        assert_eq!(config.history.path, PathBuf::from("game_history.json"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AdvisorConfig::from_toml(
            r#"
            [poll]
            interval_secs = 10

            [api]
            bearer_token = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.poll.interval_secs, 10);
        assert_eq!(config.poll.error_backoff_secs, 5);
        assert_eq!(config.api.bearer_token.as_deref(), Some("abc"));
        assert_eq!(config.api.base_url, "https://gigaverse.io/api");
        assert_eq!(config.scoring.finisher_bonus, 5.0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = AdvisorConfig::default();
        config.poll.interval_secs = 0;
        assert!(matches!(config.validate(), Err(AdvisorError::Config(_))));
    }

    #[test]
    fn test_zero_charge_denominator_rejected() {
        let mut config = AdvisorConfig::default();
        config.scoring.charge_denominator = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_charge_denominator_rejected() {
        let config = AdvisorConfig::from_toml("[scoring]\ncharge_denominator = nan").unwrap();
        assert!(config.scoring.charge_denominator.is_nan());
        assert!(matches!(config.validate(), Err(AdvisorError::Config(_))));
    }

    #[test]
    fn test_infinite_weights_rejected() {
        let config = AdvisorConfig::from_toml("[scoring]\ndamage_dealt_weight = inf").unwrap();
        assert!(matches!(config.validate(), Err(AdvisorError::Config(_))));

        let mut config = AdvisorConfig::default();
        config.scoring.finisher_bonus = f64::NEG_INFINITY;
        assert!(config.validate().is_err());

        let mut config = AdvisorConfig::default();
        config.scoring.charge_denominator = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        let result = AdvisorConfig::from_toml("[poll\ninterval_secs = ");
        assert!(matches!(result, Err(AdvisorError::TomlError(_))));
    }

    #[test]
    fn test_explicit_token_wins_over_env() {
        let api = ApiConfig {
            bearer_token: Some("from-file".into()),
            ..ApiConfig::default()
        };
        assert_eq!(api.with_env_token().bearer_token.as_deref(), Some("from-file"));
    }
}
