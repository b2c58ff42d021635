//! Runtime configuration for the pipeline.
//!
//! Defaults suit a single-process deployment; each field can be overridden
//! from the environment:
//!
//! | variable | field |
//! |----------|-------|
//! | `FULFILLMENT_ACTOR_BUFFER` | [`PipelineConfig::actor_buffer_size`] |
//! | `FULFILLMENT_COLLABORATOR_TIMEOUT_MS` | [`PipelineConfig::collaborator_timeout`] |
//! | `FULFILLMENT_TRACKING_PREFIX` | [`PipelineConfig::tracking_prefix`] |
//! | `FULFILLMENT_PUBLIC_TRACKING_URL` | [`PipelineConfig::public_tracking_base_url`] |

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const ACTOR_BUFFER_VAR: &str = "FULFILLMENT_ACTOR_BUFFER";
pub const COLLABORATOR_TIMEOUT_VAR: &str = "FULFILLMENT_COLLABORATOR_TIMEOUT_MS";
pub const TRACKING_PREFIX_VAR: &str = "FULFILLMENT_TRACKING_PREFIX";
pub const PUBLIC_TRACKING_URL_VAR: &str = "FULFILLMENT_PUBLIC_TRACKING_URL";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Request channel capacity of every actor.
    pub actor_buffer_size: usize,
    /// Upper bound on each inventory ledger / production issuer call.
    pub collaborator_timeout: Duration,
    /// First segment of generated tracking numbers.
    pub tracking_prefix: String,
    /// Base of the public tracking page; scan references point below it.
    pub public_tracking_base_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            actor_buffer_size: 32,
            collaborator_timeout: Duration::from_millis(5000),
            tracking_prefix: "TRK".to_string(),
            public_tracking_base_url: "http://localhost:5173".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ACTOR_BUFFER_VAR) {
            config.actor_buffer_size = parse_positive(ACTOR_BUFFER_VAR, &value)?;
        }
        if let Some(value) = lookup(COLLABORATOR_TIMEOUT_VAR) {
            let millis: u64 = parse_positive(COLLABORATOR_TIMEOUT_VAR, &value)?;
            config.collaborator_timeout = Duration::from_millis(millis);
        }
        if let Some(value) = lookup(TRACKING_PREFIX_VAR) {
            let prefix = value.trim();
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ConfigError::Invalid {
                    var: TRACKING_PREFIX_VAR,
                    value,
                    reason: "expected a non-empty alphanumeric prefix".into(),
                });
            }
            config.tracking_prefix = prefix.to_ascii_uppercase();
        }
        if let Some(value) = lookup(PUBLIC_TRACKING_URL_VAR) {
            let url = value.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(ConfigError::Invalid {
                    var: PUBLIC_TRACKING_URL_VAR,
                    value,
                    reason: "expected a URL".into(),
                });
            }
            config.public_tracking_base_url = url.to_string();
        }

        Ok(config)
    }
}

fn parse_positive<N>(var: &'static str, value: &str) -> Result<N, ConfigError>
where
    N: std::str::FromStr + PartialEq + Default,
    N::Err: std::fmt::Display,
{
    let invalid = |reason: String| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    };
    let parsed = value.trim().parse::<N>().map_err(|e| invalid(e.to_string()))?;
    if parsed == N::default() {
        return Err(invalid("must be greater than zero".into()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = PipelineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.tracking_prefix, "TRK");
        assert_eq!(config.collaborator_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides_are_applied() {
        let config = PipelineConfig::from_lookup(lookup(&[
            (ACTOR_BUFFER_VAR, "8"),
            (COLLABORATOR_TIMEOUT_VAR, "250"),
            (TRACKING_PREFIX_VAR, "shp"),
            (PUBLIC_TRACKING_URL_VAR, "https://track.example.com/"),
        ]))
        .unwrap();

        assert_eq!(config.actor_buffer_size, 8);
        assert_eq!(config.collaborator_timeout, Duration::from_millis(250));
        assert_eq!(config.tracking_prefix, "SHP");
        assert_eq!(config.public_tracking_base_url, "https://track.example.com");
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        let err = PipelineConfig::from_lookup(lookup(&[(ACTOR_BUFFER_VAR, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ACTOR_BUFFER_VAR, .. }));
    }

    #[test]
    fn zero_is_rejected() {
        assert!(PipelineConfig::from_lookup(lookup(&[(ACTOR_BUFFER_VAR, "0")])).is_err());
        assert!(PipelineConfig::from_lookup(lookup(&[(COLLABORATOR_TIMEOUT_VAR, "0")])).is_err());
    }

    #[test]
    fn prefix_must_be_alphanumeric() {
        let err =
            PipelineConfig::from_lookup(lookup(&[(TRACKING_PREFIX_VAR, "TR-K")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: TRACKING_PREFIX_VAR, .. }));
    }
}
