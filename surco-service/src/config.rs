//! Service Configuration
//!
//! Loaded from environment variables with defaults suited to development.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use surco_context::ContextConfig;
use surco_core::ConfigError;
use surco_ratelimit::{RateWindow, RateWindowConfig, GENERATE_ENDPOINT, SAVE_ENDPOINT};
use surco_strategy::StrategyEngineConfig;

pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "compact" | "text" => Ok(Self::Compact),
            other => Err(ConfigError::InvalidValue {
                field: "SURCO_LOG_FORMAT".to_string(),
                value: other.to_string(),
                reason: "expected \"json\" or \"compact\"".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Directory holding the `durango-*.md` sector documents
    pub docs_dir: PathBuf,
    pub rate_limits: RateWindowConfig,
    pub strategy: StrategyEngineConfig,
    pub context: ContextConfig,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from(DEFAULT_DOCS_DIR),
            rate_limits: RateWindowConfig::default(),
            strategy: StrategyEngineConfig::default(),
            context: ContextConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    /// Create ServiceConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SURCO_DOCS_DIR`: Sector documents directory (default: docs)
    /// - `SURCO_RATE_LIMIT_GENERATE_MAX`: /generate quota (default: 20)
    /// - `SURCO_RATE_LIMIT_GENERATE_WINDOW_SECS`: /generate window (default: 3600)
    /// - `SURCO_RATE_LIMIT_SAVE_MAX`: /save quota (default: 100)
    /// - `SURCO_RATE_LIMIT_SAVE_WINDOW_SECS`: /save window (default: 3600)
    /// - `SURCO_STRATEGY_MODEL`: Model for strategy decisions
    /// - `SURCO_STRATEGY_MAX_TOKENS`: Output bound (default: 512)
    /// - `SURCO_STRATEGY_TEMPERATURE`: Sampling temperature (default: 0.7)
    /// - `SURCO_LOG_FORMAT`: "json" or "compact" (default: json)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let default_generate = window_or(&defaults.rate_limits, GENERATE_ENDPOINT, 20, 3600);
        let default_save = window_or(&defaults.rate_limits, SAVE_ENDPOINT, 100, 3600);

        let generate = RateWindow {
            max_requests: parse_var(&lookup, "SURCO_RATE_LIMIT_GENERATE_MAX", default_generate.max_requests)?,
            window_seconds: parse_var(
                &lookup,
                "SURCO_RATE_LIMIT_GENERATE_WINDOW_SECS",
                default_generate.window_seconds,
            )?,
            discipline: default_generate.discipline,
        };
        let save = RateWindow {
            max_requests: parse_var(&lookup, "SURCO_RATE_LIMIT_SAVE_MAX", default_save.max_requests)?,
            window_seconds: parse_var(
                &lookup,
                "SURCO_RATE_LIMIT_SAVE_WINDOW_SECS",
                default_save.window_seconds,
            )?,
            discipline: default_save.discipline,
        };

        let strategy = StrategyEngineConfig {
            model: lookup("SURCO_STRATEGY_MODEL")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.strategy.model),
            max_tokens: parse_var(&lookup, "SURCO_STRATEGY_MAX_TOKENS", defaults.strategy.max_tokens)?,
            temperature: parse_var(
                &lookup,
                "SURCO_STRATEGY_TEMPERATURE",
                defaults.strategy.temperature,
            )?,
        };

        Ok(Self {
            docs_dir: lookup("SURCO_DOCS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.docs_dir),
            rate_limits: RateWindowConfig::empty()
                .with_window(GENERATE_ENDPOINT, generate)
                .with_window(SAVE_ENDPOINT, save),
            strategy,
            context: defaults.context,
            log_format: parse_var(&lookup, "SURCO_LOG_FORMAT", defaults.log_format)?,
        })
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rate_limits.validate()?;

        if self.strategy.model.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "strategy.model".to_string(),
            });
        }
        if self.strategy.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "strategy.max_tokens".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.strategy.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "strategy.temperature".to_string(),
                value: self.strategy.temperature.to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if self.context.excerpt_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "context.excerpt_chars".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn window_or(config: &RateWindowConfig, endpoint: &str, max: u32, secs: u64) -> RateWindow {
    config
        .get(endpoint)
        .copied()
        .unwrap_or_else(|| RateWindow::new(max, secs))
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            field: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use surco_ratelimit::QuotaDiscipline;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.rate_limits.get(GENERATE_ENDPOINT).unwrap().max_requests, 20);
        assert_eq!(config.strategy.model, "claude-sonnet-4-20250514");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("SURCO_DOCS_DIR", "/srv/docs"),
            ("SURCO_RATE_LIMIT_GENERATE_MAX", "5"),
            ("SURCO_RATE_LIMIT_SAVE_WINDOW_SECS", "600"),
            ("SURCO_STRATEGY_TEMPERATURE", "0.2"),
            ("SURCO_LOG_FORMAT", "compact"),
        ]))
        .unwrap();

        assert_eq!(config.docs_dir, PathBuf::from("/srv/docs"));
        let generate = config.rate_limits.get(GENERATE_ENDPOINT).unwrap();
        assert_eq!(generate.max_requests, 5);
        assert_eq!(generate.window_seconds, 3600);
        assert_eq!(generate.discipline, QuotaDiscipline::RecordOnAdmit);
        assert_eq!(config.rate_limits.get(SAVE_ENDPOINT).unwrap().window_seconds, 600);
        assert!((config.strategy.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_malformed_number_is_invalid_value() {
        let err = ServiceConfig::from_lookup(lookup(&[("SURCO_RATE_LIMIT_SAVE_MAX", "cien")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { field, value, .. } => {
                assert_eq!(field, "SURCO_RATE_LIMIT_SAVE_MAX");
                assert_eq!(value, "cien");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_log_format() {
        assert!(ServiceConfig::from_lookup(lookup(&[("SURCO_LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_quota() {
        let config =
            ServiceConfig::from_lookup(lookup(&[("SURCO_RATE_LIMIT_GENERATE_MAX", "0")])).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_window_from_env() {
        let config = ServiceConfig::from_lookup(lookup(&[(
            "SURCO_RATE_LIMIT_GENERATE_WINDOW_SECS",
            "10000000000000000",
        )]))
        .unwrap();
        match config.validate().unwrap_err() {
            ConfigError::InvalidValue { field, .. } => {
                assert_eq!(field, "rate_limit[/generate].window_seconds");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_temperature_out_of_range() {
        let mut config = ServiceConfig::default();
        config.strategy.temperature = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("strategy.temperature"));
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let config = ServiceConfig::from_lookup(lookup(&[("SURCO_STRATEGY_MODEL", "  ")])).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequired { .. })
        ));
    }
}
