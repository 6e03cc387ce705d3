//! Configuration module for the strategy engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the decision core and its binary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use strategy_engine::config::{Config, load_config};
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("min OI: {}", config.selection.min_open_interest);
//! ```

mod exits;
mod liquidity;
mod observability;
mod pipeline;
mod risk;
mod selection;
mod strategies;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use exits::ExitsConfig;
pub use liquidity::LiquidityConfig;
pub use observability::{LoggingConfig, MetricsSettings, ObservabilityConfig};
pub use pipeline::PipelineConfig;
pub use risk::RiskConfig;
pub use selection::SelectionConfig;
pub use strategies::StrategiesConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Strike selection.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Liquidity scoring.
    #[serde(default)]
    pub liquidity: LiquidityConfig,
    /// Strategy construction.
    #[serde(default)]
    pub strategies: StrategiesConfig,
    /// Risk rating and position sizing.
    #[serde(default)]
    pub risk: RiskConfig,
    /// Exit parameters per category.
    #[serde(default)]
    pub exits: ExitsConfig,
    /// Batch pipeline.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

fn fraction(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{name} must be between 0.0 and 1.0"
        )))
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!("{name} must be positive")))
    }
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Selection weights
    let sel = &config.selection;
    fraction("selection.proximity_weight", sel.proximity_weight)?;
    fraction("selection.liquidity_weight", sel.liquidity_weight)?;
    if (sel.proximity_weight + sel.liquidity_weight - 1.0).abs() > 1e-6 {
        return Err(ConfigError::ValidationError(
            "selection weights must sum to 1.0".to_string(),
        ));
    }
    if sel
        .timeframe_multipliers
        .values()
        .chain(std::iter::once(&sel.default_timeframe_multiplier))
        .any(|m| m.is_sign_negative() || m.is_zero())
    {
        return Err(ConfigError::ValidationError(
            "selection timeframe multipliers must be positive".to_string(),
        ));
    }

    // Liquidity normalizers
    let liq = &config.liquidity;
    positive("liquidity.open_interest_norm", liq.open_interest_norm)?;
    positive("liquidity.volume_norm", liq.volume_norm)?;
    positive("liquidity.max_spread_pct", liq.max_spread_pct)?;
    fraction("liquidity.min_acceptable_score", liq.min_acceptable_score)?;

    // Strategy gates
    let strat = &config.strategies;
    if strat.enabled.is_empty() {
        return Err(ConfigError::ValidationError(
            "strategies.enabled must not be empty".to_string(),
        ));
    }
    positive("strategies.min_short_premium_iv", strat.min_short_premium_iv)?;
    if strat.max_long_volatility_iv <= strat.min_short_premium_iv {
        return Err(ConfigError::ValidationError(
            "strategies.max_long_volatility_iv must exceed min_short_premium_iv".to_string(),
        ));
    }
    if strat.calendar_gap_days == 0 {
        return Err(ConfigError::ValidationError(
            "strategies.calendar_gap_days must be positive".to_string(),
        ));
    }
    if strat.max_income_units == 0 {
        return Err(ConfigError::ValidationError(
            "strategies.max_income_units must be positive".to_string(),
        ));
    }

    // Risk sizing
    let risk = &config.risk;
    positive("risk.risk_per_trade", risk.risk_per_trade)?;
    fraction("risk.risk_per_trade", risk.risk_per_trade)?;
    if risk.hard_position_limit <= rust_decimal::Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "risk.hard_position_limit must be positive".to_string(),
        ));
    }
    if risk.max_contracts == 0 {
        return Err(ConfigError::ValidationError(
            "risk.max_contracts must be positive".to_string(),
        ));
    }

    // Exit parameters
    for (category, params) in config.exits.by_category() {
        fraction(&format!("exits.{category}.profit_target_pct"), params.profit_target_pct)?;
        fraction(&format!("exits.{category}.stop_loss_pct"), params.stop_loss_pct)?;
        fraction(&format!("exits.{category}.delta_threshold"), params.delta_threshold)?;
        fraction(
            &format!("exits.{category}.assignment_threshold"),
            params.assignment_threshold,
        )?;
    }

    // Logging format
    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::exits::StrategyCategory;
    use crate::probability::ProbabilityMode;
    use crate::strategies::StrategyKind;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.selection.min_open_interest, 100);
        assert!((config.liquidity.open_interest_norm - 500.0).abs() < f64::EPSILON);
        assert!((config.strategies.min_short_premium_iv - 15.0).abs() < f64::EPSILON);
        assert_eq!(config.strategies.enabled.len(), StrategyKind::ALL.len());
        assert_eq!(config.risk.hard_position_limit, dec!(50000));
        assert_eq!(config.risk.max_contracts, 10);
        assert_eq!(config.observability.logging.format, "json");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert!((config.selection.proximity_weight - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.strategies.probability_mode, ProbabilityMode::MarketAware);
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "format: ${STRATEGY_ENGINE_TEST_NONEXISTENT_VAR:-pretty}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "format: pretty");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${STRATEGY_ENGINE_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "level: ");
    }

    #[test]
    fn test_validation_weights_must_sum_to_one() {
        let yaml = r"
selection:
  proximity_weight: 0.7
  liquidity_weight: 0.5
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for weights");
        };
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_validation_iv_gates_ordered() {
        let yaml = r"
strategies:
  min_short_premium_iv: 40
  max_long_volatility_iv: 30
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for IV gates");
        };
        assert!(err.to_string().contains("max_long_volatility_iv"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = r"
observability:
  logging:
    format: xml
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for log format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_validation_exit_fraction() {
        let yaml = r"
exits:
  neutral:
    profit_target_pct: 1.5
    stop_loss_pct: 0.5
    time_exit_dte: 21
    delta_threshold: 0.3
    vega_threshold: 0.15
    assignment_threshold: 0.7
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for exit fraction");
        };
        assert!(err.to_string().contains("exits.neutral.profit_target_pct"));
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
selection:
  min_open_interest: 250
  require_liquid_strikes: true
  timeframe_multipliers:
    "1-5 days": 0.4

liquidity:
  min_acceptable_score: 0.5

strategies:
  enabled: [LONG_CALL, BULL_PUT_SPREAD, IRON_CONDOR]
  probability_mode: DELTA_ONLY
  calendar_gap_days: 28

risk:
  default_account_size: "250000"
  risk_per_trade: 0.01
  max_contracts: 4

exits:
  income:
    profit_target_pct: 0.6
    stop_loss_pct: 0.25
    time_exit_dte: 5
    delta_threshold: 0.45
    vega_threshold: 0.1
    assignment_threshold: 0.55

pipeline:
  max_threads: 2
  max_recommendations: 5

observability:
  logging:
    level: "debug"
    format: "pretty"
  metrics:
    enabled: true
    listen_addr: "127.0.0.1:9100"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.selection.min_open_interest, 250);
        assert!(config.selection.require_liquid_strikes);
        assert_eq!(config.selection.timeframe_multiplier("1-5 days"), dec!(0.4));
        assert!((config.liquidity.min_acceptable_score - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            config.strategies.enabled,
            vec![
                StrategyKind::LongCall,
                StrategyKind::BullPutSpread,
                StrategyKind::IronCondor
            ]
        );
        assert_eq!(config.strategies.probability_mode, ProbabilityMode::DeltaOnly);
        assert_eq!(config.strategies.calendar_gap_days, 28);
        assert_eq!(config.risk.default_account_size, dec!(250000));
        assert_eq!(config.risk.max_contracts, 4);
        assert_eq!(config.exits.params(StrategyCategory::Income).time_exit_dte, 5);
        // Untouched categories keep their defaults
        assert_eq!(config.exits.params(StrategyCategory::Neutral).time_exit_dte, 21);
        assert_eq!(config.pipeline.max_threads, 2);
        assert_eq!(config.pipeline.min_parallel_jobs, 4);
        assert_eq!(config.pipeline.max_recommendations, 5);
        assert_eq!(config.observability.logging.level, "debug");
        assert!(config.observability.metrics.enabled);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "risk:\n  max_contracts: 3").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.risk.max_contracts, 3);
    }

    #[test]
    fn test_load_config_missing_file() {
        let Err(err) = load_config(Some("/nonexistent/strategy-engine.yaml")) else {
            panic!("expected read error");
        };
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
