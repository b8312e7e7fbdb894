//! Configuration module for the pegged order engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before anything is started.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pegged_order_engine::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! let fields = config.order.to_order_fields();
//! ```
//!
//! Decimal values are best quoted (`offset: "0.01"`) so YAML does not read
//! them as floats first.

mod observability;
mod order;
mod peg;
mod simulation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::Symbol;

pub use observability::{LoggingConfig, ObservabilityConfig};
pub use order::OrderConfig;
pub use peg::PegConfig;
pub use simulation::SimulationConfig;

/// Path used when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

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
    /// Order to work.
    #[serde(default)]
    pub order: OrderConfig,
    /// Peg parameters.
    #[serde(default)]
    pub peg: PegConfig,
    /// Simulated market.
    #[serde(default)]
    pub simulation: SimulationConfig,
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
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

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
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match cap.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(v)) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` naming the first invalid value.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    Symbol::new(&config.order.symbol)
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("order.symbol: {e}")))?;

    if !config.order.quantity.is_positive() {
        return Err(ConfigError::ValidationError(
            "order.quantity must be positive".to_string(),
        ));
    }

    if config.order.price.is_negative() {
        return Err(ConfigError::ValidationError(
            "order.price cannot be negative".to_string(),
        ));
    }

    if config.peg.offset.is_negative() {
        return Err(ConfigError::ValidationError(
            "peg.offset cannot be negative".to_string(),
        ));
    }

    if config.peg.order_id_prefix.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "peg.order_id_prefix cannot be empty".to_string(),
        ));
    }

    let sim = &config.simulation;
    if !sim.initial_bid.is_positive() || !sim.spread.is_positive() || !sim.tick.is_positive() {
        return Err(ConfigError::ValidationError(
            "simulation.initial_bid, spread and tick must be positive".to_string(),
        ));
    }

    if sim.step_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "simulation.step_interval_ms must be positive".to_string(),
        ));
    }

    let logging = &config.observability.logging;
    if !LoggingConfig::FORMATS
        .iter()
        .any(|format| format.eq_ignore_ascii_case(&logging.format))
    {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {:?}",
            LoggingConfig::FORMATS
        )));
    }

    Ok(())
}
