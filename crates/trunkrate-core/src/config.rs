//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub rating: RatingConfig,

    /// Optional JSON file with trunk rating snapshots to seed the store at startup
    #[serde(default)]
    pub trunks_file: Option<String>,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Rating-engine configuration
///
/// Monetary scale and margin-health thresholds are operator-tunable
/// rather than constants baked into the aggregation code.
#[derive(Debug, Deserialize, Clone)]
pub struct RatingConfig {
    /// Decimal places for per-call monetary amounts
    #[serde(default = "default_amount_scale")]
    pub amount_scale: u32,

    /// Margin classification thresholds
    #[serde(default)]
    pub margin: MarginThresholds,
}

fn default_amount_scale() -> u32 {
    4
}

/// Margin-health classification thresholds (percentages)
///
/// A zone is CRITICAL below `critical_below`, WARNING below
/// `warning_below`, HEALTHY otherwise.
#[derive(Debug, Deserialize, Clone)]
pub struct MarginThresholds {
    #[serde(default = "default_critical_below")]
    pub critical_below: Decimal,

    #[serde(default = "default_warning_below")]
    pub warning_below: Decimal,
}

fn default_critical_below() -> Decimal {
    Decimal::from(20)
}

fn default_warning_below() -> Decimal {
    Decimal::from(40)
}

impl Default for MarginThresholds {
    fn default() -> Self {
        Self {
            critical_below: default_critical_below(),
            warning_below: default_warning_below(),
        }
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            amount_scale: default_amount_scale(),
            margin: MarginThresholds::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("rating.amount_scale", 4)?
            .set_default("rating.margin.critical_below", 20)?
            .set_default("rating.margin.warning_below", 40)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with TRUNKRATE_ prefix
            .add_source(
                Environment::with_prefix("TRUNKRATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("TRUNKRATE").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_thresholds() {
        let thresholds = MarginThresholds::default();
        assert_eq!(thresholds.critical_below, dec!(20));
        assert_eq!(thresholds.warning_below, dec!(40));
    }

    #[test]
    fn test_default_rating_config() {
        let config = RatingConfig::default();
        assert_eq!(config.amount_scale, 4);
    }
}
