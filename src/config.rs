//! Configuration loading from TOML files.

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};
use crate::gateway::HttpGateway;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    /// Access node REST endpoint.
    pub access_node_url: String,
    /// Deployed FlowWager contract address.
    pub contract_address: String,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Percentage of each pool the platform retains on distribution.
    pub platform_fee_pct: Decimal,
    pub seal_poll_interval_ms: u64,
    pub seal_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            platform_fee_pct: dec!(2.5),
            seal_poll_interval_ms: 500,
            seal_timeout_ms: 60_000,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unreadable files, TOML syntax
    /// errors, or invalid field values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.network.access_node_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "access_node_url",
            }
            .into());
        }
        url::Url::parse(&self.network.access_node_url).map_err(|err| {
            ConfigError::InvalidValue {
                field: "access_node_url",
                reason: err.to_string(),
            }
        })?;
        if self.network.contract_address.is_empty() {
            return Err(ConfigError::MissingField {
                field: "contract_address",
            }
            .into());
        }
        if self.client.platform_fee_pct < Decimal::ZERO
            || self.client.platform_fee_pct > Decimal::ONE_HUNDRED
        {
            return Err(ConfigError::InvalidValue {
                field: "platform_fee_pct",
                reason: format!("{} is outside 0..=100", self.client.platform_fee_pct),
            }
            .into());
        }
        if self.client.seal_poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "seal_poll_interval_ms",
                reason: "must be positive".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Build the production gateway described by this configuration.
    #[must_use]
    pub fn build_gateway(&self) -> HttpGateway {
        HttpGateway::new(
            self.network.access_node_url.clone(),
            Duration::from_millis(self.client.seal_poll_interval_ms),
            Duration::from_millis(self.client.seal_timeout_ms),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                access_node_url: "https://rest-mainnet.onflow.org".into(),
                contract_address: "0xFlowWager".into(),
            },
            client: ClientConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
