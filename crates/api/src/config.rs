//! Process configuration read from environment variables.

use std::net::SocketAddr;

use shopcart_observability::{LogFormat, ParseLogFormatError};
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "SHOPCART_BIND_ADDR";
pub const SEED_VAR: &str = "SHOPCART_SEED";
pub const LOG_FORMAT_VAR: &str = "SHOPCART_LOG_FORMAT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    BindAddr { var: &'static str, value: String },

    #[error("{var}: expected true/false, got {value:?}")]
    Flag { var: &'static str, value: String },

    #[error("SHOPCART_LOG_FORMAT: {0}")]
    LogFormat(#[from] ParseLogFormatError),
}

/// Runtime settings for the API binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Start with the demo catalog and carts.
    pub seed: bool,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            seed: true,
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from any variable source (unset variables use defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw.trim().parse().map_err(|_| ConfigError::BindAddr {
            var: BIND_ADDR_VAR,
            value: bind_raw.clone(),
        })?;

        let seed = match lookup(SEED_VAR) {
            None => true,
            Some(raw) => parse_flag(SEED_VAR, &raw)?,
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            None => LogFormat::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(Self {
            bind_addr,
            seed,
            log_format,
        })
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Flag {
            var,
            value: raw.to_string(),
        }),
    }
}
