// SPDX-License-Identifier: Apache-2.0

use navtakniq_store::DEFAULT_POOL_SIZE;
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DB_POOL_SIZE: &str = "NAVTAKNIQ_DB_POOL_SIZE";
pub const ENV_MAX_BODY_BYTES: &str = "NAVTAKNIQ_MAX_BODY_BYTES";
pub const ENV_SEED_ON_START: &str = "NAVTAKNIQ_SEED_ON_START";
pub const ENV_LOG_JSON: &str = "NAVTAKNIQ_LOG_JSON";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigErrorCode {
    MissingVariable,
    InvalidValue,
    ContractViolation,
}

impl ConfigErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingVariable => "missing_variable",
            Self::InvalidValue => "invalid_value",
            Self::ContractViolation => "contract_violation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub code: ConfigErrorCode,
    pub message: String,
}

impl ConfigError {
    #[must_use]
    pub fn new(code: ConfigErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_pool_size: usize,
    pub max_body_bytes: usize,
    pub seed_on_start: bool,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: ":memory:".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_pool_size: DEFAULT_POOL_SIZE,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            seed_on_start: true,
            log_json: false,
        }
    }
}

#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| {
        ConfigError::new(
            ConfigErrorCode::InvalidValue,
            format!("{name} has an invalid value: {raw:?}"),
        )
    })
}

impl ServerConfig {
    /// Reads settings through `lookup`, so tests never touch the process
    /// environment. Unset optional variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let database_url = lookup(ENV_DATABASE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ConfigError::new(
                    ConfigErrorCode::MissingVariable,
                    format!("{ENV_DATABASE_URL} must be set; did you forget to provision a database?"),
                )
            })?;
        let host = lookup(ENV_HOST)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.host);
        let port = match lookup(ENV_PORT) {
            Some(raw) => parse_var::<u16>(ENV_PORT, &raw)?,
            None => defaults.port,
        };
        let db_pool_size = match lookup(ENV_DB_POOL_SIZE) {
            Some(raw) => parse_var::<usize>(ENV_DB_POOL_SIZE, &raw)?,
            None => defaults.db_pool_size,
        };
        let max_body_bytes = match lookup(ENV_MAX_BODY_BYTES) {
            Some(raw) => parse_var::<usize>(ENV_MAX_BODY_BYTES, &raw)?,
            None => defaults.max_body_bytes,
        };
        let flag = |name: &str, default: bool| -> Result<bool, ConfigError> {
            match lookup(name) {
                Some(raw) => parse_bool(&raw).ok_or_else(|| {
                    ConfigError::new(
                        ConfigErrorCode::InvalidValue,
                        format!("{name} must be a boolean, got {raw:?}"),
                    )
                }),
                None => Ok(default),
            }
        };
        let config = Self {
            database_url,
            host,
            port,
            db_pool_size,
            max_body_bytes,
            seed_on_start: flag(ENV_SEED_ON_START, defaults.seed_on_start)?,
            log_json: flag(ENV_LOG_JSON, defaults.log_json)?,
        };
        validate_startup_config(&config)?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

pub fn validate_startup_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.database_url.trim().is_empty() {
        return Err(ConfigError::new(
            ConfigErrorCode::ContractViolation,
            "database url must not be empty",
        ));
    }
    if config.port == 0 {
        return Err(ConfigError::new(
            ConfigErrorCode::ContractViolation,
            "port must be > 0",
        ));
    }
    if config.db_pool_size == 0 {
        return Err(ConfigError::new(
            ConfigErrorCode::ContractViolation,
            "database pool size must be > 0",
        ));
    }
    if config.max_body_bytes == 0 {
        return Err(ConfigError::new(
            ConfigErrorCode::ContractViolation,
            "max body bytes must be > 0",
        ));
    }
    Ok(())
}
