//! Process level settings: where the events live and where to listen.

use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./events.sqlite3";
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{key} must be a number of seconds, got {value:?}")]
    InvalidSeconds { key: &'static str, value: String },

    #[error("{key} must be a socket address like 127.0.0.1:3000, got {value:?}")]
    InvalidAddress { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub acquire_timeout: Duration,
    pub server_address: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let acquire_timeout = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| SettingsError::InvalidSeconds {
                    key: "DB_ACQUIRE_TIMEOUT_SECS",
                    value,
                })?,
        };

        let address =
            lookup("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
        let server_address: SocketAddr =
            address
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidAddress {
                    key: "SERVER_ADDRESS",
                    value: address,
                })?;

        Ok(Self {
            database_url,
            acquire_timeout,
            server_address,
        })
    }
}
