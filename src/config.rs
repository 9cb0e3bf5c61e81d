use std::str::FromStr;

use thiserror::Error;

use crate::trigger::DEFAULT_LEADERBOARD_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("{key} environment variable has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Server settings, read from `.env` and the process environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Entries kept per ranking record.
    pub leaderboard_size: usize,
    /// Total attempts for one write event before it is dropped.
    pub trigger_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Ok(Self {
            database_url: dotenv::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: var_or("DATABASE_MAX_CONNECTIONS", 10)?,
            leaderboard_size: var_or("LEADERBOARD_SIZE", DEFAULT_LEADERBOARD_SIZE)?,
            trigger_max_attempts: var_or("TRIGGER_MAX_ATTEMPTS", 3)?,
        })
    }
}

fn var_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match dotenv::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
