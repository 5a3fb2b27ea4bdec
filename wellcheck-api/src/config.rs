use std::{env, str::FromStr};

use chrono::Duration;
use dotenv::dotenv;

#[derive(Debug, thiserror::Error)]
#[error("invalid value \"{value}\" for {name}")]
pub struct ConfigError {
    name: &'static str,
    value: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub bind_port: u16,
    pub session_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        let session_ttl_hours: i64 = var_or("SESSION_TTL_HOURS", 24)?;

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_owned()),
            bind_port: var_or("BIND_PORT", 8080)?,
            session_ttl: Duration::hours(session_ttl_hours),
        })
    }
}

fn var_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError { name, value }),
        Err(_) => Ok(default),
    }
}
