use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_STEAM_API_URL: &str = "https://api.steampowered.com";
const DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 2;
const DEFAULT_RATE_LIMIT_BURST: u32 = 5;
const DEFAULT_SESSION_DAYS: i64 = 7;

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub app_url: String,

    /// Steam Web API key; profile linking is rejected while unset.
    pub steam_api_key: Option<String>,
    pub steam_api_url: String,

    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    pub session_days: i64,
    pub password_hash_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            app_url: optional("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            steam_api_key: optional("STEAM_API_KEY"),
            steam_api_url: optional("STEAM_API_URL")
                .unwrap_or_else(|| DEFAULT_STEAM_API_URL.to_string()),
            rate_limit_per_second: parsed("RATE_LIMIT_PER_SECOND")?
                .unwrap_or(DEFAULT_RATE_LIMIT_PER_SECOND),
            rate_limit_burst: parsed("RATE_LIMIT_BURST")?.unwrap_or(DEFAULT_RATE_LIMIT_BURST),
            session_days: parsed("SESSION_DAYS")?.unwrap_or(DEFAULT_SESSION_DAYS),
            password_hash_cost: parsed("PASSWORD_HASH_COST")?.unwrap_or(bcrypt::DEFAULT_COST),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Empty values count as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parsed<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match optional(name) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
    }
}
