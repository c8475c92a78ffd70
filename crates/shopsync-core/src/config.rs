use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let store_handle = require("SHOPIFY_STORE_HANDLE")?;
    let access_token = require("SHOPIFY_ACCESS_TOKEN")?;
    let api_version = or_default("SHOPIFY_API_VERSION", "2024-04");

    let database_url = or_default("DATABASE_URL", "sqlite:shopify_products.db");
    let log_level = or_default("SHOPSYNC_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("SHOPSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPSYNC_USER_AGENT", "shopsync/0.1 (catalog-sync)");
    let fetch_max_attempts = parse_u32("SHOPSYNC_FETCH_MAX_ATTEMPTS", "3")?;
    let retry_delay_secs = parse_u64("SHOPSYNC_RETRY_DELAY_SECS", "2")?;

    let db_max_connections = parse_u32("SHOPSYNC_DB_MAX_CONNECTIONS", "5")?;
    let db_acquire_timeout_secs = parse_u64("SHOPSYNC_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        store_handle,
        api_version,
        access_token,
        database_url,
        log_level,
        request_timeout_secs,
        user_agent,
        fetch_max_attempts,
        retry_delay_secs,
        db_max_connections,
        db_acquire_timeout_secs,
    })
}
