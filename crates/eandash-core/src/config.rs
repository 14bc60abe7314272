use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("EANDASH_ENV", "development"));
    let log_level = or_default("EANDASH_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("EANDASH_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("EANDASH_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("EANDASH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let seller_api_base_url = or_default(
        "EANDASH_SELLER_API_BASE_URL",
        "https://sellingpartnerapi-eu.amazon.com",
    );
    let seller_request_timeout_secs = parse_u64("EANDASH_SELLER_REQUEST_TIMEOUT_SECS", "30")?;
    let seller_user_agent = or_default("EANDASH_SELLER_USER_AGENT", "eandash/0.1 (catalog-import)");

    let import_chunk_size = parse_usize("EANDASH_IMPORT_CHUNK_SIZE", "10")?;
    if import_chunk_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "EANDASH_IMPORT_CHUNK_SIZE".to_string(),
            reason: "chunk size must be at least 1".to_string(),
        });
    }
    let import_inter_chunk_delay_ms = parse_u64("EANDASH_IMPORT_INTER_CHUNK_DELAY_MS", "1000")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        seller_api_base_url,
        seller_request_timeout_secs,
        seller_user_agent,
        import_chunk_size,
        import_inter_chunk_delay_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
