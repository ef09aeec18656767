use crate::app_config::AppConfig;
use crate::ConfigError;

const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.5;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // API keys must be present and non-blank; a blank key is a configuration
    // failure rather than something each provider call discovers.
    let require_secret = |var: &str| -> Result<String, ConfigError> {
        let value = lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))?;
        if value.trim().is_empty() {
            return Err(ConfigError::EmptyEnvVar(var.to_string()));
        }
        Ok(value.trim().to_string())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_temperature = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !TEMPERATURE_RANGE.contains(&value) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!(
                    "{value} is outside {}..={}",
                    TEMPERATURE_RANGE.start(),
                    TEMPERATURE_RANGE.end()
                ),
            });
        }
        Ok(value)
    };

    let serpapi_api_key = require_secret("SERPAPI_API_KEY")?;
    let mistral_api_key = require_secret("MISTRAL_API_KEY")?;

    let log_level = or_default("NEWSMOOD_LOG_LEVEL", "info");

    let search_engine = or_default("NEWSMOOD_SEARCH_ENGINE", "google");
    let serpapi_base_url = optional("NEWSMOOD_SERPAPI_BASE_URL");

    let mistral_model = or_default("NEWSMOOD_MISTRAL_MODEL", "mistral-large-latest");
    let mistral_base_url = optional("NEWSMOOD_MISTRAL_BASE_URL");
    let temperature = parse_temperature("NEWSMOOD_TEMPERATURE", "0")?;

    let request_timeout_secs = parse_u64("NEWSMOOD_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        log_level,
        serpapi_api_key,
        serpapi_base_url,
        search_engine,
        mistral_api_key,
        mistral_base_url,
        mistral_model,
        temperature,
        request_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
