use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, OutputFormat};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "Zepto/14.8.0 (Android 13; Pixel 7)";

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
/// Unlike [`load_app_config`], this does NOT load `.env` files, for use in tests
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
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
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

    let base_url = require("QCAT_BASE_URL")?;
    let categories_endpoint = or_default("QCAT_CATEGORIES_ENDPOINT", "/categories");
    let products_endpoint = or_default("QCAT_PRODUCTS_ENDPOINT", "/products");

    let latitude: f64 = parse_var(&lookup, "QCAT_LATITUDE", "12.9716")?;
    let longitude: f64 = parse_var(&lookup, "QCAT_LONGITUDE", "77.5946")?;
    let log_level = or_default("QCAT_LOG_LEVEL", "info");

    let user_agent = or_default("QCAT_USER_AGENT", DEFAULT_USER_AGENT);
    let app_version = or_default("QCAT_APP_VERSION", "14.8.0");
    let platform = or_default("QCAT_PLATFORM", "android");

    let request_timeout_secs: u64 = parse_var(&lookup, "QCAT_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "QCAT_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let rate_limit_delay_ms: u64 = parse_var(&lookup, "QCAT_RATE_LIMIT_DELAY_MS", "500")?;
    let backoff_unit_ms: u64 = parse_var(&lookup, "QCAT_BACKOFF_UNIT_MS", "1000")?;
    let max_retries: u32 = parse_var(&lookup, "QCAT_MAX_RETRIES", "3")?;
    let products_per_page: u32 = parse_var(&lookup, "QCAT_PRODUCTS_PER_PAGE", "50")?;
    if products_per_page == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "QCAT_PRODUCTS_PER_PAGE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }
    let max_pages: u32 = parse_var(&lookup, "QCAT_MAX_PAGES", "0")?;

    let categories = parse_category_list(&or_default("QCAT_CATEGORIES", ""));
    let output_format: OutputFormat = parse_var(&lookup, "QCAT_OUTPUT_FORMAT", "both")?;
    let output_dir = PathBuf::from(or_default("QCAT_OUTPUT_DIR", "./output"));
    let file_prefix = or_default("QCAT_FILE_PREFIX", "zepto");
    let download_images = parse_bool(
        "QCAT_DOWNLOAD_IMAGES",
        &or_default("QCAT_DOWNLOAD_IMAGES", "false"),
    )?;
    let image_dir = PathBuf::from(or_default("QCAT_IMAGE_DIR", "./images"));

    Ok(AppConfig {
        base_url,
        categories_endpoint,
        products_endpoint,
        latitude,
        longitude,
        log_level,
        user_agent,
        app_version,
        platform,
        request_timeout_secs,
        rate_limit_delay_ms,
        backoff_unit_ms,
        max_retries,
        products_per_page,
        max_pages,
        categories,
        output_format,
        output_dir,
        file_prefix,
        download_images,
        image_dir,
    })
}

fn parse_var<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(var).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Accepts the usual spellings of a boolean flag (`true/false`, `1/0`,
/// `yes/no`, `on/off`), case-insensitively.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{other}' is not a boolean"),
        }),
    }
}

/// Splits a comma-separated category allow-list, dropping blank entries.
fn parse_category_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
