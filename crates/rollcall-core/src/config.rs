use std::path::Path;

use serde::Deserialize;

use crate::app_config::AppConfig;
use crate::classifier::{DEFAULT_PRODUCT_B_PREFIX, MAX_SAMPLE_SIZE};
use crate::waiver::DEFAULT_FEE_WAIVER_TAG_ID;
use crate::ConfigError;

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Largest page size the Intercom search endpoint accepts.
const MAX_PAGE_SIZE: u32 = 150;

/// Credentials that may be kept in a local JSON file instead of the
/// environment. Environment variables always win.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub intercom_token: Option<String>,
    pub coda_webhook_url: Option<String>,
    pub coda_api_token: Option<String>,
}

/// Load application configuration from `.env`, the environment, and the
/// optional JSON credentials file.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the credentials file exists
/// but cannot be read or parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process plus the credentials file named by `ROLLCALL_CONFIG_PATH`.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or the credentials file exists
/// but cannot be read or parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    let path = std::env::var("ROLLCALL_CONFIG_PATH")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let file = load_config_file(Path::new(&path))?;
    build_app_config(|key| std::env::var(key), &file)
}

/// Reads the JSON credentials file. A missing file yields an empty config.
///
/// # Errors
///
/// Returns [`ConfigError::ConfigFileIo`] for read failures other than
/// not-found and [`ConfigError::ConfigFileParse`] for malformed JSON.
pub fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => {
            return Err(ConfigError::ConfigFileIo {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Build application configuration using the provided env-var lookup function.
///
/// Pure parsing/validation, decoupled from the real environment so tests can
/// drive it with a `HashMap`.
fn build_app_config<F>(lookup: F, file: &FileConfig) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let intercom_token = optional("INTERCOM_TOKEN").or_else(|| file.intercom_token.clone());
    let coda_webhook_url = optional("CODA_WEBHOOK_URL").or_else(|| file.coda_webhook_url.clone());
    let coda_api_token = optional("CODA_API_TOKEN").or_else(|| file.coda_api_token.clone());

    let intercom_api_url = or_default("INTERCOM_API_URL", "https://api.intercom.io");
    let log_level = or_default("ROLLCALL_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("ROLLCALL_REQUEST_TIMEOUT_SECS", "30")?;

    let page_size = parse_u32("ROLLCALL_PAGE_SIZE", "150")?;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(invalid(
            "ROLLCALL_PAGE_SIZE",
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        ));
    }

    let max_rate_limit_retries = parse_u32("ROLLCALL_MAX_RATE_LIMIT_RETRIES", "5")?;
    let fee_waiver_tag_id = or_default("ROLLCALL_FEE_WAIVER_TAG_ID", DEFAULT_FEE_WAIVER_TAG_ID);
    let product_b_prefix = or_default("ROLLCALL_PRODUCT_B_PREFIX", DEFAULT_PRODUCT_B_PREFIX);
    let tag_name = or_default("ROLLCALL_TAG_NAME", "Recently Active on 7S1 Only");

    let tag_batch_size = parse_usize("ROLLCALL_TAG_BATCH_SIZE", "50")?;
    if tag_batch_size == 0 {
        return Err(invalid(
            "ROLLCALL_TAG_BATCH_SIZE",
            "must be greater than zero".to_string(),
        ));
    }
    let tag_batch_delay_ms = parse_u64("ROLLCALL_TAG_BATCH_DELAY_MS", "2000")?;

    let sample_size = parse_usize("ROLLCALL_SAMPLE_SIZE", "10")?.min(MAX_SAMPLE_SIZE);
    let sample_seed = optional("ROLLCALL_SAMPLE_SEED")
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| invalid("ROLLCALL_SAMPLE_SEED", e.to_string()))
        })
        .transpose()?;

    Ok(AppConfig {
        intercom_token,
        intercom_api_url,
        coda_webhook_url,
        coda_api_token,
        log_level,
        request_timeout_secs,
        page_size,
        max_rate_limit_retries,
        fee_waiver_tag_id,
        product_b_prefix,
        tag_name,
        tag_batch_size,
        tag_batch_delay_ms,
        sample_size,
        sample_seed,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
