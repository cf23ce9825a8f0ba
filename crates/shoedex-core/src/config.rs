use std::path::PathBuf;

use crate::app_config::{AppConfig, ScrollPolicy, Strictness};
use crate::ConfigError;

pub const DEFAULT_LISTING_URL: &str = "https://www.nike.com/vn/w/mens-shoes-nik1zy7ok";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:129.0) Gecko/20100101 Firefox/129.0";
pub const DEFAULT_OUTPUT_PATH: &str = "nike_products.json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
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
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every option has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

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

    let listing_url = or_default("SHOEDEX_LISTING_URL", DEFAULT_LISTING_URL);
    let user_agent = or_default("SHOEDEX_USER_AGENT", DEFAULT_USER_AGENT);
    let request_headers = match lookup("SHOEDEX_REQUEST_HEADERS") {
        Ok(raw) => parse_request_headers(&raw)?,
        Err(_) => Vec::new(),
    };

    let request_timeout_secs = parse_u64("SHOEDEX_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "SHOEDEX_REQUEST_TIMEOUT_SECS",
            "timeout must be at least one second".to_string(),
        ));
    }
    let request_delay_ms = parse_u64("SHOEDEX_REQUEST_DELAY_MS", "1000")?;
    let max_concurrency = match parse_usize("SHOEDEX_MAX_CONCURRENCY", "0")? {
        0 => None,
        n => Some(n),
    };
    let max_retries = parse_u32("SHOEDEX_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("SHOEDEX_RETRY_BACKOFF_BASE_SECS", "1")?;
    let strictness = parse_strictness(&or_default("SHOEDEX_STRICTNESS", "lenient"))?;

    let output_path = PathBuf::from(or_default("SHOEDEX_OUTPUT_PATH", DEFAULT_OUTPUT_PATH));
    let log_level = or_default("SHOEDEX_LOG_LEVEL", "info");
    let log_file = lookup("SHOEDEX_LOG_FILE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let webdriver_url = lookup("SHOEDEX_WEBDRIVER_URL")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let scroll = parse_scroll_policy(&or_default("SHOEDEX_SCROLL", "all"))?;
    let scroll_pause_ms = parse_u64("SHOEDEX_SCROLL_PAUSE_MS", "2000")?;

    Ok(AppConfig {
        listing_url,
        user_agent,
        request_headers,
        request_timeout_secs,
        request_delay_ms,
        max_concurrency,
        max_retries,
        retry_backoff_base_secs,
        strictness,
        output_path,
        log_level,
        log_file,
        webdriver_url,
        scroll,
        scroll_pause_ms,
    })
}

/// Parse a strictness mode name.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than `lenient` or `strict`.
pub fn parse_strictness(s: &str) -> Result<Strictness, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "lenient" => Ok(Strictness::Lenient),
        "strict" => Ok(Strictness::Strict),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOEDEX_STRICTNESS".to_string(),
            reason: format!("expected \"lenient\" or \"strict\", got \"{other}\""),
        }),
    }
}

/// Parse a scroll policy: `all` scrolls until the page stops growing, a
/// number scrolls exactly that many times.
fn parse_scroll_policy(s: &str) -> Result<ScrollPolicy, ConfigError> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(ScrollPolicy::UntilStable);
    }
    trimmed
        .parse::<u32>()
        .map(ScrollPolicy::Times)
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "SHOEDEX_SCROLL".to_string(),
            reason: format!("expected \"all\" or a scroll count: {e}"),
        })
}

/// Parse `Name: value` pairs separated by `;`. Empty segments are ignored.
fn parse_request_headers(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (name, value) =
                segment
                    .split_once(':')
                    .ok_or_else(|| ConfigError::InvalidEnvVar {
                        var: "SHOEDEX_REQUEST_HEADERS".to_string(),
                        reason: format!("header \"{segment}\" is missing a ':' separator"),
                    })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidEnvVar {
                    var: "SHOEDEX_REQUEST_HEADERS".to_string(),
                    reason: format!("header \"{segment}\" has an empty name"),
                });
            }
            Ok((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
