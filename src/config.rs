//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory (or
//! an explicit path), then applies `CALLBACK_FETCH_LOG_LEVEL` and
//! `CALLBACK_FETCH_HANDLER`. Every key has a built-in default, so a missing
//! default file is not an error.

use std::{env, fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::AppError;
use crate::fetch::{DEFAULT_DELAY, DEFAULT_PAYLOAD};
use crate::handlers::Handler;
use crate::logger;

/// Path used when no `-f/--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Deferred fetch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Time between scheduling and the callback firing.
    pub delay: Duration,
    /// String handed to the callback.
    pub payload: String,
    /// Callback selected when none is given on the command line.
    pub handler: Handler,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub fetch: FetchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            fetch: FetchConfig {
                delay: DEFAULT_DELAY,
                payload: DEFAULT_PAYLOAD.to_string(),
                handler: Handler::default(),
            },
        }
    }
}

/// Raw TOML shape, the `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    app: RawApp,
    #[serde(default)]
    fetch: RawFetch,
}

#[derive(Deserialize)]
struct RawApp {
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl Default for RawApp {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

#[derive(Deserialize, Default)]
struct RawFetch {
    delay_ms: Option<u64>,
    payload: Option<String>,
    /// `"log"` or `"alert"`; parsed during resolution for a clearer error.
    handler: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load config from `path` (or the default path), then apply env overrides.
///
/// An explicit `path` must exist. The default path may be absent.
pub fn load(path: Option<&str>) -> Result<Config, AppError> {
    let log_level_override = env::var("CALLBACK_FETCH_LOG_LEVEL").ok();
    let handler_override = env::var("CALLBACK_FETCH_HANDLER").ok();

    match path {
        Some(p) => load_from(
            Path::new(p),
            log_level_override.as_deref(),
            handler_override.as_deref(),
        ),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from(
            Path::new(DEFAULT_CONFIG_PATH),
            log_level_override.as_deref(),
            handler_override.as_deref(),
        ),
        None => resolve(
            RawConfig::default(),
            log_level_override.as_deref(),
            handler_override.as_deref(),
        ),
    }
}

/// Internal loader. Accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    log_level_override: Option<&str>,
    handler_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    resolve(parsed, log_level_override, handler_override)
}

fn resolve(
    raw: RawConfig,
    log_level_override: Option<&str>,
    handler_override: Option<&str>,
) -> Result<Config, AppError> {
    let log_level = log_level_override
        .map(str::to_string)
        .unwrap_or(raw.app.log_level);
    logger::parse_level(&log_level).map_err(|e| AppError::Config(e.to_string()))?;

    let handler = match handler_override.or(raw.fetch.handler.as_deref()) {
        Some(name) => name.parse::<Handler>()?,
        None => Handler::default(),
    };

    Ok(Config {
        log_level,
        fetch: FetchConfig {
            delay: raw.fetch.delay_ms.map(Duration::from_millis).unwrap_or(DEFAULT_DELAY),
            payload: raw.fetch.payload.unwrap_or_else(|| DEFAULT_PAYLOAD.to_string()),
            handler,
        },
    })
}
