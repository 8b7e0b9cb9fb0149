use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
const DEFAULT_STORE_URL: &str = "http://127.0.0.1:5000";

/// Section store configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT")?.unwrap_or(DEFAULT_PORT),
            rust_log: rust_log(),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES")?.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Viewer shell configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub store_url: String,
    pub rust_log: String,
    /// `None` means requests never time out.
    pub request_timeout: Option<Duration>,
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(ViewerConfig {
            store_url: std::env::var("STORE_URL").unwrap_or_else(|_| DEFAULT_STORE_URL.to_string()),
            rust_log: rust_log(),
            request_timeout: parse_env::<u64>("STORE_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

fn rust_log() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

/// Parses an optional variable. Unset is `None`; set but unparsable is an error.
fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(None),
    }
}
