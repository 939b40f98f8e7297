//! Environment configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `dotenvy` at startup.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ApiError;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_DB_PATH: &str = "trainer.db";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CHAT_POLL_SECS: u64 = 5;
const DEFAULT_REST_SECONDS: u32 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Base URL of the trainer API, e.g. `https://host/api`
  pub api_url: String,
  pub db_path: PathBuf,
  pub http_timeout: Duration,
  pub chat_poll_interval: Duration,
  /// Default rest between sets when the tracker is not given one
  pub default_rest_seconds: u32,
}

impl AppConfig {
  pub fn from_env() -> Result<Self, ApiError> {
    let api_url = env::var("TRAINER_API_URL")
      .map_err(|_| ApiError::MissingConfig("TRAINER_API_URL".into()))?;

    if api_url.trim().is_empty() {
      return Err(ApiError::MissingConfig("TRAINER_API_URL".into()));
    }

    let default_rest_seconds = parse_var("TRAINER_REST_SECONDS", DEFAULT_REST_SECONDS)?;
    if default_rest_seconds == 0 {
      return Err(ApiError::MissingConfig(
        "TRAINER_REST_SECONDS must be at least 1".into(),
      ));
    }

    Ok(Self {
      api_url: api_url.trim_end_matches('/').to_string(),
      db_path: env::var("TRAINER_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
      http_timeout: Duration::from_secs(parse_var("TRAINER_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?),
      chat_poll_interval: Duration::from_secs(parse_var("TRAINER_CHAT_POLL_SECS", DEFAULT_CHAT_POLL_SECS)?),
      default_rest_seconds,
    })
  }

  /// Config pointing at an arbitrary server, used by tests and tooling
  pub fn for_base_url(api_url: &str) -> Self {
    Self {
      api_url: api_url.trim_end_matches('/').to_string(),
      db_path: PathBuf::from(DEFAULT_DB_PATH),
      http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
      chat_poll_interval: Duration::from_secs(DEFAULT_CHAT_POLL_SECS),
      default_rest_seconds: DEFAULT_REST_SECONDS,
    }
  }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ApiError> {
  match env::var(name) {
    Ok(raw) => raw
      .trim()
      .parse()
      .map_err(|_| ApiError::MissingConfig(format!("{} must be a number, got '{}'", name, raw))),
    Err(_) => Ok(default),
  }
}
