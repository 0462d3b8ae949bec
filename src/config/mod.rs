//! Runtime configuration.
//!
//! Everything is read from environment variables by [`Config::from_env`],
//! with defaults that point at the public LogScale documentation.

use std::env;

use thiserror::Error;
use url::Url;

/// Environment variable names.
pub const ENV_FETCH: &str = "RTFD_FETCH";
pub const ENV_LOGSCALE_BASE_URL: &str = "LOGSCALE_BASE_URL";
pub const ENV_MAX_BYTES: &str = "RTFD_MAX_BYTES";
pub const ENV_SEARCH_LIMIT: &str = "RTFD_SEARCH_LIMIT";

const DEFAULT_LOGSCALE_BASE_URL: &str = "https://library.humio.com/data-analysis/";
const DEFAULT_MAX_BYTES: usize = 20_480;
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Values of `RTFD_FETCH` that turn content fetching off.
const FETCH_DISABLED_VALUES: [&str; 3] = ["false", "0", "no"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    fetch_enabled: bool,
    base_url: Url,
    max_bytes: usize,
    search_limit: usize,
}

impl Config {
    /// Builds a config explicitly. A missing trailing `/` is added to
    /// `base_url` so relative pages join under it.
    pub fn new(fetch_enabled: bool, base_url: Url, max_bytes: usize, search_limit: usize) -> Self {
        Self {
            fetch_enabled,
            base_url: with_trailing_slash(base_url),
            max_bytes,
            search_limit,
        }
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let fetch_enabled = env::var(ENV_FETCH)
            .map(|value| !FETCH_DISABLED_VALUES.contains(&value.trim().to_lowercase().as_str()))
            .unwrap_or(true);

        let base_url = match env::var(ENV_LOGSCALE_BASE_URL) {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => default_base_url(),
        };

        let max_bytes = positive_from_env(ENV_MAX_BYTES, DEFAULT_MAX_BYTES)?;
        let search_limit = positive_from_env(ENV_SEARCH_LIMIT, DEFAULT_SEARCH_LIMIT)?;

        Ok(Self::new(fetch_enabled, base_url, max_bytes, search_limit))
    }

    /// Whether syntax and function pages may be fetched.
    pub fn fetch_enabled(&self) -> bool {
        self.fetch_enabled
    }
    /// Documentation root; always ends in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
    /// Default byte budget for extracted content.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
    pub fn search_limit(&self) -> usize {
        self.search_limit
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            true,
            default_base_url(),
            DEFAULT_MAX_BYTES,
            DEFAULT_SEARCH_LIMIT,
        )
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_LOGSCALE_BASE_URL).expect("default base url is valid")
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidValue {
        field: ENV_LOGSCALE_BASE_URL,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field: ENV_LOGSCALE_BASE_URL,
            reason: format!("'{raw}' cannot be used as a base url"),
        });
    }
    Ok(with_trailing_slash(url))
}

fn positive_from_env(field: &'static str, default: usize) -> Result<usize, ConfigError> {
    let Ok(raw) = env::var(field) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidValue {
            field,
            reason: e.to_string(),
        }),
    }
}
