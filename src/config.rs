//! Test-run configuration handling.
//!
//! Configuration is sourced once per client construction, from two places:
//!
//! 1. A TOML file (`apiforge.toml` in the working directory, or the path in
//!    the `APIFORGE_CONFIG` environment variable).
//! 2. Environment variables, which override individual file values:
//!    `APIFORGE_BASE_URL`, `APIFORGE_CLIENT_USERNAME`,
//!    `APIFORGE_CLIENT_PASSWORD`, `APIFORGE_REQUEST_TIMEOUT_SECS`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::secret::Secret;

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "APIFORGE_CONFIG";

/// Default configuration file, resolved against the working directory.
const DEFAULT_CONFIG_FILE: &str = "apiforge.toml";

/// Default timeout applied to every HTTP call, including token fetches.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Error type for configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter is absent or empty.
    #[error("missing configuration parameter: {name}")]
    MissingParameter { name: &'static str },

    /// A parameter is present but cannot be interpreted.
    #[error("invalid value for {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// The base URL does not parse.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed as TOML.
    #[error("failed to parse config file {path:?}: {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Parameters for one test run: where the service lives and which service
/// account authenticates against it.
///
/// Values are read once and never mutated; both scoped clients are built from
/// the same `TestConfig`.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Base URL of the target service.
    pub base_url: String,

    /// Service-account username for the client-credentials exchange.
    pub client_username: String,

    /// Service-account password for the client-credentials exchange.
    pub client_password: Secret,

    /// Timeout applied to every HTTP call, including token fetches.
    pub request_timeout: Duration,
}

impl TestConfig {
    /// Create a configuration from explicit values, with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        client_username: impl Into<String>,
        client_password: Secret,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_username: client_username.into(),
            client_password,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from the config file and the environment.
    ///
    /// Environment variables take precedence over file values. Returns
    /// [`ConfigError::MissingParameter`] when a required value is supplied by
    /// neither source.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut raw = if path.exists() {
            RawConfig::from_file(&path)?
        } else {
            RawConfig::default()
        };

        if let Ok(value) = std::env::var("APIFORGE_BASE_URL") {
            raw.base_url = Some(value);
        }
        if let Ok(value) = std::env::var("APIFORGE_CLIENT_USERNAME") {
            raw.client_username = Some(value);
        }
        if let Ok(value) = std::env::var("APIFORGE_CLIENT_PASSWORD") {
            raw.client_password = Some(Secret::new(value));
        }
        if let Ok(value) = std::env::var("APIFORGE_REQUEST_TIMEOUT_SECS") {
            let secs = value
                .parse::<u64>()
                .map_err(|err| ConfigError::InvalidParameter {
                    name: "request_timeout_secs",
                    message: err.to_string(),
                })?;
            raw.request_timeout_secs = Some(secs);
        }

        raw.into_config()
    }
}

/// File/environment representation with every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    base_url: Option<String>,
    client_username: Option<String>,
    client_password: Option<Secret>,
    request_timeout_secs: Option<u64>,
}

impl RawConfig {
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }

    fn into_config(self) -> Result<TestConfig, ConfigError> {
        let base_url = required(self.base_url, "base_url")?;
        let client_username = required(self.client_username, "client_username")?;
        let client_password = self
            .client_password
            .filter(|secret| !secret.expose().trim().is_empty())
            .ok_or(ConfigError::MissingParameter {
                name: "client_password",
            })?;

        let timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(TestConfig {
            base_url,
            client_username,
            client_password,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingParameter { name })
}
