//! Top-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::token::TokenFetchError;

/// Top-level error type encompassing every failure a test can hit through
/// this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration at client construction time.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The token exchange for the in-flight request failed.
    #[error("authentication error: {0}")]
    Token(#[from] TokenFetchError),

    /// Failure executing the authenticated request itself.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not decode as the expected JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}
