//! OAuth2 client-credentials token exchange.
//!
//! This module provides:
//! - [`TokenResponse`] - The token endpoint's reply, as sent on the wire
//! - [`TokenFetcher`] - One-shot exchange of client credentials for a token
//! - [`TokenFetchError`] - Everything that can go wrong during an exchange

use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::credentials::Credentials;
use crate::secret::Secret;

/// Grant type sent to the token endpoint.
const GRANT_TYPE: &str = "client_credentials";

/// Error type for token fetches.
///
/// A failed fetch is not retried here; the caller decides whether to try
/// again on its next request.
#[derive(Debug, Error)]
pub enum TokenFetchError {
    /// The request never completed (connect failure, timeout, ...).
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status.
    #[error("token endpoint returned {status}")]
    Status { status: StatusCode },

    /// The response body is not the expected JSON shape.
    #[error("malformed token response: {message}")]
    Malformed { message: String },
}

/// The token endpoint's JSON reply.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Token type, usually `Bearer`. Combined verbatim into the header value.
    pub token_type: String,

    /// The opaque bearer token.
    pub access_token: Secret,
}

impl TokenResponse {
    /// The literal Authorization header value: `"{token_type} {access_token}"`.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose())
    }
}

/// Exchanges client credentials for a bearer token.
///
/// Issues `POST <base_url>/oauth/token` with HTTP Basic authentication and the
/// form parameters `grant_type=client_credentials` and `scope=<scope>`. One
/// attempt per call; the fetcher holds no state besides its HTTP client.
#[derive(Debug, Clone)]
pub struct TokenFetcher {
    http: reqwest::Client,
    credentials: Arc<Credentials>,
}

impl TokenFetcher {
    /// Create a fetcher for the given credentials.
    ///
    /// The timeout matches the enclosing API client so a hung token endpoint
    /// fails the request instead of stalling the run.
    pub fn new(credentials: Arc<Credentials>, timeout: Duration) -> Result<Self, TokenFetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, credentials })
    }

    /// Perform one client-credentials exchange.
    pub async fn fetch(&self) -> Result<TokenResponse, TokenFetchError> {
        let credentials = &self.credentials;
        tracing::debug!(
            "requesting {} token from {}",
            credentials.scope(),
            credentials.token_url()
        );

        let response = self
            .http
            .post(credentials.token_url().clone())
            .basic_auth(credentials.username(), Some(credentials.password().expose()))
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("scope", credentials.scope().as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenFetchError::Status { status });
        }

        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|err| TokenFetchError::Malformed {
                message: err.to_string(),
            })?;

        if token.token_type.is_empty() || token.access_token.expose().is_empty() {
            return Err(TokenFetchError::Malformed {
                message: "empty token_type or access_token".to_string(),
            });
        }

        tracing::debug!(
            "obtained {} {} token",
            credentials.scope(),
            token.token_type
        );

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value_combines_type_and_token() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"token_type":"Bearer","access_token":"abc123"}"#).unwrap();
        assert_eq!(token.header_value(), "Bearer abc123");
    }

    #[test]
    fn test_token_type_is_kept_verbatim() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"token_type":"bearer","access_token":"x"}"#).unwrap();
        assert_eq!(token.header_value(), "bearer x");
    }

    #[test]
    fn test_missing_fields_do_not_parse() {
        assert!(serde_json::from_str::<TokenResponse>(r#"{"token_type":"Bearer"}"#).is_err());
        assert!(serde_json::from_str::<TokenResponse>(r#"{"access_token":"x"}"#).is_err());
        assert!(serde_json::from_str::<TokenResponse>("[]").is_err());
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"token_type":"Bearer","access_token":"abc123"}"#).unwrap();
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("abc123"));
    }
}
