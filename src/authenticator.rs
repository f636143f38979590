//! Request authentication.
//!
//! This module provides:
//! - [`Authenticator`] - Capability trait: produce headers for a request
//! - [`ScopedAuthenticator`] - Client-credentials authenticator with a
//!   read-through token cache

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use tokio::sync::OnceCell;

use crate::token::{TokenFetchError, TokenFetcher};

/// Capability to authenticate outgoing requests.
///
/// Given the request about to be sent, an implementation produces zero or
/// more header pairs to attach. The transport composes an `Authenticator`
/// in; nothing here depends on a concrete HTTP client type.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Produce the headers to attach to `request`.
    async fn headers_for(
        &self,
        request: &reqwest::Request,
    ) -> Result<Vec<(HeaderName, HeaderValue)>, TokenFetchError>;
}

/// Supplies the Authorization header for one scope, fetching a token on
/// first use.
///
/// The cache is a single-assignment cell: among concurrent first callers
/// exactly one fetch is in flight and the rest wait for its outcome. A failed
/// fetch leaves the cell empty, so the next call attempts a fresh exchange.
/// Once populated the value is reused for the remainder of the process; the
/// target service's tokens do not expire within a test run.
#[derive(Debug)]
pub struct ScopedAuthenticator {
    fetcher: TokenFetcher,
    cached: OnceCell<String>,
}

impl ScopedAuthenticator {
    /// Create an authenticator around a token fetcher.
    pub fn new(fetcher: TokenFetcher) -> Self {
        Self {
            fetcher,
            cached: OnceCell::new(),
        }
    }

    /// Whether a token has been fetched and cached.
    pub fn is_cached(&self) -> bool {
        self.cached.initialized()
    }

    /// Get the Authorization header value, fetching a token if none is cached.
    pub async fn header_value(&self) -> Result<&str, TokenFetchError> {
        let value = self
            .cached
            .get_or_try_init(|| async {
                let token = self.fetcher.fetch().await?;
                Ok::<String, TokenFetchError>(token.header_value())
            })
            .await?;
        Ok(value.as_str())
    }
}

#[async_trait]
impl Authenticator for ScopedAuthenticator {
    async fn headers_for(
        &self,
        _request: &reqwest::Request,
    ) -> Result<Vec<(HeaderName, HeaderValue)>, TokenFetchError> {
        let value = self.header_value().await?;
        let mut header =
            HeaderValue::from_str(value).map_err(|_| TokenFetchError::Malformed {
                message: "token is not representable as a header value".to_string(),
            })?;
        header.set_sensitive(true);
        Ok(vec![(AUTHORIZATION, header)])
    }
}
