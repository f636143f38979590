//! Authenticated transport for the target API.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::authenticator::Authenticator;
use crate::error::Error;

/// An HTTP client bound to one base URL and one authenticator.
///
/// Requests are addressed by path; the authenticator's headers are attached
/// transparently on execution. The client is cheap to share behind an `Arc`
/// and is what the [registry](crate::registry) hands out per scope.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    authenticator: Arc<dyn Authenticator>,
}

impl ApiClient {
    /// Create a client for `base_url` authenticating via `authenticator`.
    pub fn new(
        base_url: Url,
        authenticator: Arc<dyn Authenticator>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            authenticator,
        })
    }

    /// The base URL this client is bound to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start a request for `path`, resolved against the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.endpoint(path))
    }

    /// Start a GET request for `path`.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    /// Start a POST request for `path`.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// Start a PUT request for `path`.
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    /// Start a PATCH request for `path`.
    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    /// Start a DELETE request for `path`.
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Execute a request, attaching the authenticator's headers.
    ///
    /// Authentication failures surface here as [`Error::Token`] and fail the
    /// request; transport failures pass through as [`Error::Transport`].
    pub async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse, Error> {
        let mut request = request.build()?;

        for (name, value) in self.authenticator.headers_for(&request).await? {
            request.headers_mut().insert(name, value);
        }

        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, url, status);

        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Status and body of an executed request.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    /// The response status code, passed through verbatim.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
