//! Scoped client registry.
//!
//! Provides exactly one long-lived [`ApiClient`] per [`Scope`], constructed
//! lazily on first request. The process-wide registry lives for the whole
//! run and has no teardown; tests that need isolation build their own
//! registry with [`ClientRegistry::with_config`].

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::authenticator::ScopedAuthenticator;
use crate::client::ApiClient;
use crate::config::TestConfig;
use crate::credentials::Credentials;
use crate::error::Error;
use crate::scope::Scope;
use crate::token::TokenFetcher;

/// Process-wide registry backing [`client_for`]. Initialized on first access,
/// never torn down.
static GLOBAL: ClientRegistry = ClientRegistry::new();

/// One lazily-created client per scope.
///
/// Each scope has its own single-assignment cell, so construction of the read
/// client never contends with the write client. Among concurrent first
/// callers for a scope exactly one performs construction while the rest wait
/// for the finished instance; a construction failure leaves the cell empty
/// and the next caller starts over.
#[derive(Debug)]
pub struct ClientRegistry {
    config: Option<TestConfig>,
    read: OnceCell<Arc<ApiClient>>,
    write: OnceCell<Arc<ApiClient>>,
}

impl ClientRegistry {
    /// Create a registry that loads [`TestConfig`] on first use.
    pub const fn new() -> Self {
        Self {
            config: None,
            read: OnceCell::const_new(),
            write: OnceCell::const_new(),
        }
    }

    /// Create a registry bound to an explicit configuration.
    pub fn with_config(config: TestConfig) -> Self {
        Self {
            config: Some(config),
            read: OnceCell::const_new(),
            write: OnceCell::const_new(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static ClientRegistry {
        &GLOBAL
    }

    /// Get the client for `scope`, constructing it on first call.
    pub async fn client(&self, scope: Scope) -> Result<Arc<ApiClient>, Error> {
        let client = self
            .cell(scope)
            .get_or_try_init(|| async { self.build_client(scope) })
            .await?;
        Ok(Arc::clone(client))
    }

    /// Whether the client for `scope` has been constructed.
    pub fn is_initialized(&self, scope: Scope) -> bool {
        self.cell(scope).initialized()
    }

    fn cell(&self, scope: Scope) -> &OnceCell<Arc<ApiClient>> {
        match scope {
            Scope::Read => &self.read,
            Scope::Write => &self.write,
        }
    }

    fn build_client(&self, scope: Scope) -> Result<Arc<ApiClient>, Error> {
        let config = match &self.config {
            Some(config) => config.clone(),
            None => TestConfig::load()?,
        };

        let credentials = Arc::new(Credentials::from_config(&config, scope)?);
        let fetcher = TokenFetcher::new(Arc::clone(&credentials), config.request_timeout)?;
        let authenticator = Arc::new(ScopedAuthenticator::new(fetcher));
        let client = ApiClient::new(
            credentials.base_url().clone(),
            authenticator,
            config.request_timeout,
        )?;

        tracing::info!(
            "constructed {} scope client for {}",
            scope,
            credentials.base_url()
        );

        Ok(Arc::new(client))
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the process-wide client for `scope`.
///
/// Shorthand for `ClientRegistry::global().client(scope)`.
pub async fn client_for(scope: Scope) -> Result<Arc<ApiClient>, Error> {
    ClientRegistry::global().client(scope).await
}
