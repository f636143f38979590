//! Per-scope credential sets.

use url::Url;

use crate::config::{ConfigError, TestConfig};
use crate::scope::Scope;
use crate::secret::Secret;

/// Token endpoint path, relative to the service base URL.
const TOKEN_ENDPOINT: &str = "oauth/token";

/// The configuration values needed to authenticate for one scope.
///
/// Immutable after construction. Validation happens here: a missing or empty
/// base URL, username, or password is a [`ConfigError`], as is a base URL that
/// does not parse. The token endpoint URL is derived once at construction so
/// later fetches cannot fail on URL assembly.
#[derive(Debug, Clone)]
pub struct Credentials {
    base_url: Url,
    token_url: Url,
    username: String,
    password: Secret,
    scope: Scope,
}

impl Credentials {
    /// Create a credential set for one scope.
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: Secret,
        scope: Scope,
    ) -> Result<Self, ConfigError> {
        let username = username.into();

        if base_url.trim().is_empty() {
            return Err(ConfigError::MissingParameter { name: "base_url" });
        }
        if username.trim().is_empty() {
            return Err(ConfigError::MissingParameter {
                name: "client_username",
            });
        }
        if password.expose().trim().is_empty() {
            return Err(ConfigError::MissingParameter {
                name: "client_password",
            });
        }

        let mut parsed = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        // Url::join replaces the last path segment unless the base ends in '/'.
        if !parsed.path().ends_with('/') {
            parsed.set_path(&format!("{}/", parsed.path()));
        }

        let token_url = parsed
            .join(TOKEN_ENDPOINT)
            .map_err(|source| ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            base_url: parsed,
            token_url,
            username,
            password,
            scope,
        })
    }

    /// Build credentials for the given scope from a [`TestConfig`].
    pub fn from_config(config: &TestConfig, scope: Scope) -> Result<Self, ConfigError> {
        Self::new(
            &config.base_url,
            config.client_username.clone(),
            config.client_password.clone(),
            scope,
        )
    }

    /// The service base URL, normalized to end in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The token endpoint URL (`<base_url>/oauth/token`).
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// The service-account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The service-account password.
    pub fn password(&self) -> &Secret {
        &self.password
    }

    /// The scope these credentials authenticate for.
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(base_url: &str) -> Result<Credentials, ConfigError> {
        Credentials::new(base_url, "u", Secret::new("p"), Scope::Read)
    }

    #[test]
    fn test_token_url_is_derived_from_base_url() {
        let creds = credentials("https://api.example.test").unwrap();
        assert_eq!(
            creds.token_url().as_str(),
            "https://api.example.test/oauth/token"
        );
    }

    #[test]
    fn test_token_url_keeps_base_path() {
        let creds = credentials("https://api.example.test/v2").unwrap();
        assert_eq!(
            creds.token_url().as_str(),
            "https://api.example.test/v2/oauth/token"
        );

        let creds = credentials("https://api.example.test/v2/").unwrap();
        assert_eq!(
            creds.token_url().as_str(),
            "https://api.example.test/v2/oauth/token"
        );
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let err = credentials("").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingParameter { name: "base_url" }
        ));

        let err = Credentials::new("https://x.test", "", Secret::new("p"), Scope::Read)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingParameter {
                name: "client_username"
            }
        ));

        let err = Credentials::new("https://x.test", "u", Secret::new(""), Scope::Read)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingParameter {
                name: "client_password"
            }
        ));
    }

    #[test]
    fn test_unparsable_base_url_is_rejected() {
        let err = credentials("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = credentials("https://api.example.test").unwrap();
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("\"p\""));
    }
}
