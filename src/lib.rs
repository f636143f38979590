//! # Apiforge
//!
//! Test harness for the Users/ZipCodes demo API.
//!
//! This crate provides:
//! - Scoped, process-wide API clients with lazy one-time construction
//! - OAuth2 client-credentials authentication with a read-through token cache
//! - Configuration loading from a TOML file and environment variables
//! - The `User` domain model and random test-data generators
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apiforge::{client_for, Scope};
//!
//! async fn list_users() -> Result<(), apiforge::Error> {
//!     let client = client_for(Scope::Read).await?;
//!     let response = client.execute(client.get("/users")).await?;
//!     let users: Vec<apiforge::User> = response.json()?;
//!     Ok(())
//! }
//! ```

pub mod authenticator;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod registry;
pub mod scope;
pub mod secret;
pub mod token;

// Re-export commonly used types at crate root
pub use authenticator::{Authenticator, ScopedAuthenticator};

pub use client::{ApiClient, ApiResponse};

pub use config::{ConfigError, TestConfig};

pub use credentials::Credentials;

pub use error::Error;

pub use model::{Sex, User};

pub use registry::{ClientRegistry, client_for};

pub use scope::Scope;

pub use secret::Secret;

pub use token::{TokenFetchError, TokenFetcher, TokenResponse};
