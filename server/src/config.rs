//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse `APP_ENV`. Anything other than `production` is development.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// `PostgreSQL` connection URL. The in-memory caller store is used when unset.
    pub database_url: Option<String>,

    /// Ed25519 public key for access token verification (PEM, base64-encoded)
    pub jwt_public_key: String,

    /// Deployment environment; production hides internal error detail
    pub environment: Environment,

    /// Optional JSON role table replacing the built-in one
    pub role_table_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").context("JWT_PUBLIC_KEY must be set")?,
            environment: env::var("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or_default(),
            role_table_path: env::var("ROLE_TABLE_PATH").ok().map(PathBuf::from),
        })
    }

    /// Whether internal error detail may be returned to clients.
    #[must_use]
    pub fn expose_error_detail(&self) -> bool {
        self.environment != Environment::Production
    }

    /// Create a default configuration for testing.
    ///
    /// Verifies tokens with the fixed Ed25519 test key; never deploy with it.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            database_url: None,
            jwt_public_key: crate::auth::jwt::TEST_PUBLIC_KEY.into(),
            environment: Environment::Development,
            role_table_path: None,
        }
    }
}
