//! Client configuration types.
//!
//! - [`LangfuseConfig`] - service location and API keys
//! - [`ClientConfig`] - connection settings of the default [`HyperTransport`](crate::HyperTransport)

use std::time::Duration;

use crate::{Error, Result};

/// Base URL of Langfuse Cloud (EU region).
pub const DEFAULT_BASE_URL: &str = "https://cloud.langfuse.com";

/// Environment variable holding the public key.
pub const PUBLIC_KEY_VAR: &str = "LANGFUSE_PUBLIC_KEY";
/// Environment variable holding the secret key.
pub const SECRET_KEY_VAR: &str = "LANGFUSE_SECRET_KEY";
/// Environment variable holding the base URL.
pub const BASE_URL_VAR: &str = "LANGFUSE_BASE_URL";

/// Where the service lives and how to authenticate against it.
///
/// The `Debug` output never includes the secret key.
#[derive(Clone, PartialEq, Eq)]
pub struct LangfuseConfig {
    /// Service base URL, e.g. `https://cloud.langfuse.com`.
    pub base_url: String,
    /// Project public key (`pk-lf-...`).
    pub public_key: String,
    /// Project secret key (`sk-lf-...`).
    pub secret_key: String,
}

impl LangfuseConfig {
    /// Create a configuration from its three parts.
    pub fn new(
        base_url: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read `LANGFUSE_PUBLIC_KEY`, `LANGFUSE_SECRET_KEY` and the optional
    /// `LANGFUSE_BASE_URL` (defaults to [`DEFAULT_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a key variable is missing.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::config(format!("environment variable {name} is not set")))
        };

        Ok(Self {
            public_key: require(PUBLIC_KEY_VAR)?,
            secret_key: require(SECRET_KEY_VAR)?,
            base_url: lookup(BASE_URL_VAR)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    /// Check that both keys are present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the empty field.
    pub fn validate(&self) -> Result<()> {
        if self.public_key.is_empty() {
            return Err(Error::config("public key is empty"));
        }
        if self.secret_key.is_empty() {
            return Err(Error::config("secret key is empty"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for LangfuseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangfuseConfig")
            .field("base_url", &self.base_url)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Connection settings for the default transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for a whole request/response exchange.
    pub timeout: Duration,
    /// Deadline for establishing a TCP connection.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
    /// Largest response body the transport buffers.
    pub max_response_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            max_response_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
    max_response_bytes: Option<usize>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Set the largest response body the transport buffers.
    #[must_use]
    pub const fn max_response_bytes(mut self, limit: usize) -> Self {
        self.max_response_bytes = Some(limit);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
            max_response_bytes: self
                .max_response_bytes
                .unwrap_or(defaults.max_response_bytes),
        }
    }
}
