//! HTTP basic authentication with the project key pair.
//!
//! Langfuse authenticates every public API call with
//! `Authorization: Basic <base64(public_key:secret_key)>`.

use std::sync::Arc;

use base64::Engine;

/// Precomputed basic-auth header for a public/secret key pair.
///
/// The header value is derived once and shared by every clone, so
/// concurrent requests never re-encode the secret. `Debug` prints the public
/// key only.
#[derive(Clone)]
pub struct BasicCredentials {
    public_key: Arc<str>,
    header_value: Arc<str>,
}

impl BasicCredentials {
    /// Encode the key pair.
    pub fn new(public_key: impl AsRef<str>, secret_key: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", public_key.as_ref(), secret_key.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        Self {
            public_key: Arc::from(public_key.as_ref()),
            header_value: Arc::from(format!("Basic {encoded}")),
        }
    }

    /// The public key these credentials were built from.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Full `Authorization` header value, `Basic <base64>`.
    #[must_use]
    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_key_pair() {
        // "test-key:test-secret"
        let credentials = BasicCredentials::new("test-key", "test-secret");
        assert_eq!(
            credentials.header_value(),
            "Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ="
        );
        assert_eq!(credentials.public_key(), "test-key");
    }

    #[test]
    fn clones_share_the_header() {
        let credentials = BasicCredentials::new("pk", "sk");
        let cloned = credentials.clone();
        assert!(Arc::ptr_eq(&credentials.header_value, &cloned.header_value));
    }

    #[test]
    fn debug_hides_secret() {
        let credentials = BasicCredentials::new("pk-lf-1", "sk-lf-secret");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("pk-lf-1"));
        assert!(!debug.contains("sk-lf-secret"));
        assert!(!debug.contains(credentials.header_value()));
    }
}
