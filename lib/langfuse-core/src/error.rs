//! Error types for the Langfuse client.
//!
//! Errors fall into three families that callers can tell apart:
//!
//! - transport errors: the request never completed ([`Error::Connection`],
//!   [`Error::Tls`], [`Error::Timeout`], [`Error::Cancelled`]);
//! - HTTP errors: the service answered with a non-success status
//!   ([`Error::Http`]);
//! - deserialization errors: the service answered 2xx with a body that does
//!   not match the expected schema ([`Error::JsonDeserialization`]).

use bytes::Bytes;
use derive_more::{Display, Error, From};

/// Main error type for Langfuse operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The service answered with a non-2xx status.
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        message: String,
        /// Raw response body.
        #[error(not(source))]
        body: Bytes,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The response body exceeded the transport's size limit.
    #[display("response body exceeds {limit} bytes")]
    #[from(skip)]
    BodyTooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Request timeout signalled by the transport.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The caller cancelled the operation before a response arrived.
    #[display("request cancelled")]
    #[from(skip)]
    Cancelled,

    /// Invalid request construction.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// Invalid or incomplete client configuration.
    #[display("invalid configuration: {_0}")]
    #[from(skip)]
    Config(#[error(not(source))] String),

    /// Response body does not match the expected schema.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the offending field (e.g. `labels[0]`).
        path: String,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP error, deriving the message from the status code.
    #[must_use]
    pub fn http(status: u16, body: Bytes) -> Self {
        let message = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();
        Self::Http {
            status,
            message,
            body,
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the caller cancelled the operation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the request never completed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_)
                | Self::Tls(_)
                | Self::BodyTooLarge { .. }
                | Self::Timeout
                | Self::Cancelled
        )
    }

    /// Returns `true` if a 2xx body failed to deserialize.
    #[must_use]
    pub const fn is_deserialization(&self) -> bool {
        matches!(self, Self::JsonDeserialization { .. })
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response body if this is an HTTP error.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body as JSON.
    ///
    /// Returns `None` if this is not an HTTP error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct ApiError {
    ///     message: String,
    /// }
    ///
    /// if let Err(e) = client.get_prompt("missing", None, None).await {
    ///     if let Some(Ok(api_error)) = e.decode_body::<ApiError>() {
    ///         eprintln!("service said: {}", api_error.message);
    ///     }
    /// }
    /// ```
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}
