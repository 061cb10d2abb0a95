//! The transport seam.
//!
//! The client never talks to the network itself: it hands a fully built
//! [`Request`] to a [`Transport`] and gets a buffered [`Response`] back.
//! Connection pooling, TLS, timeouts and retries all live behind this trait.
//! Tests substitute their own implementation.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Asynchronous "send a request, get a response" capability.
///
/// Implementations must not block the calling thread and must be usable from
/// many concurrent tasks through a shared reference.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use bytes::Bytes;
/// use langfuse_core::{Request, Response, Result, Transport};
///
/// /// Answers every request with `204 No Content`.
/// struct NoContent;
///
/// impl Transport for NoContent {
///     async fn send(&self, _request: Request) -> Result<Response> {
///         Ok(Response::new(204, HashMap::new(), Bytes::new()))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send a request and return the response.
    ///
    /// A response with a non-2xx status is still `Ok`; only failures to
    /// obtain a response at all are errors.
    ///
    /// # Errors
    ///
    /// Returns a transport error ([`Error::Connection`](crate::Error::Connection),
    /// [`Error::Tls`](crate::Error::Tls), [`Error::Timeout`](crate::Error::Timeout))
    /// if no response was received.
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for &T {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        (**self).send(request)
    }
}
