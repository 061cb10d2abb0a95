//! Retry policy for the transport.
//!
//! Retries live in the transport, never in [`LangfuseClient`](crate::LangfuseClient):
//! a client call issues exactly one logical request and the transport may
//! repeat it on transient failures if configured to.

use std::future;

use tower::retry::Policy;

use crate::{Error, Request, Response};

/// Retry policy for idempotent Langfuse reads.
///
/// Retries:
/// - connection errors and timeouts
/// - 5xx server errors
/// - 429 Too Many Requests
///
/// Cancellation, TLS failures, oversized bodies and other 4xx statuses are
/// never retried.
///
/// # Example
///
/// ```ignore
/// use langfuse::HyperTransport;
/// use langfuse::middleware::{RetryLayer, RetryPolicy};
///
/// let transport = HyperTransport::builder()
///     .layer(RetryLayer::new(RetryPolicy::new(3)))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    remaining: u32,
}

impl RetryPolicy {
    /// Create a new retry policy with the given maximum number of retries.
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            remaining: max_retries,
        }
    }

    fn should_retry_response(response: &Response) -> bool {
        let status = response.status();
        status >= 500 || status == 429
    }

    fn should_retry_error(error: &Error) -> bool {
        error.is_connection() || error.is_timeout()
    }
}

impl Policy<Request, Response, Error> for RetryPolicy {
    type Future = future::Ready<()>;

    fn retry(
        &mut self,
        _req: &mut Request,
        result: &mut Result<Response, Error>,
    ) -> Option<Self::Future> {
        if self.remaining == 0 {
            return None;
        }

        let should_retry = match result {
            Ok(response) => Self::should_retry_response(response),
            Err(error) => Self::should_retry_error(error),
        };

        if should_retry {
            self.remaining -= 1;
            tracing::debug!(remaining = self.remaining, "retrying request");
            Some(future::ready(()))
        } else {
            None
        }
    }

    fn clone_request(&mut self, req: &Request) -> Option<Request> {
        // Requests carry no body, so every request is replayable.
        Some(req.clone())
    }
}
