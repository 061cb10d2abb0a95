//! Exchange logging for the transport.
//!
//! Every exchange gets a `langfuse_http` span carrying the method and the
//! encoded request target. Headers are only logged in verbose mode, with the
//! `Authorization` value redacted by `Request`'s `Debug` impl.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{Error, Request, Response, Result};

/// Layer that logs each exchange of the wrapped transport.
///
/// # Example
///
/// ```ignore
/// use langfuse::HyperTransport;
/// use langfuse::middleware::LoggingLayer;
///
/// let transport = HyperTransport::builder()
///     .layer(LoggingLayer::debug())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    verbosity: Verbosity,
}

/// How much of an exchange is logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Target, status and latency at info level.
    #[default]
    Summary,
    /// Summary plus the (redacted) request at debug level.
    Verbose,
}

impl LoggingLayer {
    /// Summary logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verbose logging, including request headers.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            verbosity: Verbosity::Verbose,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            verbosity: self.verbosity,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    verbosity: Verbosity,
}

/// What became of one exchange, as far as logging is concerned.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Success(u16),
    Status(u16),
    Failed,
}

impl Outcome {
    fn of(result: &Result<Response>) -> Self {
        match result {
            Ok(response) if response.is_success() => Self::Success(response.status()),
            Ok(response) => Self::Status(response.status()),
            Err(_) => Self::Failed,
        }
    }
}

async fn logged<F>(call: F, started: Instant) -> Result<Response>
where
    F: Future<Output = Result<Response>>,
{
    let result = call.await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match (Outcome::of(&result), &result) {
        (Outcome::Success(status), _) => info!(status, elapsed_ms, "exchange completed"),
        (Outcome::Status(status), _) => warn!(status, elapsed_ms, "service returned an error status"),
        (Outcome::Failed, Err(err)) => warn!(error = %err, elapsed_ms, "exchange failed"),
        (Outcome::Failed, Ok(_)) => {}
    }

    result
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let span = info_span!(
            "langfuse_http",
            method = %request.method(),
            target = %request.path_and_query(),
        );

        if self.verbosity == Verbosity::Verbose {
            span.in_scope(|| debug!(?request, "sending request"));
        }

        // The readied service handles this call; a fresh clone takes its place.
        let fresh = self.inner.clone();
        let call = std::mem::replace(&mut self.inner, fresh).call(request);

        Box::pin(logged(call, Instant::now()).instrument(span))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use assert2::check;
    use bytes::Bytes;
    use tower::{ServiceExt, service_fn};

    use super::*;
    use crate::Method;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("lock")).into_owned()
        }
    }

    fn request() -> Request {
        let url = url::Url::parse("https://cloud.langfuse.com/api/public/v2/prompts/my%20prompt?label=prod")
            .expect("url");
        Request::builder(Method::Get, url)
            .header("Authorization", "Basic c2VjcmV0LWtleQ==")
            .build()
    }

    fn answering(status: u16) -> impl Service<Request, Response = Response, Error = Error, Future: Send> + Clone + Send + 'static {
        service_fn(move |_request: Request| async move {
            Ok::<_, Error>(Response::new(status, HashMap::new(), Bytes::new()))
        })
    }

    async fn run_captured(layer: LoggingLayer, status: u16) -> (Result<Response>, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let result = layer.layer(answering(status)).oneshot(request()).await;
        (result, captured.text())
    }

    #[test]
    fn layer_verbosity() {
        check!(LoggingLayer::new().verbosity == Verbosity::Summary);
        check!(LoggingLayer::debug().verbosity == Verbosity::Verbose);
    }

    #[test]
    fn outcome_classification() {
        let ok = Ok(Response::new(200, HashMap::new(), Bytes::new()));
        let not_found = Ok(Response::new(404, HashMap::new(), Bytes::new()));
        let failed = Err(Error::Timeout);
        check!(Outcome::of(&ok) == Outcome::Success(200));
        check!(Outcome::of(&not_found) == Outcome::Status(404));
        check!(Outcome::of(&failed) == Outcome::Failed);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn summary_logs_target_and_status() {
        let (result, logs) = run_captured(LoggingLayer::new(), 200).await;

        check!(result.map(|r| r.status()).ok() == Some(200));
        check!(logs.contains("my%20prompt?label=prod"));
        check!(logs.contains("exchange completed"));
        check!(!logs.contains("Authorization"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn verbose_logs_redact_credentials() {
        let (result, logs) = run_captured(LoggingLayer::debug(), 503).await;

        check!(result.map(|r| r.status()).ok() == Some(503));
        check!(logs.contains("sending request"));
        check!(logs.contains("<redacted>"));
        check!(!logs.contains("c2VjcmV0LWtleQ=="));
        check!(logs.contains("service returned an error status"));
    }
}
