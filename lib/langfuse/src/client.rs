//! The Langfuse API client.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

use crate::{
    APPLICATION_JSON, BasicCredentials, Error, HyperTransport, LangfuseConfig, Method, Prompt,
    Request, RequestTarget, Result, Transport, prompt_target,
};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("langfuse-rs/", env!("CARGO_PKG_VERSION"));

/// Typed client for the Langfuse public API.
///
/// The client holds immutable configuration (base URL, precomputed
/// credentials) and owns its transport. Operations take `&self` and keep all
/// per-call state local, so one client can serve any number of concurrent
/// calls. The transport is released when the client is dropped.
///
/// # Example
///
/// ```ignore
/// use langfuse::{LangfuseClient, LangfuseConfig};
///
/// let client = LangfuseClient::from_config(LangfuseConfig::new(
///     "https://cloud.langfuse.com",
///     "pk-lf-...",
///     "sk-lf-...",
/// ))?;
///
/// let prompt = client.get_prompt("movie-critic", None, Some("production")).await?;
/// println!("{} v{}", prompt.name, prompt.version);
/// ```
#[derive(Clone)]
pub struct LangfuseClient<T = HyperTransport> {
    transport: T,
    base_url: Url,
    credentials: BasicCredentials,
}

impl<T> std::fmt::Debug for LangfuseClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangfuseClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl LangfuseClient<HyperTransport> {
    /// Create a client using the default [`HyperTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: LangfuseConfig) -> Result<Self> {
        Self::new(config, HyperTransport::new())
    }

    /// Create a client from `LANGFUSE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is missing or the configuration is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_config(LangfuseConfig::from_env()?)
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder() -> LangfuseClientBuilder {
        LangfuseClientBuilder::default()
    }
}

impl<T: Transport> LangfuseClient<T> {
    /// Create a client over the given transport.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if a key is empty
    /// - [`Error::InvalidUrl`] if the base URL does not parse
    /// - [`Error::InvalidRequest`] if the base URL cannot carry a path
    pub fn new(config: LangfuseConfig, transport: T) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_request(format!(
                "base URL `{base_url}` cannot carry a resource path"
            )));
        }

        Ok(Self {
            transport,
            base_url,
            credentials: BasicCredentials::new(&config.public_key, &config.secret_key),
        })
    }

    /// Service base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The transport requests are sent through.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the client, handing back its transport.
    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Fetch a prompt by name, optionally pinned to a version or a label.
    ///
    /// Sends `GET /api/public/v2/prompts/{name}[?version=..][&label=..]`.
    /// `version` and `label` are passed through as given; the service
    /// decides what to do when both are set.
    ///
    /// # Errors
    ///
    /// - a transport error if no response was received
    /// - [`Error::Http`] for a non-2xx status, with the raw body
    /// - [`Error::JsonDeserialization`] if a 2xx body is not a valid prompt
    pub async fn get_prompt(
        &self,
        name: &str,
        version: Option<u32>,
        label: Option<&str>,
    ) -> Result<Prompt> {
        let span = info_span!("get_prompt", prompt = %name, version, label);
        async move {
            let target = prompt_target(name, version, label)?;
            self.fetch(Method::Get, &target).await
        }
        .instrument(span)
        .await
    }

    /// Like [`get_prompt`](Self::get_prompt), but gives up as soon as
    /// `cancel` fires.
    ///
    /// The in-flight request is dropped and [`Error::Cancelled`] is returned;
    /// a partial result is never produced.
    ///
    /// # Errors
    ///
    /// Same as [`get_prompt`](Self::get_prompt), plus [`Error::Cancelled`].
    pub async fn get_prompt_with_cancel(
        &self,
        name: &str,
        version: Option<u32>,
        label: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Prompt> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(prompt = %name, "get_prompt cancelled");
                Err(Error::Cancelled)
            }
            result = self.get_prompt(name, version, label) => result,
        }
    }

    async fn fetch<R: DeserializeOwned>(&self, method: Method, target: &RequestTarget) -> Result<R> {
        let url = target.resolve(&self.base_url)?;
        debug!(%method, %url, "sending request");

        let request = Request::builder(method, url)
            .header("Authorization", self.credentials.header_value())
            .header("Accept", APPLICATION_JSON)
            .header("User-Agent", USER_AGENT)
            .build();

        let response = self
            .transport
            .send(request)
            .await
            .inspect_err(|err| warn!(error = %err, "transport failed"))?
            .error_for_status()
            .inspect_err(|err| warn!(status = err.status(), "service returned an error status"))?;

        response.json()
    }
}

/// Builder for a [`LangfuseClient`] over the default transport.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
///
/// let client = LangfuseClient::builder()
///     .public_key("pk-lf-...")
///     .secret_key("sk-lf-...")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct LangfuseClientBuilder {
    base_url: Option<String>,
    public_key: Option<String>,
    secret_key: Option<String>,
    timeout: Option<Duration>,
    transport: Option<HyperTransport>,
}

impl LangfuseClientBuilder {
    /// Set the base URL (defaults to [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL)).
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the public key.
    #[must_use]
    pub fn public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    /// Set the secret key.
    #[must_use]
    pub fn secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the request timeout of the default transport.
    ///
    /// Ignored when a transport is supplied with [`transport`](Self::transport).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured transport (e.g. with middleware).
    #[must_use]
    pub fn transport(mut self, transport: HyperTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a key is missing, or the errors of
    /// [`LangfuseClient::new`].
    pub fn build(self) -> Result<LangfuseClient> {
        let config = LangfuseConfig::new(
            self.base_url
                .unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string()),
            self.public_key
                .ok_or_else(|| Error::config("public key is required"))?,
            self.secret_key
                .ok_or_else(|| Error::config("secret key is required"))?,
        );

        let transport = match (self.transport, self.timeout) {
            (Some(transport), _) => transport,
            (None, Some(timeout)) => HyperTransport::builder().timeout(timeout).build(),
            (None, None) => HyperTransport::new(),
        };

        LangfuseClient::new(config, transport)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use assert2::{check, let_assert};
    use bytes::Bytes;

    use super::*;
    use crate::Response;

    /// Records requests and answers with a canned response.
    #[derive(Clone)]
    struct FakeTransport {
        status: u16,
        body: Bytes,
        seen: Arc<Mutex<Vec<Request>>>,
    }

    impl FakeTransport {
        fn new(status: u16, body: impl Into<Bytes>) -> Self {
            Self {
                status,
                body: body.into(),
                seen: Arc::default(),
            }
        }

        fn requests(&self) -> Vec<Request> {
            self.seen.lock().expect("lock").clone()
        }
    }

    impl Transport for FakeTransport {
        async fn send(&self, request: Request) -> Result<Response> {
            self.seen.lock().expect("lock").push(request);
            Ok(Response::new(self.status, HashMap::new(), self.body.clone()))
        }
    }

    fn prompt_body(name: &str, version: u32) -> String {
        serde_json::json!({
            "id": "test-id",
            "name": name,
            "version": version,
            "type": "text",
            "prompt": "Test content",
            "labels": ["production"],
            "tags": [],
            "config": {},
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        })
        .to_string()
    }

    fn client(transport: FakeTransport) -> LangfuseClient<FakeTransport> {
        let config = LangfuseConfig::new("https://cloud.langfuse.com", "test-key", "test-secret");
        LangfuseClient::new(config, transport).expect("client")
    }

    #[tokio::test]
    async fn get_prompt_builds_encoded_request() {
        let transport = FakeTransport::new(200, prompt_body("my test prompt", 2));
        let client = client(transport.clone());

        let prompt = client
            .get_prompt("my test prompt", Some(2), None)
            .await
            .expect("prompt");
        check!(prompt.name == "my test prompt");
        check!(prompt.version == 2);

        let requests = transport.requests();
        let_assert!([request] = requests.as_slice());
        check!(request.method() == Method::Get);
        check!(request.path_and_query() == "/api/public/v2/prompts/my%20test%20prompt?version=2");
        check!(request.header("Authorization") == Some("Basic dGVzdC1rZXk6dGVzdC1zZWNyZXQ="));
        check!(request.header("Accept") == Some("application/json"));
        check!(request.header("User-Agent") == Some(USER_AGENT));
    }

    #[tokio::test]
    async fn http_error_keeps_status_and_body() {
        let transport = FakeTransport::new(404, r#"{"message":"Prompt not found"}"#);
        let client = client(transport);

        let result = client.get_prompt("missing", None, None).await;
        let_assert!(Err(Error::Http { status, body, .. }) = result);
        check!(status == 404);
        check!(body.as_ref() == br#"{"message":"Prompt not found"}"#);
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_deserialization_error() {
        let transport = FakeTransport::new(200, r#"{"id":"x","name":"p"}"#);
        let client = client(transport);

        let err = client.get_prompt("p", None, None).await.expect_err("bad body");
        check!(err.is_deserialization());
        check!(err.status().is_none());
    }

    #[tokio::test]
    async fn cancelled_before_response() {
        struct Hanging;

        impl Transport for Hanging {
            async fn send(&self, _request: Request) -> Result<Response> {
                std::future::pending().await
            }
        }

        let config = LangfuseConfig::new("https://cloud.langfuse.com", "pk", "sk");
        let client = LangfuseClient::new(config, Hanging).expect("client");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client
            .get_prompt_with_cancel("p", None, None, &cancel)
            .await;
        let_assert!(Err(Error::Cancelled) = result);
    }

    #[test]
    fn rejects_bad_configuration() {
        let transport = FakeTransport::new(200, "");

        let result = LangfuseClient::new(
            LangfuseConfig::new("not a url", "pk", "sk"),
            transport.clone(),
        );
        let_assert!(Err(Error::InvalidUrl(_)) = result);

        let result = LangfuseClient::new(
            LangfuseConfig::new("https://cloud.langfuse.com", "pk", ""),
            transport,
        );
        let_assert!(Err(Error::Config(_)) = result);
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let client = client(FakeTransport::new(200, ""));
        let debug = format!("{client:?}");
        check!(debug.contains("test-key"));
        check!(!debug.contains("test-secret"));
        check!(!debug.contains("dGVzdC1rZXk6dGVzdC1zZWNyZXQ="));
    }

    #[test]
    fn builder_requires_keys() {
        let result = LangfuseClient::builder().public_key("pk").build();
        let_assert!(Err(Error::Config(message)) = result);
        check!(message.contains("secret key"));
    }
}
