//! HTTP request building.
//!
//! Requests to the public API are bodiless reads, so a request is just a
//! method, a URL and headers. The URL is expected to be fully encoded already,
//! normally produced by [`RequestTarget::resolve`](crate::RequestTarget::resolve).
//!
//! # Example
//!
//! ```
//! use langfuse_core::{Method, Request};
//!
//! let url = "https://cloud.langfuse.com/api/public/v2/prompts/test%20prompt".parse().unwrap();
//! let request = Request::builder(Method::Get, url)
//!     .header("Accept", "application/json")
//!     .build();
//! assert_eq!(request.path_and_query(), "/api/public/v2/prompts/test%20prompt");
//! ```

use std::collections::HashMap;

use crate::Method;

/// Header whose value is never printed by `Debug`.
const AUTHORIZATION: &str = "Authorization";

/// An HTTP request: method, URL and headers.
#[derive(Clone)]
pub struct Request {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// The request target as sent on the request line: path plus `?query` if any.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{query}", self.url.path()),
            None => self.url.path().to_string(),
        }
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Consume into (method, url, headers).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>) {
        (self.method, self.url, self.headers)
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: HashMap<&str, &str> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(AUTHORIZATION) {
                    (name.as_str(), "<redacted>")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .finish()
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            request: Request {
                method,
                url,
                headers: HashMap::new(),
            },
        }
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        self.request
    }
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RequestBuilder").field(&self.request).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> url::Url {
        url::Url::parse(s).expect("valid URL")
    }

    #[test]
    fn request_builder_basic() {
        let request = Request::builder(Method::Get, url("https://cloud.langfuse.com/api"))
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://cloud.langfuse.com/api");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.headers().len(), 1);
    }

    #[test]
    fn header_replaces_previous_value() {
        let request = Request::builder(Method::Get, url("https://cloud.langfuse.com/api"))
            .header("Accept", "text/plain")
            .header("Accept", "application/json")
            .build();
        assert_eq!(request.header("Accept"), Some("application/json"));
    }

    #[test]
    fn path_and_query_keeps_encoding() {
        let request = Request::builder(
            Method::Get,
            url("https://cloud.langfuse.com/api/public/v2/prompts/a%2Fb?label=my%20label"),
        )
        .build();
        assert_eq!(
            request.path_and_query(),
            "/api/public/v2/prompts/a%2Fb?label=my%20label"
        );
    }

    #[test]
    fn debug_redacts_authorization() {
        let request = Request::builder(Method::Get, url("https://cloud.langfuse.com/x"))
            .header("Authorization", "Basic c2VjcmV0")
            .header("Accept", "application/json")
            .build();

        let debug = format!("{request:?}");
        assert!(!debug.contains("c2VjcmV0"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("application/json"));
    }

    #[test]
    fn into_parts_keeps_everything() {
        let request = Request::builder(Method::Get, url("https://cloud.langfuse.com/x?version=1"))
            .header("X-Test", "1")
            .build();
        let (method, url, headers) = request.into_parts();
        assert_eq!(method, Method::Get);
        assert_eq!(url.query(), Some("version=1"));
        assert_eq!(headers.get("X-Test").map(String::as_str), Some("1"));
    }
}
