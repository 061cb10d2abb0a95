//! Typed async client for the Langfuse prompt management API.
//!
//! Caller-supplied identifiers are percent-encoded into the request target,
//! requests carry HTTP Basic credentials, and responses decode into
//! [`Prompt`] values with JSON-path aware errors.
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//!
//! use langfuse::LangfuseClient;
//!
//! let client = LangfuseClient::from_env()?;
//!
//! // Latest production version
//! let prompt = client.get_prompt("movie-critic", None, Some("production")).await?;
//!
//! // A pinned version, name with spaces
//! let prompt = client.get_prompt("my prompt", Some(3), None).await?;
//! let variables = HashMap::from([("movie".to_string(), "Dune 2".to_string())]);
//! let compiled = prompt.compile(&variables);
//! ```
//!
//! The default transport is [`HyperTransport`]; anything implementing
//! [`Transport`] can stand in for it.

mod auth;
mod client;
mod config;
pub mod middleware;
pub mod prelude;
mod transport;

pub use auth::BasicCredentials;
pub use client::{LangfuseClient, LangfuseClientBuilder, USER_AGENT};
pub use config::{
    BASE_URL_VAR, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, LangfuseConfig,
    PUBLIC_KEY_VAR, SECRET_KEY_VAR,
};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export the cancellation primitive used by `get_prompt_with_cancel`
pub use tokio_util::sync::CancellationToken;

// Re-export core types
pub use langfuse_core::{
    APPLICATION_JSON, ChatMessage, Error, Method, PathTemplate, Prompt, PromptContent, PromptKind,
    QueryParams, Request, RequestBuilder, RequestTarget, Response, Result, Transport,
    decode_component, encode_component, encode_segment, from_json, prompt_target,
};

pub use url;
