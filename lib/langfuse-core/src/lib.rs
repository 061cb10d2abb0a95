//! Core types and traits for the Langfuse client.
//!
//! This crate is transport-agnostic. It provides:
//! - [`encode_segment`], [`QueryParams`], [`PathTemplate`] and [`RequestTarget`] -
//!   percent-encoding of caller-supplied identifiers into a request target
//! - [`Method`], [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Transport`] - the "send a request, get a response" seam
//! - [`Error`] and [`Result`] - error handling
//! - [`Prompt`] and [`prompt_target`] - the prompt resource and its address

mod body;
mod encode;
mod error;
mod method;
mod path_template;
pub mod prelude;
pub mod prompt;
mod request;
mod response;
mod target;
mod transport;

pub use body::{APPLICATION_JSON, from_json};
pub use encode::{QueryParams, decode_component, encode_component, encode_segment};
pub use error::{Error, Result};
pub use method::Method;
pub use path_template::PathTemplate;
pub use prompt::{ChatMessage, Prompt, PromptContent, PromptKind, prompt_target};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use target::RequestTarget;
pub use transport::Transport;
