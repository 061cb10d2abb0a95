//! Prelude module for convenient imports.
//!
//! ```ignore
//! use langfuse_core::prelude::*;
//! ```

pub use crate::{
    Error, Method, Prompt, PromptContent, PromptKind, QueryParams, Request, RequestBuilder,
    RequestTarget, Response, Result, Transport, from_json, prompt_target,
};
