//! Prelude module for convenient imports.
//!
//! ```ignore
//! use langfuse::prelude::*;
//! ```

pub use crate::{
    CancellationToken, ChatMessage, ClientConfig, Error, HyperTransport, LangfuseClient,
    LangfuseConfig, Prompt, PromptContent, PromptKind, Result, Transport,
};
