//! Tower middleware for [`HyperTransport`](crate::HyperTransport).
//!
//! Layers wrap the transport, not the client: the client always issues one
//! logical request per call, and whatever timeout, retry or throttling policy
//! applies is composed here.
//!
//! | Feature | Helper |
//! |---------|--------|
//! | `middleware-logging` | `.with_logging()` |
//! | `middleware-retry` | `.with_retry()` |
//! | `middleware-concurrency` | `.with_concurrency_limit()` |
//! | `middleware-full` | all of the above |
//!
//! The layers themselves are always available through
//! [`HyperTransportBuilder::layer`](crate::HyperTransportBuilder::layer).
//!
//! # Example
//!
//! ```ignore
//! use langfuse::HyperTransport;
//!
//! let transport = HyperTransport::builder()
//!     .with_logging()
//!     .with_retry(3)
//!     .build();
//! ```

mod logging;
mod retry;

pub use logging::{Logging, LoggingLayer, Verbosity};
pub use retry::RetryPolicy;

// Re-export tower types for convenience
pub use tower::limit::ConcurrencyLimitLayer;
pub use tower::retry::RetryLayer;
pub use tower::{Layer, ServiceBuilder};
