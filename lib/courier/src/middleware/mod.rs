//! Tower layers for courier transports.
//!
//! Layers wrap a [`Transport`](courier_core::Transport) and return another
//! one, so they compose with [`tower::Layer`] and
//! [`RestClientBuilder::layer`](crate::RestClientBuilder::layer). The first
//! layer added is the outermost.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use courier::{ExecutionContext, RestClient};
//!
//! let context = ExecutionContext::new();
//! let client = RestClient::builder("https://api.example.com", context.handle())
//!     .with_logging()
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::Layer;
