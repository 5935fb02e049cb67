//! Asynchronous execute-and-callback HTTP client for Rust.
//!
//! Build a GET, POST, PUT or DELETE request from a URL, headers and params,
//! run it on a tokio worker, and receive the outcome back on your own
//! execution context through a [`Listener`] or a per-call callback.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! let mut context = ExecutionContext::new();
//! let mut client = RestClient::new("https://api.example.com/search", context.handle());
//! client.add_param("q", "rust");
//!
//! client.execute_with(Verb::Get, |outcome| match outcome {
//!     Outcome::Success(success) => println!("{}", success.status()),
//!     Outcome::Failure(failure) => eprintln!("{}", failure.error()),
//! })?;
//!
//! context.dispatch_next().await;
//! ```
//!
//! # Known limitations
//!
//! - There is no cancellation and no request deadline: once dispatched, a
//!   call runs until the transport answers or fails.
//! - With the default [`WorkerPolicy::Unbounded`], every call gets its own
//!   task with no backpressure. Use [`WorkerPolicy::Bounded`] to cap it.
//! - `DELETE` never sends params.
//! - Outcomes completing while no listener is registered are dropped.

mod client;
mod config;
mod connector;
mod context;
pub mod middleware;
pub mod prelude;
mod transport;
mod worker;

// Re-export client types
pub use client::{RestClient, RestClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder, WorkerPolicy};
pub use context::{ContextHandle, ExecutionContext};
pub use transport::{BoxTransport, HyperTransport, TransportFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    Error, FORM_URL_ENCODED, Failure, Listener, NameValue, Outcome, Params, RequestConfig,
    ResponseBody, Result, Success, Transport, TransportResponse, Verb, WireRequest,
    encode_query_value, read_body, to_form, to_query_string,
};
