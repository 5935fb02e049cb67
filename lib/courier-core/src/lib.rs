//! Core types and traits for the courier HTTP client.
//!
//! This crate provides the transport-independent pieces:
//! - [`Verb`] - the four request kinds
//! - [`Params`] and [`NameValue`] - ordered params and headers
//! - [`RequestConfig`] and [`WireRequest`] - per-verb serialization
//! - [`TransportResponse`] and [`read_body`] - response head and body reassembly
//! - [`Outcome`], [`Success`], [`Failure`] - the result of one call
//! - [`Listener`] - completion callback contract
//! - [`Transport`] - the HTTP collaborator seam
//! - [`Error`] and [`Result`] - error handling

mod body;
mod error;
mod listener;
mod outcome;
mod params;
pub mod prelude;
mod request;
mod response;
mod transport;
mod verb;

pub use body::{FORM_URL_ENCODED, encode_query_value, to_form, to_query_string};
pub use error::{Error, Result};
pub use listener::Listener;
pub use outcome::{Failure, Outcome, Success};
pub use params::{NameValue, Params};
pub use request::{RequestConfig, WireRequest};
pub use response::{ResponseBody, TransportResponse, read_body};
pub use transport::Transport;
pub use verb::Verb;
