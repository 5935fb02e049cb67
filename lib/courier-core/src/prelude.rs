//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    Error, Failure, Listener, Outcome, Params, RequestConfig, Result, Success, Transport,
    TransportResponse, Verb, WireRequest,
};
