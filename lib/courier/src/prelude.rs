//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    ExecutionContext, Failure, Listener, Outcome, RestClient, Result, Success, Verb,
    WorkerPolicy,
};
