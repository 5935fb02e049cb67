//! Worker side of an `execute` call.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use courier_core::{Error, Failure, Outcome, Success, Transport, WireRequest, read_body};
use futures_util::FutureExt;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::WorkerPolicy;

/// Admission control for worker tasks.
#[derive(Debug, Clone)]
pub(crate) enum Workers {
    Unbounded,
    Bounded(Arc<Semaphore>),
}

impl Workers {
    pub(crate) fn new(policy: WorkerPolicy) -> Self {
        match policy {
            WorkerPolicy::Unbounded => Self::Unbounded,
            WorkerPolicy::Bounded(max) => Self::Bounded(Arc::new(Semaphore::new(max.max(1)))),
        }
    }

    /// Wait for a slot. The permit is released when dropped.
    pub(crate) async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(semaphore) => Arc::clone(semaphore).acquire_owned().await.ok(),
        }
    }
}

/// Run one exchange to completion and turn it into an [`Outcome`].
///
/// The response and its body stream are dropped before this returns, so the
/// transport's connection is released on every path. A panic in the
/// transport or while reading the body becomes an [`Error::Panicked`]
/// failure.
pub(crate) async fn exchange<T: Transport>(transport: &T, request: WireRequest) -> Outcome {
    let verb = request.verb();

    let result = AssertUnwindSafe(async {
        let response = transport.send(request).await?;
        let (status, reason, _headers, body) = response.into_parts();
        let body = match body {
            Some(body) => Some(read_body(body).await?),
            None => None,
        };
        Ok::<_, Error>(Success::new(verb, status, reason, body))
    })
    .catch_unwind()
    .await
    .unwrap_or_else(|payload| Err(Error::panicked(panic_message(payload.as_ref()))));

    match result {
        Ok(success) => {
            debug!(status = success.status(), "exchange completed");
            success.into()
        }
        Err(error) => {
            warn!(%error, "exchange failed");
            Failure::new(verb, error).into()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
