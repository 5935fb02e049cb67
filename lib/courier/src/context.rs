//! Caller-side execution context and the completion channel feeding it.
//!
//! Workers never call listeners themselves. They post a delivery through a
//! [`ContextHandle`]; the deliveries run when the owner of the
//! [`ExecutionContext`] dispatches them, on the owner's own thread or task.
//!
//! # Example
//!
//! ```ignore
//! use courier::{ExecutionContext, RestClient, Verb};
//!
//! let mut context = ExecutionContext::new();
//! let client = RestClient::new("https://example.com", context.handle());
//! client.execute(Verb::Get)?;
//!
//! // later, on the caller's side
//! context.dispatch_next().await;
//! ```

use tokio::sync::mpsc;
use tracing::trace;

type Delivery = Box<dyn FnOnce() + Send>;

/// Queue of completions waiting to run on the caller's side.
///
/// Deliveries run in the order they were posted, one at a time, only from
/// [`dispatch_pending`](Self::dispatch_pending) or
/// [`dispatch_next`](Self::dispatch_next).
pub struct ExecutionContext {
    sender: mpsc::UnboundedSender<Delivery>,
    receiver: mpsc::UnboundedReceiver<Delivery>,
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("queued", &self.receiver.len())
            .finish()
    }
}

impl ExecutionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Handle for posting completions onto this context.
    #[must_use]
    pub fn handle(&self) -> ContextHandle {
        ContextHandle {
            sender: self.sender.clone(),
        }
    }

    /// Number of deliveries waiting to run.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.receiver.len()
    }

    /// Run every delivery already queued, without waiting.
    ///
    /// Returns how many ran.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(delivery) = self.receiver.try_recv() {
            delivery();
            count += 1;
        }
        if count > 0 {
            trace!(count, "dispatched pending completions");
        }
        count
    }

    /// Wait for the next delivery and run it.
    ///
    /// The context keeps a sender of its own, so this only returns `false`
    /// if the channel is closed, which does not happen while `self` lives.
    pub async fn dispatch_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(delivery) => {
                delivery();
                true
            }
            None => false,
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, thread-safe handle to an [`ExecutionContext`].
#[derive(Debug, Clone)]
pub struct ContextHandle {
    sender: mpsc::UnboundedSender<Delivery>,
}

impl ContextHandle {
    /// Queue `delivery` on the context.
    ///
    /// Returns `false` if the context is gone; the delivery is dropped.
    pub(crate) fn post<F>(&self, delivery: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.send(Box::new(delivery)).is_ok()
    }

    /// Returns `true` if the context was dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
