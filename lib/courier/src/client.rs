//! The REST client: request configuration, dispatch and completion delivery.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use courier_core::{
    Error, Listener, Outcome, Params, RequestConfig, Result, Transport, Verb, WireRequest,
};
use tokio::runtime::Handle;
use tower::Layer;
use tracing::{Instrument, Span, debug, info_span, warn};

use crate::{
    BoxTransport, ClientConfig, ClientConfigBuilder, ContextHandle, HyperTransport, WorkerPolicy,
    middleware::LoggingLayer,
    worker::{self, Workers},
};

type ListenerSlot = Arc<Mutex<Option<Arc<dyn Listener>>>>;

type LayerFn = Box<dyn FnOnce(BoxTransport) -> BoxTransport + Send + Sync>;

/// Asynchronous HTTP client delivering results through callbacks.
///
/// Configure URL, headers and params, then call [`execute`](Self::execute).
/// The request runs on a tokio worker task; its [`Outcome`] is posted to the
/// client's [`ExecutionContext`](crate::ExecutionContext) and handed to the
/// registered [`Listener`] when the caller dispatches that context.
///
/// # Example
///
/// ```ignore
/// use courier::prelude::*;
///
/// struct Print;
///
/// impl Listener for Print {
///     fn on_finish(&self, success: Success) {
///         println!("{} {}", success.status(), success.reason());
///     }
///     fn on_error(&self, failure: Failure) {
///         eprintln!("{}", failure.error());
///     }
/// }
///
/// let mut context = ExecutionContext::new();
/// let mut client = RestClient::new("https://httpbin.org/get", context.handle());
/// client.set_listener(Print);
/// client.add_param("q", "rust").execute(Verb::Get)?;
///
/// context.dispatch_next().await;
/// ```
pub struct RestClient {
    request: RequestConfig,
    listener: ListenerSlot,
    context: ContextHandle,
    transport: BoxTransport,
    workers: Workers,
    runtime: Option<Handle>,
    config: ClientConfig,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("request", &self.request)
            .field("has_listener", &self.has_listener())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client for `url` with the default hyper transport.
    #[must_use]
    pub fn new(url: impl Into<String>, context: ContextHandle) -> Self {
        Self::builder(url, context).build()
    }

    /// Create a new client builder.
    #[must_use]
    pub fn builder(url: impl Into<String>, context: ContextHandle) -> RestClientBuilder {
        RestClientBuilder::new(url, context)
    }

    /// Base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.request.url()
    }

    /// Configured params.
    #[must_use]
    pub const fn params(&self) -> &Params {
        self.request.params()
    }

    /// Configured headers.
    #[must_use]
    pub const fn headers(&self) -> &Params {
        self.request.headers()
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Appends a param. GET sends it in the query string, POST and PUT in
    /// the form body, DELETE not at all.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.request.add_param(name, value);
        self
    }

    /// Appends a header, sent with every verb.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.request.add_header(name, value);
        self
    }

    /// Register the listener, replacing any previous one.
    ///
    /// The slot is read when a completion is dispatched, not when `execute`
    /// is called: a call in flight reports to whichever listener is set at
    /// that time.
    pub fn set_listener(&self, listener: impl Listener) {
        let listener: Arc<dyn Listener> = Arc::new(listener);
        *self.lock_listener() = Some(listener);
    }

    /// Remove the listener. Later completions are dropped.
    pub fn clear_listener(&self) {
        *self.lock_listener() = None;
    }

    /// Returns `true` if a listener is registered.
    #[must_use]
    pub fn has_listener(&self) -> bool {
        self.lock_listener().is_some()
    }

    fn lock_listener(&self) -> std::sync::MutexGuard<'_, Option<Arc<dyn Listener>>> {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Execute the request with `verb` and report to the listener.
    ///
    /// Returns as soon as the worker is spawned. The outcome reaches the
    /// registered listener once the execution context is dispatched; if no
    /// listener is registered at that point, it is dropped.
    ///
    /// # Errors
    ///
    /// Returns a configuration error, before any network activity, if the
    /// request cannot be serialized or no tokio runtime is available.
    pub fn execute(&self, verb: Verb) -> Result<()> {
        let request = self.request.serialize(verb)?;
        let slot = Arc::clone(&self.listener);
        self.offload(request, move |outcome| notify_listener(&slot, outcome))
    }

    /// Execute the request with `verb` and report to `on_complete` only.
    ///
    /// The listener slot is bypassed, so concurrent calls can each be
    /// observed on their own. `on_complete` runs once, on the execution
    /// context.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn execute_with<F>(&self, verb: Verb, on_complete: F) -> Result<()>
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let request = self.request.serialize(verb)?;
        self.offload(request, on_complete)
    }

    fn offload<F>(&self, request: WireRequest, deliver: F) -> Result<()>
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let runtime = match &self.runtime {
            Some(handle) => handle.clone(),
            None => Handle::try_current().map_err(|_| Error::NoRuntime)?,
        };

        let span = info_span!("execute", verb = %request.verb(), url = %request.url());
        debug!(parent: &span, "dispatching request");

        let transport = self.transport.clone();
        let workers = self.workers.clone();
        let context = self.context.clone();

        runtime.spawn(
            async move {
                let permit = workers.acquire().await;
                let outcome = worker::exchange(&transport, request).await;
                drop(permit);

                let span = Span::current();
                let posted = context.post(move || {
                    let _entered = span.enter();
                    deliver(outcome);
                });
                if !posted {
                    warn!("execution context is gone, outcome dropped");
                }
            }
            .instrument(span),
        );

        Ok(())
    }
}

fn notify_listener(slot: &ListenerSlot, outcome: Outcome) {
    let listener = slot
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();

    match listener {
        Some(listener) => outcome.notify(listener.as_ref()),
        None => debug!(verb = %outcome.verb(), "no listener registered, outcome dropped"),
    }
}

/// Builder for [`RestClient`].
///
/// # Example
///
/// ```ignore
/// use courier::{ExecutionContext, RestClient};
///
/// let context = ExecutionContext::new();
/// let client = RestClient::builder("https://api.example.com/items", context.handle())
///     .max_workers(8)
///     .with_logging()
///     .build();
/// ```
pub struct RestClientBuilder {
    url: String,
    context: ContextHandle,
    config: ClientConfigBuilder,
    runtime: Option<Handle>,
    transport: Option<BoxTransport>,
    layers: Vec<LayerFn>,
}

impl std::fmt::Debug for RestClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClientBuilder")
            .field("url", &self.url)
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .field("layers_count", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl RestClientBuilder {
    fn new(url: impl Into<String>, context: ContextHandle) -> Self {
        Self {
            url: url.into(),
            context,
            config: ClientConfigBuilder::default(),
            runtime: None,
            transport: None,
            layers: Vec::new(),
        }
    }

    // ========================================================================
    // Core Configuration
    // ========================================================================

    /// Set the worker policy.
    #[must_use]
    pub fn workers(mut self, workers: WorkerPolicy) -> Self {
        self.config = self.config.workers(workers);
        self
    }

    /// Limit the number of concurrent transport calls.
    #[must_use]
    pub fn max_workers(mut self, max: usize) -> Self {
        self.config = self.config.max_workers(max);
        self
    }

    /// Set the connection timeout of the default transport.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.connect_timeout(timeout);
        self
    }

    /// Set the maximum idle connections per host of the default transport.
    #[must_use]
    pub fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.config = self.config.pool_idle_per_host(count);
        self
    }

    /// Set the idle connection timeout of the default transport.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.pool_idle_timeout(timeout);
        self
    }

    /// Spawn workers on this runtime instead of the one current at
    /// `execute` time.
    #[must_use]
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Use a custom transport instead of [`HyperTransport`].
    #[must_use]
    pub fn transport<T: Transport>(mut self, transport: T) -> Self {
        self.transport = Some(BoxTransport::new(transport));
        self
    }

    // ========================================================================
    // Middleware
    // ========================================================================

    /// Add a Tower layer around the transport.
    ///
    /// Layers are applied in order: first added = outermost.
    #[must_use]
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxTransport> + Send + Sync + 'static,
        L::Service: Transport,
    {
        self.layers
            .push(Box::new(move |transport| BoxTransport::new(layer.layer(transport))));
        self
    }

    /// Add request/response logging.
    #[must_use]
    pub fn with_logging(self) -> Self {
        self.layer(LoggingLayer::new())
    }

    /// Add debug-level logging (includes headers).
    #[must_use]
    pub fn with_debug_logging(self) -> Self {
        self.layer(LoggingLayer::debug())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the client.
    #[must_use]
    pub fn build(self) -> RestClient {
        let config = self.config.build();

        let mut transport = self
            .transport
            .unwrap_or_else(|| BoxTransport::new(HyperTransport::with_config(&config)));
        for layer_fn in self.layers.into_iter().rev() {
            transport = layer_fn(transport);
        }

        RestClient {
            request: RequestConfig::new(self.url),
            listener: Arc::new(Mutex::new(None)),
            context: self.context,
            transport,
            workers: Workers::new(config.workers),
            runtime: self.runtime,
            config,
        }
    }
}
