//! Request/response logging middleware.
//!
//! This middleware logs exchanges using the `tracing` crate.

use std::time::Instant;

use courier_core::{Result, Transport, TransportResponse, WireRequest};
use tower::Layer;
use tracing::{Instrument, Level, debug, info, span, warn};

/// Layer that adds request/response logging to a transport.
///
/// # Example
///
/// ```ignore
/// use courier::middleware::LoggingLayer;
/// use courier::{HyperTransport, tower::Layer};
///
/// let transport = LoggingLayer::new().layer(HyperTransport::new());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at debug level (request details and headers).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<T> Layer<T> for LoggingLayer {
    type Service = Logging<T>;

    fn layer(&self, inner: T) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Transport that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<T> {
    inner: T,
    level: LogLevel,
}

impl<T> Logging<T> {
    /// Create a new logging transport wrapping the given one.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

impl<T: Transport> Transport for Logging<T> {
    async fn send(&self, request: WireRequest) -> Result<TransportResponse> {
        let verb = request.verb();
        let url = request.url().to_string();

        let span = span!(Level::INFO, "http_request", %verb, %url);

        async move {
            let start = Instant::now();

            match self.level {
                LogLevel::Debug => {
                    debug!(
                        verb = %verb,
                        url = %url,
                        headers = ?request.headers(),
                        has_body = request.body().is_some(),
                        "sending request"
                    );
                }
                LogLevel::Info => {
                    info!(verb = %verb, url = %url, "sending request");
                }
            }

            let result = self.inner.send(request).await;

            // Saturating conversion to u64 (truncates after ~584 million years)
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match &result {
                Ok(response) => {
                    let status = response.status();
                    if (200..300).contains(&status) {
                        info!(status, elapsed_ms, "request completed");
                    } else {
                        warn!(status, elapsed_ms, "request completed with HTTP error");
                    }
                }
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "request failed");
                }
            }

            result
        }
        .instrument(span)
        .await
    }
}
