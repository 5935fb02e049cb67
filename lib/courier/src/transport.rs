//! HTTP transport implementation using hyper-util.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use courier_core::{
    Error, Params, ResponseBody, Result, Transport, TransportResponse, WireRequest,
};
use futures_util::TryStreamExt;
use http::StatusCode;
use http_body_util::{BodyStream, Full};
use hyper::ext::ReasonPhrase;
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};

use crate::{ClientConfig, connector::https_connector};

/// Transport backed by hyper-util's pooled client, with rustls for HTTPS.
///
/// Connections go back to the pool (or are closed) as soon as the response
/// body is dropped, whether it was read to the end or not.
///
/// # Example
///
/// ```ignore
/// use courier::{ClientConfig, HyperTransport};
///
/// let transport = HyperTransport::with_config(&ClientConfig::default());
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport").finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: &ClientConfig) -> Self {
        let connector = https_connector(config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner }
    }

    /// Build a hyper request from a wire request.
    fn build_hyper_request(request: WireRequest) -> Result<http::Request<Full<Bytes>>> {
        let (verb, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder()
            .method(http::Method::from(verb))
            .uri(url.as_str());

        for header in &headers {
            builder = builder.header(header.name(), header.value());
        }

        let body = body.map_or_else(Full::default, Full::new);
        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers, keeping repeated names.
    fn extract_headers(headers: &http::HeaderMap) -> Params {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Reason phrase as sent by the server.
    ///
    /// hyper only records the phrase when it differs from the canonical one,
    /// so the canonical phrase is the fallback.
    fn reason_phrase<B>(response: &http::Response<B>) -> String {
        match response.extensions().get::<ReasonPhrase>() {
            Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
            None => response
                .status()
                .canonical_reason()
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Statuses that never carry a response entity.
    fn has_entity(status: StatusCode) -> bool {
        !(status.is_informational()
            || status == StatusCode::NO_CONTENT
            || status == StatusCode::NOT_MODIFIED)
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    async fn send(&self, request: WireRequest) -> Result<TransportResponse> {
        let hyper_request = Self::build_hyper_request(request)?;

        let response = self
            .inner
            .request(hyper_request)
            .await
            .map_err(Self::map_hyper_error)?;

        let status = response.status();
        let reason = Self::reason_phrase(&response);
        let headers = Self::extract_headers(response.headers());

        let body = if Self::has_entity(status) {
            let stream = BodyStream::new(response.into_body())
                .map_ok(|frame| frame.into_data().unwrap_or_default())
                .map_err(|e| Error::body(e.to_string()));
            Some(Box::pin(stream) as ResponseBody)
        } else {
            None
        };

        Ok(TransportResponse::new(
            status.as_u16(),
            reason,
            headers,
            body,
        ))
    }
}

// ============================================================================
// Type-Erased Transport for Middleware Composition
// ============================================================================

/// Future returned by [`BoxTransport`].
pub type TransportFuture =
    Pin<Box<dyn Future<Output = Result<TransportResponse>> + Send + 'static>>;

trait ErasedTransport: Send + Sync {
    fn send_boxed(&self, request: WireRequest) -> TransportFuture;
}

struct Erased<T>(Arc<T>);

impl<T: Transport> ErasedTransport for Erased<T> {
    fn send_boxed(&self, request: WireRequest) -> TransportFuture {
        let transport = Arc::clone(&self.0);
        Box::pin(async move { transport.send(request).await })
    }
}

/// Type-erased transport.
///
/// This type allows storing and composing arbitrary transports and tower
/// layers without exposing their generic types on the client.
#[derive(Clone)]
pub struct BoxTransport {
    inner: Arc<dyn ErasedTransport>,
}

impl BoxTransport {
    /// Erase the type of `transport`.
    pub fn new<T: Transport>(transport: T) -> Self {
        Self {
            inner: Arc::new(Erased(Arc::new(transport))),
        }
    }
}

impl std::fmt::Debug for BoxTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxTransport").finish_non_exhaustive()
    }
}

impl Transport for BoxTransport {
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send {
        self.inner.send_boxed(request)
    }
}
