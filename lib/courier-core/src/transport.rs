//! Transport trait.
//!
//! A [`Transport`] performs the actual HTTP exchange. The client only hands
//! it a [`WireRequest`] and reads back a [`TransportResponse`]; sockets, TLS
//! and connection pooling live behind this seam.

use std::future::Future;

use crate::{Result, TransportResponse, WireRequest};

/// HTTP transport collaborator.
///
/// Implementations own every resource needed for one exchange and must
/// release them when the returned response (and its body) is dropped.
pub trait Transport: Send + Sync + 'static {
    /// Send a request and return the response head with its body stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Protocol errors
    fn send(
        &self,
        request: WireRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}
