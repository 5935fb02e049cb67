//! Transport responses and body reassembly.
//!
//! A transport hands back a [`TransportResponse`] whose body, when present,
//! is a stream of chunks. [`read_body`] drains that stream and rebuilds the
//! text line by line, every line terminated by `\n`.

use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;

use crate::{Params, Result};

/// A response body: chunks of bytes arriving over time.
pub type ResponseBody = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// What a transport returns for one request.
pub struct TransportResponse {
    status: u16,
    reason: String,
    headers: Params,
    body: Option<ResponseBody>,
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

impl TransportResponse {
    /// Creates a new response.
    ///
    /// `body` is `None` when the server sent no entity at all.
    #[must_use]
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        headers: Params,
        body: Option<ResponseBody>,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers,
            body,
        }
    }

    /// Response with a body made of the given chunks.
    #[must_use]
    pub fn from_chunks<I>(status: u16, reason: impl Into<String>, chunks: I) -> Self
    where
        I: IntoIterator<Item = Bytes>,
        I::IntoIter: Send + 'static,
    {
        let stream = futures_util::stream::iter(chunks.into_iter().map(Ok));
        Self::new(status, reason, Params::new(), Some(Box::pin(stream)))
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Reason phrase.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &Params {
        &self.headers
    }

    /// Returns `true` if the server sent an entity.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Consume into (status, reason, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, String, Params, Option<ResponseBody>) {
        (self.status, self.reason, self.headers, self.body)
    }
}

/// Drain a body stream and rebuild its text line by line.
///
/// `\n`, `\r\n` and a lone `\r` each end a line; each line is written back
/// followed by a single `\n`, so a last line without terminator gains one.
/// Bytes that are not valid UTF-8 are replaced with `U+FFFD`. The stream is
/// dropped before returning, on success and on error.
///
/// # Errors
///
/// Returns the first chunk error.
pub async fn read_body(mut body: ResponseBody) -> Result<String> {
    let mut collected = Vec::new();
    while let Some(chunk) = body.next().await {
        collected.extend_from_slice(&chunk?);
    }
    drop(body);

    let text = String::from_utf8_lossy(&collected);
    Ok(reassemble_lines(&text))
}

fn reassemble_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut line = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\r' && c != '\n' {
            line.push(c);
            continue;
        }
        if c == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
        }
        out.push_str(&line);
        out.push('\n');
        line.clear();
    }
    if !line.is_empty() {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
