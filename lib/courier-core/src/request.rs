//! Request configuration and per-verb serialization.
//!
//! A [`RequestConfig`] holds what the caller set up (URL, headers, params).
//! [`RequestConfig::serialize`] turns a snapshot of it into a [`WireRequest`]
//! for one [`Verb`].
//!
//! # Example
//!
//! ```
//! use courier_core::{RequestConfig, Verb};
//!
//! let mut config = RequestConfig::new("http://x/api");
//! config.add_param("a", "1");
//! config.add_param("b", "2 c");
//!
//! let request = config.serialize(Verb::Get).expect("valid request");
//! assert_eq!(request.url().as_str(), "http://x/api?a=1&b=2%20c");
//! assert!(request.body().is_none());
//! ```

use bytes::Bytes;

use crate::{Error, FORM_URL_ENCODED, Params, Result, Verb, to_form, to_query_string};

/// What the caller configured before calling `execute`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    url: String,
    headers: Params,
    params: Params,
}

impl RequestConfig {
    /// Creates a config for the given URL, without headers or params.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Params::new(),
            params: Params::new(),
        }
    }

    /// Base URL, as given.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Configured headers.
    #[must_use]
    pub const fn headers(&self) -> &Params {
        &self.headers
    }

    /// Configured params.
    #[must_use]
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Appends a param.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.add(name, value);
    }

    /// Appends a header.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.add(name, value);
    }

    /// Build the wire request for `verb`.
    ///
    /// - `GET` appends the params as a query string.
    /// - `POST` and `PUT` send non-empty params as a form-encoded body.
    /// - `DELETE` ignores the params.
    ///
    /// Headers are attached in order for every verb.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the resulting URL does not parse,
    /// a header is not valid HTTP, or form serialization fails.
    pub fn serialize(&self, verb: Verb) -> Result<WireRequest> {
        let (url, body) = match verb {
            Verb::Get => (
                format!("{}{}", self.url, to_query_string(&self.params)),
                None,
            ),
            Verb::Post | Verb::Put if !self.params.is_empty() => {
                (self.url.clone(), Some(to_form(&self.params)?))
            }
            // DELETE drops params on purpose
            Verb::Post | Verb::Put | Verb::Delete => (self.url.clone(), None),
        };
        let url = url::Url::parse(&url)?;

        check_headers(&self.headers)?;
        let mut headers = self.headers.clone();
        if body.is_some() && !headers.contains("Content-Type") {
            headers.add("Content-Type", FORM_URL_ENCODED);
        }

        Ok(WireRequest {
            verb,
            url,
            headers,
            body,
        })
    }
}

fn check_headers(headers: &Params) -> Result<()> {
    for header in headers {
        http::HeaderName::from_bytes(header.name().as_bytes())
            .map_err(|e| Error::invalid_header(format!("{:?}: {e}", header.name())))?;
        http::HeaderValue::from_str(header.value())
            .map_err(|e| Error::invalid_header(format!("{}: {e}", header.name())))?;
    }
    Ok(())
}

/// A fully serialized request, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    verb: Verb,
    url: url::Url,
    headers: Params,
    body: Option<Bytes>,
}

impl WireRequest {
    /// Verb this request was built for.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// Request URL, query string included.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers, in order.
    #[must_use]
    pub const fn headers(&self) -> &Params {
        &self.headers
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into (verb, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Verb, url::Url, Params, Option<Bytes>) {
        (self.verb, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RequestConfig {
        let mut config = RequestConfig::new("http://x/api");
        config.add_header("Accept", "text/plain");
        config.add_header("X-Trace", "1");
        config.add_param("a", "1");
        config.add_param("b", "2 c");
        config
    }

    #[test]
    fn get_appends_query_string() {
        let request = config().serialize(Verb::Get).expect("request");

        assert_eq!(request.verb(), Verb::Get);
        assert_eq!(request.url().as_str(), "http://x/api?a=1&b=2%20c");
        assert!(request.body().is_none());
    }

    #[test]
    fn get_without_params_keeps_url() {
        let request = RequestConfig::new("http://x/api")
            .serialize(Verb::Get)
            .expect("request");
        assert_eq!(request.url().as_str(), "http://x/api");
    }

    #[test]
    fn post_and_put_send_form_body() {
        for verb in [Verb::Post, Verb::Put] {
            let request = config().serialize(verb).expect("request");

            assert_eq!(request.url().as_str(), "http://x/api");
            assert_eq!(request.body().map(|b| &b[..]), Some(b"a=1&b=2+c".as_slice()));
            assert_eq!(
                request.headers().get("Content-Type"),
                Some("application/x-www-form-urlencoded; charset=UTF-8")
            );
        }
    }

    #[test]
    fn post_without_params_has_no_body() {
        let request = RequestConfig::new("http://x/api")
            .serialize(Verb::Post)
            .expect("request");
        assert!(request.body().is_none());
        assert!(!request.headers().contains("Content-Type"));
    }

    #[test]
    fn caller_content_type_is_kept() {
        let mut config = config();
        config.add_header("content-type", "application/x-www-form-urlencoded");

        let request = config.serialize(Verb::Put).expect("request");
        let content_types: Vec<&str> = request
            .headers()
            .iter()
            .filter(|h| h.name().eq_ignore_ascii_case("content-type"))
            .map(crate::NameValue::value)
            .collect();
        assert_eq!(content_types, ["application/x-www-form-urlencoded"]);
    }

    #[test]
    fn delete_ignores_params() {
        let request = config().serialize(Verb::Delete).expect("request");

        assert_eq!(request.url().as_str(), "http://x/api");
        assert!(request.body().is_none());
    }

    #[test]
    fn headers_attached_identically_for_every_verb() {
        let config = config();
        for verb in Verb::ALL {
            let request = config.serialize(verb).expect("request");
            let headers: Vec<String> = request
                .headers()
                .iter()
                .take(2)
                .map(ToString::to_string)
                .collect();
            assert_eq!(headers, ["Accept=text/plain", "X-Trace=1"], "{verb}");
        }
    }

    #[test]
    fn invalid_url_is_configuration_error() {
        let err = RequestConfig::new("not a url")
            .serialize(Verb::Get)
            .expect_err("invalid url");
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn invalid_header_is_configuration_error() {
        let mut config = RequestConfig::new("http://x/api");
        config.add_header("X-Bad", "line\nbreak");

        let err = config.serialize(Verb::Delete).expect_err("invalid header");
        assert!(matches!(err, Error::InvalidHeader(_)));

        let mut config = RequestConfig::new("http://x/api");
        config.add_header("bad name", "value");
        assert!(config.serialize(Verb::Get).is_err());
    }
}
