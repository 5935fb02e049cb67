//! Param encoding for query strings and form bodies.

use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{Params, Result};

/// Bytes left as-is in query values: ASCII alphanumerics and `.-*_`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'*')
    .remove(b'_');

/// Content type sent with form bodies unless the caller set one.
pub const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Percent-encode a single query value as UTF-8.
///
/// # Example
///
/// ```
/// use courier_core::encode_query_value;
///
/// assert_eq!(encode_query_value("2 c"), "2%20c");
/// assert_eq!(encode_query_value("a.b-c*d_e"), "a.b-c*d_e");
/// ```
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Build the query string for a GET request.
///
/// Returns an empty string when there are no params, otherwise `?` followed
/// by `name=encoded_value` pairs joined with `&`. Names are sent verbatim.
///
/// # Example
///
/// ```
/// use courier_core::{Params, to_query_string};
///
/// let params: Params = [("a", "1"), ("b", "2 c")].into_iter().collect();
/// assert_eq!(to_query_string(&params), "?a=1&b=2%20c");
/// ```
#[must_use]
pub fn to_query_string(params: &Params) -> String {
    let mut query = String::new();
    for pair in params {
        query.push(if query.is_empty() { '?' } else { '&' });
        query.push_str(pair.name());
        query.push('=');
        query.push_str(&encode_query_value(pair.value()));
    }
    query
}

/// Serialize params to an `application/x-www-form-urlencoded` body.
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use courier_core::{Params, to_form};
///
/// let params: Params = [("user", "alice"), ("note", "hi there")].into_iter().collect();
/// let body = to_form(&params).expect("serialize");
/// assert_eq!(body.as_ref(), b"user=alice&note=hi+there");
/// ```
pub fn to_form(params: &Params) -> Result<Bytes> {
    let pairs: Vec<(&str, &str)> = params
        .iter()
        .map(|pair| (pair.name(), pair.value()))
        .collect();
    serde_urlencoded::to_string(pairs)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_empty_params() {
        assert_eq!(to_query_string(&Params::new()), "");
    }

    #[test]
    fn query_string_single_pair_has_no_ampersand() {
        let params: Params = [("q", "rust")].into_iter().collect();
        assert_eq!(to_query_string(&params), "?q=rust");
    }

    #[test]
    fn query_string_encodes_values_only() {
        let params: Params = [("a b", "x&y=z"), ("k", "é/?")].into_iter().collect();
        assert_eq!(to_query_string(&params), "?a b=x%26y%3Dz&k=%C3%A9%2F%3F");
    }

    #[test]
    fn query_string_keeps_duplicates_in_order() {
        let params: Params = [("t", "1"), ("t", "2"), ("s", "")].into_iter().collect();
        assert_eq!(to_query_string(&params), "?t=1&t=2&s=");
    }

    #[test]
    fn form_body_in_insertion_order() {
        let params: Params = [("z", "last?"), ("a", "x y"), ("z", "again")]
            .into_iter()
            .collect();
        let body = to_form(&params).expect("form");
        assert_eq!(body.as_ref(), b"z=last%3F&a=x+y&z=again");
    }
}
