//! HTTP verb types.

use derive_more::Display;

/// The four request kinds a client can execute.
///
/// Each verb selects exactly one serialization rule in
/// [`RequestConfig::serialize`](crate::RequestConfig::serialize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Verb {
    /// GET: params travel in the query string.
    #[display("GET")]
    Get,
    /// POST: params travel as a form-encoded body.
    #[display("POST")]
    Post,
    /// PUT: params travel as a form-encoded body.
    #[display("PUT")]
    Put,
    /// DELETE: params are not sent.
    #[display("DELETE")]
    Delete,
}

impl Verb {
    /// All verbs, in declaration order.
    pub const ALL: [Self; 4] = [Self::Get, Self::Post, Self::Put, Self::Delete];

    /// Returns `true` if params are sent as a form-encoded body.
    #[must_use]
    pub const fn has_form_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl From<Verb> for http::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => Self::GET,
            Verb::Post => Self::POST,
            Verb::Put => Self::PUT,
            Verb::Delete => Self::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_display() {
        assert_eq!(Verb::Get.to_string(), "GET");
        assert_eq!(Verb::Post.to_string(), "POST");
        assert_eq!(Verb::Put.to_string(), "PUT");
        assert_eq!(Verb::Delete.to_string(), "DELETE");
    }

    #[test]
    fn verb_has_form_body() {
        assert!(!Verb::Get.has_form_body());
        assert!(Verb::Post.has_form_body());
        assert!(Verb::Put.has_form_body());
        assert!(!Verb::Delete.has_form_body());
    }

    #[test]
    fn verb_into_http() {
        let methods: Vec<http::Method> = Verb::ALL.into_iter().map(Into::into).collect();
        assert_eq!(
            methods,
            [
                http::Method::GET,
                http::Method::POST,
                http::Method::PUT,
                http::Method::DELETE
            ]
        );
    }
}
