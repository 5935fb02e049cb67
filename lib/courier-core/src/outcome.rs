//! The single result of one `execute` call.

use crate::{Error, Verb};

/// A completed exchange: the server answered, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success {
    verb: Verb,
    status: u16,
    reason: String,
    body: Option<String>,
}

impl Success {
    /// Creates a new success.
    #[must_use]
    pub fn new(verb: Verb, status: u16, reason: impl Into<String>, body: Option<String>) -> Self {
        Self {
            verb,
            status,
            reason: reason.into(),
            body,
        }
    }

    /// Verb of the executed request.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
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

    /// Reassembled body text, `None` when the server sent no entity.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Consume into (verb, status, reason, body).
    #[must_use]
    pub fn into_parts(self) -> (Verb, u16, String, Option<String>) {
        (self.verb, self.status, self.reason, self.body)
    }
}

/// A transport or content failure.
#[derive(Debug)]
pub struct Failure {
    verb: Verb,
    error: Error,
}

impl Failure {
    /// Creates a new failure.
    #[must_use]
    pub const fn new(verb: Verb, error: Error) -> Self {
        Self { verb, error }
    }

    /// Verb of the executed request.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        self.verb
    }

    /// The captured error.
    #[must_use]
    pub const fn error(&self) -> &Error {
        &self.error
    }

    /// Consume into the error.
    #[must_use]
    pub fn into_error(self) -> Error {
        self.error
    }
}

/// Success or failure of one `execute` call.
#[derive(Debug)]
pub enum Outcome {
    /// The server answered.
    Success(Success),
    /// The exchange failed.
    Failure(Failure),
}

impl Outcome {
    /// Verb of the executed request.
    #[must_use]
    pub const fn verb(&self) -> Verb {
        match self {
            Self::Success(success) => success.verb(),
            Self::Failure(failure) => failure.verb(),
        }
    }

    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure when the exchange failed.
    pub fn into_result(self) -> Result<Success, Failure> {
        match self {
            Self::Success(success) => Ok(success),
            Self::Failure(failure) => Err(failure),
        }
    }
}

impl From<Success> for Outcome {
    fn from(success: Success) -> Self {
        Self::Success(success)
    }
}

impl From<Failure> for Outcome {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}
