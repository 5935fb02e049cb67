//! Completion listener contract.

use crate::{Failure, Outcome, Success};

/// Receives the outcome of `execute` calls.
///
/// Exactly one of the two methods is called per `execute`, on the caller's
/// execution context.
///
/// # Example
///
/// ```
/// use courier_core::{Failure, Listener, Success};
///
/// struct PrintStatus;
///
/// impl Listener for PrintStatus {
///     fn on_finish(&self, success: Success) {
///         let _ = (success.status(), success.reason());
///     }
///
///     fn on_error(&self, failure: Failure) {
///         let _ = failure.error();
///     }
/// }
/// ```
pub trait Listener: Send + Sync + 'static {
    /// The server answered.
    fn on_finish(&self, success: Success);

    /// The exchange failed.
    fn on_error(&self, failure: Failure);
}

impl Outcome {
    /// Route this outcome to the matching listener method.
    pub fn notify(self, listener: &dyn Listener) {
        match self {
            Self::Success(success) => listener.on_finish(success),
            Self::Failure(failure) => listener.on_error(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{Error, Verb};

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Listener for Recorder {
        fn on_finish(&self, success: Success) {
            self.calls
                .lock()
                .expect("lock")
                .push(format!("finish {}", success.status()));
        }

        fn on_error(&self, failure: Failure) {
            self.calls
                .lock()
                .expect("lock")
                .push(format!("error {}", failure.error()));
        }
    }

    #[test]
    fn notify_routes_by_variant() {
        let recorder = Recorder::default();

        Outcome::from(Success::new(Verb::Get, 200, "OK", None)).notify(&recorder);
        Outcome::from(Failure::new(Verb::Get, Error::connection("refused"))).notify(&recorder);

        let calls = recorder.calls.lock().expect("lock");
        assert_eq!(*calls, ["finish 200", "error connection error: refused"]);
    }
}
