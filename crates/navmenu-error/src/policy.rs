//! Policies for classifying and emitting errors.
//!
//! The engine crates return [`crate::Result`] and never print. Whoever drives the
//! menu (the event pump, a presenter, a test) installs an `ErrorPolicy` to decide
//! where warnings about failed loads and broken builds end up.
//!
//! ```rust,ignore
//! use navmenu_error::{Error, ErrorPolicy, Severity};
//!
//! struct PrintPolicy;
//! impl ErrorPolicy for PrintPolicy {
//!     fn classify(&self, e: &Error) -> Severity { e.severity() }
//!     fn emit(&self, e: &Error) { eprintln!("[{:?}] {e}", self.classify(e)); }
//! }
//! ```
use super::{Error, Severity};

pub trait ErrorPolicy {
    /// Classify the error's severity
    fn classify(&self, error: &Error) -> Severity;

    /// Emit the error according to the policy (log, forward to the presenter, ...)
    fn emit(&self, error: &Error);
}

/// Drops everything.
#[derive(Debug, Clone, Default)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, _error: &Error) {}
}

/// Uses the error's default severity and emits via tracing
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn classify(&self, error: &Error) -> Severity {
        error.severity()
    }

    fn emit(&self, error: &Error) {
        use tracing::{event, Level};

        match self.classify(error) {
            Severity::Warning => event!(Level::WARN, error = %error),
            Severity::Error | Severity::Fatal => event!(Level::ERROR, error = %error),
        }
    }
}
