use super::{ErrorPolicy, Result, Severity};

/// Extension trait for `Result` enabling policy-driven emission without
/// contaminating control flow with side effects.
///
/// ```rust,ignore
/// use navmenu_error::{DomainError, ResultExt, TracingPolicy};
///
/// let r: navmenu_error::Result<()> = Err(DomainError::Loader { message: "gone".into() }.into());
/// let r = r.emit_event(&TracingPolicy); // logged, still Err for the caller
/// ```
pub trait ResultExt<T> {
    /// Emit the error using the provided policy and return the result unchanged
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self;

    /// Emit only when the policy classifies the error as a warning
    fn emit_warning(self, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }

    fn emit_warning(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            if policy.classify(e) == Severity::Warning {
                policy.emit(e);
            }
        }
        self
    }
}
