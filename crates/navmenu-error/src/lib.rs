pub mod domain;
pub mod fatal;
pub mod internal;
pub mod policy;
pub mod result_ext;
pub mod severity;
pub mod warning;

// public exports
pub use domain::DomainError;
pub use fatal::FatalError;
pub use internal::InternalError;
pub use policy::{ErrorPolicy, NoopPolicy};
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use result_ext::ResultExt;
pub use severity::Severity;
pub use warning::WarningError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fatal(#[from] FatalError),
    #[error(transparent)]
    Warning(#[from] WarningError),
    #[error(transparent)]
    Internal(#[from] InternalError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl Error {
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::Warning(_))
    }

    /// Default classification used by the stock policies.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Warning(_) => Severity::Warning,
            Error::Internal(_) | Error::Domain(_) => Severity::Error,
            Error::Fatal(_) => Severity::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_variant() {
        let fatal: Error = FatalError::UnexpectedNavigation {
            navigation: "SelectedFile".into(),
            next_index: 1,
        }
        .into();
        assert_eq!(fatal.severity(), Severity::Fatal);

        let warning: Error = WarningError::UnknownSection { section: 4 }.into();
        assert!(warning.is_warning());
        assert_eq!(warning.severity(), Severity::Warning);

        let domain: Error = DomainError::Config {
            message: "bad".into(),
        }
        .into();
        assert_eq!(domain.severity(), Severity::Error);
    }

    #[test]
    fn transparent_display() {
        let err: Error = InternalError::InvalidState("boundary past end".into()).into();
        assert_eq!(err.to_string(), "Unexpected state: boundary past end");
    }
}
