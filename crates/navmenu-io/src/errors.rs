use navmenu_error::{DomainError, InternalError};

use super::*;

#[derive(Debug, Error, Clone)]
pub enum RecvError {
    #[error("Failed to send request to section loader")]
    SendError,
    #[error("Section loader event channel closed")]
    RecvError,
}

#[derive(Debug, Error, Clone)]
pub enum LoaderError {
    #[error("Section loader channel error")]
    Recv(#[from] RecvError),

    #[error("File operation {operation} failed for {path}: {source} (kind: {kind:?})")]
    FileOperation {
        operation: &'static str,
        path: PathBuf,
        source: Arc<std::io::Error>,
        kind: std::io::ErrorKind,
    },

    #[error("Invalid section data in {path}: {message}")]
    Json { path: PathBuf, message: String },

    #[error("Path {path} rejected: {reason}")]
    PathPolicy { path: PathBuf, reason: &'static str },

    #[error("Section {section} is not in the store")]
    MissingSection { section: SectionId },

    #[error("Section loader misconfigured: {0}")]
    Config(String),

    #[error("Failed to start section loader thread: {0}")]
    Spawn(String),
}

impl LoaderError {
    pub(crate) fn file_operation(operation: &'static str, path: &Path, source: std::io::Error) -> Self {
        LoaderError::FileOperation {
            operation,
            path: path.to_path_buf(),
            kind: source.kind(),
            source: Arc::new(source),
        }
    }
}

impl From<LoaderError> for navmenu_error::Error {
    fn from(e: LoaderError) -> navmenu_error::Error {
        use LoaderError::*;
        match e {
            Recv(recv_error) => {
                navmenu_error::Error::Internal(InternalError::ChannelClosed(recv_error.to_string()))
            }
            Spawn(message) => navmenu_error::Error::Internal(InternalError::InvalidState(message)),
            e @ Json { .. } => navmenu_error::Error::Domain(DomainError::SectionData {
                message: e.to_string(),
            }),
            e @ Config(_) => navmenu_error::Error::Domain(DomainError::Config {
                message: e.to_string(),
            }),
            e @ (FileOperation { .. } | PathPolicy { .. } | MissingSection { .. }) => {
                navmenu_error::Error::Domain(DomainError::Loader {
                    message: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navmenu_error::Severity;
    use navmenu_test_utils::sid;

    #[test]
    fn channel_errors_are_internal() {
        let err: navmenu_error::Error = LoaderError::from(RecvError::SendError).into();
        assert!(matches!(
            err,
            navmenu_error::Error::Internal(InternalError::ChannelClosed(_))
        ));
    }

    #[test]
    fn per_section_failures_are_domain_errors() {
        let missing: navmenu_error::Error = LoaderError::MissingSection { section: sid(4) }.into();
        assert_eq!(missing.severity(), Severity::Error);
        assert_eq!(missing.to_string(), "Loader error: Section 4 is not in the store");

        let json: navmenu_error::Error = LoaderError::Json {
            path: PathBuf::from("/menu/files2.json"),
            message: "expected value".into(),
        }
        .into();
        assert!(matches!(
            json,
            navmenu_error::Error::Domain(DomainError::SectionData { .. })
        ));
    }

    #[test]
    fn file_operation_keeps_kind() {
        let err = LoaderError::file_operation(
            "read",
            Path::new("/menu/files.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(
            err,
            LoaderError::FileOperation { kind: std::io::ErrorKind::NotFound, .. }
        ));
    }
}
