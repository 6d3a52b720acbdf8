#[derive(Debug, Clone, thiserror::Error)]
pub enum InternalError {
    #[error("Unexpected state: {0}")]
    InvalidState(String),

    #[error("Loader channel closed: {0}")]
    ChannelClosed(String),
}
