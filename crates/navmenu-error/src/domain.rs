#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    #[error("Config error: {message}")]
    Config { message: String },

    #[error("Loader error: {message}")]
    Loader { message: String },

    #[error("Section data error: {message}")]
    SectionData { message: String },
}
