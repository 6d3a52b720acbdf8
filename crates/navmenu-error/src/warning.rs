/// Conditions worth reporting that never stop the menu from rendering.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WarningError {
    #[error("Section {section} failed to load: {message}")]
    SectionLoadFailed { section: u32, message: String },

    #[error("Completion received for section {section}, which has no pending record")]
    UnknownSection { section: u32 },

    #[error("Section {section} was delivered more than once")]
    DuplicateDelivery { section: u32 },

    #[error("Section {section} root is a {kind}, which has no members")]
    InvalidSectionRoot { section: u32, kind: &'static str },
}
