/// Broken engine invariants. A fatal error aborts the current build instead of
/// rendering a menu that may be wrong.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FatalError {
    #[error("Unexpected navigation type {navigation} at path index {next_index}")]
    UnexpectedNavigation {
        navigation: String,
        next_index: usize,
    },

    #[error("Selected entry is not a folder: {0}")]
    SelectionNotFolder(String),
}
