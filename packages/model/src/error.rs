use thiserror::Error;

/// Structural problems in a project. A project that fails any of these
/// checks is rejected as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),

    #[error("Duplicate page id: {0}")]
    DuplicatePageId(String),

    #[error("Duplicate page slug: {0}")]
    DuplicateSlug(String),

    #[error("More than one home page (slug \"/\"): {0} and {1}")]
    MultipleHomePages(String, String),

    #[error("Empty {0} id")]
    EmptyId(&'static str),

    #[error("Malformed project document: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Malformed(e.to_string())
    }
}

impl From<std::io::Error> for ModelError {
    fn from(e: std::io::Error) -> Self {
        ModelError::Io(e.to_string())
    }
}
