//! Error types for the editor

use pagecraft_model::ModelError;
use thiserror::Error;

/// Why a command was rejected. A rejected command changes nothing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Block id already in use: {0}")]
    DuplicateBlockId(String),

    #[error("Page id already in use: {0}")]
    DuplicatePageId(String),

    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("Project already has a home page: {0}")]
    MultipleHomePages(String),

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The home page cannot be removed or re-slugged: {0}")]
    CannotRemoveHome(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Command rejected: {0}")]
    Command(#[from] CommandError),

    #[error("Invalid project: {0}")]
    Model(#[from] ModelError),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
}
