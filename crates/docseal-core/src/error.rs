//! Error types for DocSeal

use thiserror::Error;

/// Errors surfaced by DocSeal operations
#[derive(Error, Debug)]
pub enum SealError {
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Leaf index {index} out of bounds for tree of {size} leaves")]
    LeafOutOfBounds { index: usize, size: usize },

    #[error("Invalid proof bounds: old size {old_size} not in 1..={tree_size}")]
    InvalidProofBounds { old_size: usize, tree_size: usize },

    #[error("Extraction failed: {0}")]
    Extraction(String),
}

pub type SealResult<T> = Result<T, SealError>;
