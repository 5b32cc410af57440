use thiserror::Error;

/// Errors raised by the document model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Section '{key}' has {found} content, expected {expected}")]
    ShapeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Unknown field '{field}' on {target}")]
    UnknownField { target: String, field: String },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

impl DocumentError {
    /// True for errors that mean the stored profile itself is malformed
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            DocumentError::ShapeMismatch { .. } | DocumentError::InvalidStructure(_)
        )
    }
}

/// Result alias for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;
