//! Error types for the editor

use crate::mutations::MutationError;
use crate::persistence::PersistenceError;
use pagecraft_document::DocumentError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("No document loaded")]
    NotLoaded,
}

impl From<DocumentError> for EditorError {
    fn from(e: DocumentError) -> Self {
        EditorError::Mutation(MutationError::Document(e))
    }
}

impl EditorError {
    /// Message suitable for showing to the practitioner
    pub fn user_message(&self) -> &'static str {
        match self {
            EditorError::Persistence(PersistenceError::Document(e))
            | EditorError::Mutation(MutationError::Document(e))
                if e.is_corrupt_data() =>
            {
                "Profile data could not be loaded"
            }
            EditorError::Persistence(PersistenceError::NotFound(_)) => "Profile could not be found",
            EditorError::Persistence(_) => "Changes could not be saved, please retry",
            EditorError::SaveInProgress => "Changes are already being saved",
            EditorError::Mutation(_) => "That change could not be applied",
            EditorError::NotLoaded => "Profile is not loaded yet",
        }
    }

    /// True when retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            EditorError::Persistence(e) => e.is_retryable(),
            EditorError::SaveInProgress => true,
            _ => false,
        }
    }
}
