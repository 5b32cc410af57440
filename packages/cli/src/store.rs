//! File-backed persistence: one pretty-printed JSON document per owner.

use async_trait::async_trait;
use pagecraft_document::PageDocument;
use pagecraft_editor::{PersistenceError, PersistenceService};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the owner's document; rejects ids that would escape the store
    pub fn document_path(&self, owner_id: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !owner_id.is_empty()
            && owner_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::Failure(format!(
                "invalid owner id '{}'",
                owner_id
            )));
        }
        Ok(self.root.join(format!("{}.json", owner_id)))
    }

    pub async fn exists(&self, owner_id: &str) -> Result<bool, PersistenceError> {
        let path = self.document_path(owner_id)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| PersistenceError::Failure(e.to_string()))
    }
}

#[async_trait]
impl PersistenceService for JsonFileStore {
    async fn fetch_document(&self, owner_id: &str) -> Result<PageDocument, PersistenceError> {
        let path = self.document_path(owner_id)?;
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(owner_id.to_string()))
            }
            Err(e) => return Err(PersistenceError::Failure(e.to_string())),
        };

        debug!(path = %path.display(), "Read page document");
        Ok(PageDocument::from_json(&json)?)
    }

    async fn update_document(
        &self,
        owner_id: &str,
        document: &PageDocument,
    ) -> Result<(), PersistenceError> {
        let path = self.document_path(owner_id)?;
        let failure = |e: std::io::Error| PersistenceError::Failure(e.to_string());

        tokio::fs::create_dir_all(&self.root).await.map_err(failure)?;

        // Write then rename so a reader never sees half a document
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, document.to_json_pretty())
            .await
            .map_err(failure)?;
        tokio::fs::rename(&staging, &path).await.map_err(failure)?;

        debug!(path = %path.display(), "Wrote page document");
        Ok(())
    }
}
