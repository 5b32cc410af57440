//! # Edit Session
//!
//! Draft/commit controller for one owner's page.
//!
//! The session holds the persisted **baseline** and the **draft** being
//! edited. Every edit goes through the reducer against the draft; `save`
//! pushes the whole draft to the persistence service and, on success, makes
//! it the new baseline. `discard` throws the draft away.
//!
//! ```text
//!            load / discard / save ok
//!   ┌───────┐ ────────────────────────▶ ┌───────┐
//!   │ Dirty │                           │ Clean │
//!   └───────┘ ◀──────────────────────── └───────┘
//!     │   ▲       dispatch (changed)       │  ▲
//!     └───┘                                └──┘
//!   save failed:                       dispatch equal to
//!   draft kept                         baseline
//! ```
//!
//! Dispatch is synchronous and serialized by the session's lock, so two edits
//! never race on the same draft. Only `save` awaits. While a save is in
//! flight further edits still land on the draft; a second `save` is rejected
//! with [`EditorError::SaveInProgress`]. A `discard` during the save drops
//! those edits too: once the save lands the draft is reset to what was just
//! committed, so the session ends up clean.

use crate::drag::DragEvent;
use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationError};
use crate::persistence::{PersistenceError, PersistenceService};
use chrono::{DateTime, Utc};
use pagecraft_document::PageDocument;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Whether the draft differs from the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Clean,
    Dirty,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// How long `save` waits for the persistence service
    pub save_timeout: Duration,
    /// Return duplicate-key inserts as errors instead of ignoring them
    pub strict: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            save_timeout: Duration::from_secs(10),
            strict: cfg!(debug_assertions),
        }
    }
}

/// What a dispatched command did to the draft
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The draft changed
    Applied { status: SessionStatus, version: u64 },
    /// The command applied but produced an equal document
    Unchanged,
    /// The command was a no-op (stale key, invalid drop, ...)
    Ignored { reason: MutationError },
}

/// Result of a successful `save`
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Persisted; `status` is `Dirty` if edits landed while the save was in flight
    Saved { status: SessionStatus },
    /// Draft already matched the baseline
    NothingToSave,
}

#[derive(Debug, Default)]
struct SessionState {
    baseline: Option<PageDocument>,
    draft: Option<PageDocument>,
    version: u64,
    discards: u64,
    last_saved_at: Option<DateTime<Utc>>,
}

impl SessionState {
    fn status(&self) -> SessionStatus {
        if self.draft == self.baseline {
            SessionStatus::Clean
        } else {
            SessionStatus::Dirty
        }
    }
}

/// Draft/commit controller for one owner's page document
pub struct EditSession<P> {
    owner_id: String,
    persistence: P,
    options: SessionOptions,
    state: Mutex<SessionState>,
    saving: AtomicBool,
}

impl<P: PersistenceService> EditSession<P> {
    pub fn new(owner_id: impl Into<String>, persistence: P) -> Self {
        Self::with_options(owner_id, persistence, SessionOptions::default())
    }

    pub fn with_options(
        owner_id: impl Into<String>,
        persistence: P,
        options: SessionOptions,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            persistence,
            options,
            state: Mutex::new(SessionState::default()),
            saving: AtomicBool::new(false),
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Fetch the owner's document and load it as the baseline
    #[instrument(skip(self), fields(owner_id = %self.owner_id))]
    pub async fn open(&self) -> Result<(), EditorError> {
        let document = match self.persistence.fetch_document(&self.owner_id).await {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Failed to fetch page document");
                return Err(e.into());
            }
        };
        self.load(document);
        Ok(())
    }

    /// Make `document` the baseline and start a clean draft from it
    pub fn load(&self, document: PageDocument) {
        let mut state = self.lock();
        state.draft = Some(document.clone());
        state.baseline = Some(document);
        state.version = 0;
        debug!(owner_id = %self.owner_id, "Loaded page document");
    }

    pub fn status(&self) -> SessionStatus {
        self.lock().status()
    }

    pub fn is_dirty(&self) -> bool {
        self.status() == SessionStatus::Dirty
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().baseline.is_some()
    }

    /// Current draft (cheap: shares structure with the session's copy)
    pub fn draft(&self) -> Option<PageDocument> {
        self.lock().draft.clone()
    }

    /// Last persisted document
    pub fn baseline(&self) -> Option<PageDocument> {
        self.lock().baseline.clone()
    }

    /// Number of draft changes since load
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.lock().last_saved_at
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Apply a command to the draft
    pub fn dispatch(&self, mutation: Mutation) -> Result<DispatchOutcome, EditorError> {
        let mut state = self.lock();
        let draft = state.draft.clone().ok_or(EditorError::NotLoaded)?;

        match mutation.apply(&draft) {
            Ok(next) if next == draft => Ok(DispatchOutcome::Unchanged),
            Ok(next) => {
                state.draft = Some(next);
                state.version += 1;
                let status = state.status();
                debug!(
                    mutation = mutation.name(),
                    version = state.version,
                    status = ?status,
                    "Applied mutation"
                );
                Ok(DispatchOutcome::Applied {
                    status,
                    version: state.version,
                })
            }
            Err(e) if e.is_benign() => {
                debug!(mutation = mutation.name(), error = %e, "Ignored mutation");
                Ok(DispatchOutcome::Ignored { reason: e })
            }
            Err(e) if e.is_duplicate_key() && !self.options.strict => {
                error!(mutation = mutation.name(), error = %e, "Ignored duplicate insert");
                Ok(DispatchOutcome::Ignored { reason: e })
            }
            Err(e) => {
                warn!(mutation = mutation.name(), error = %e, "Rejected mutation");
                Err(e.into())
            }
        }
    }

    /// Route a drop from the drag source to the matching reorder
    pub fn dispatch_drag(&self, event: &DragEvent) -> Result<DispatchOutcome, EditorError> {
        match event.classify() {
            Ok(mutation) => self.dispatch(mutation),
            Err(e) => {
                debug!(
                    dragged = %event.dragged_key,
                    target = %event.target_key,
                    error = %e,
                    "Ignored drop"
                );
                Ok(DispatchOutcome::Ignored { reason: e })
            }
        }
    }

    /// Throw the draft away and start over from the baseline
    pub fn discard(&self) -> Result<(), EditorError> {
        let mut state = self.lock();
        let baseline = state.baseline.clone().ok_or(EditorError::NotLoaded)?;
        state.draft = Some(baseline);
        state.discards += 1;
        debug!(owner_id = %self.owner_id, "Discarded draft");
        Ok(())
    }

    /// Persist the whole draft
    ///
    /// On success the saved draft becomes the baseline. If the draft was
    /// discarded while the save was in flight, and not edited since, it is
    /// reset to that new baseline. On failure nothing changes: the draft is kept as it was and
    /// the session stays dirty.
    #[instrument(skip(self), fields(owner_id = %self.owner_id))]
    pub async fn save(&self) -> Result<SaveOutcome, EditorError> {
        let _in_flight = SaveGuard::acquire(&self.saving).ok_or(EditorError::SaveInProgress)?;

        let (snapshot, previous, discards) = {
            let state = self.lock();
            let draft = state.draft.clone().ok_or(EditorError::NotLoaded)?;
            if state.status() == SessionStatus::Clean {
                return Ok(SaveOutcome::NothingToSave);
            }
            (draft, state.baseline.clone(), state.discards)
        };

        info!("Saving page document");
        let update = self.persistence.update_document(&self.owner_id, &snapshot);
        let result = match tokio::time::timeout(self.options.save_timeout, update).await {
            Ok(result) => result,
            Err(_) => Err(PersistenceError::Timeout(self.options.save_timeout)),
        };

        match result {
            Ok(()) => {
                let mut state = self.lock();
                // Edits made after the discard are kept
                if state.discards != discards && state.draft == previous {
                    debug!("Draft was discarded during save, resetting to saved page");
                    state.draft = Some(snapshot.clone());
                }
                state.baseline = Some(snapshot);
                state.last_saved_at = Some(Utc::now());
                let status = state.status();
                info!(status = ?status, "Saved page document");
                Ok(SaveOutcome::Saved { status })
            }
            Err(e) => {
                warn!(error = %e, "Failed to save page document");
                Err(e.into())
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds the in-flight flag for the duration of one save
struct SaveGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SaveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use pagecraft_document::SectionKey;

    fn session() -> EditSession<MemoryPersistence> {
        let session = EditSession::new("dr-1", MemoryPersistence::new());
        session.load(PageDocument::seed());
        session
    }

    #[test]
    fn test_session_creation() {
        let session = EditSession::new("dr-1", MemoryPersistence::new());

        assert_eq!(session.owner_id(), "dr-1");
        assert!(!session.is_loaded());
        assert!(session.draft().is_none());
        assert!(matches!(
            session.dispatch(Mutation::ToggleSectionVisibility {
                section: SectionKey::Info
            }),
            Err(EditorError::NotLoaded)
        ));
    }

    #[test]
    fn test_load_is_clean() {
        let session = session();
        assert_eq!(session.status(), SessionStatus::Clean);
        assert_eq!(session.draft(), session.baseline());
    }

    #[test]
    fn test_dispatch_marks_dirty_and_bumps_version() {
        let session = session();
        let outcome = session
            .dispatch(Mutation::ToggleSectionVisibility {
                section: SectionKey::Banner,
            })
            .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Applied {
                status: SessionStatus::Dirty,
                version: 1
            }
        );
        assert!(session.is_dirty());
    }

    #[test]
    fn test_identity_reorder_is_unchanged() {
        let session = session();
        let outcome = session
            .dispatch(Mutation::ReorderSection {
                active: SectionKey::Info,
                over: SectionKey::Info,
            })
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Unchanged);
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn test_save_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let first = SaveGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(SaveGuard::acquire(&flag).is_none());

        drop(first);
        assert!(SaveGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_default_options() {
        let options = SessionOptions::default();
        assert_eq!(options.save_timeout, Duration::from_secs(10));
    }
}
