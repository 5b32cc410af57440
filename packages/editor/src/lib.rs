//! # Pagecraft Editor
//!
//! Editing engine for a practitioner's profile page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ drag source / inline editors                │
//! │  - DragEvent { draggedKey, targetKey }      │
//! │  - Mutation (edit field, toggle, ...)       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Classify drops (section vs service)      │
//! │  - Reduce mutations against the draft       │
//! │  - Track Clean / Dirty against baseline     │
//! │  - Save whole draft, discard, retry         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ PersistenceService: fetch / update by owner │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Reducers are pure**: `(document, mutation) → document`, never in place
//! 2. **All or nothing**: a mutation fully applies or leaves the draft as it was
//! 3. **Whole-document saves**: no per-field dirty tracking
//! 4. **No lost edits**: a failed save keeps the draft untouched
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditSession, MemoryPersistence, Mutation, DragEvent};
//!
//! let session = EditSession::new("dr-1", store);
//! session.open().await?;
//!
//! session.dispatch_drag(&DragEvent::new("section-services", "section-info"))?;
//! session.dispatch(Mutation::EditSectionField {
//!     section: SectionKey::Banner,
//!     field: "text".to_string(),
//!     value: "Closed for holidays".to_string(),
//! })?;
//!
//! session.save().await?;
//! ```

mod drag;
mod errors;
mod mutations;
mod persistence;
mod session;

pub use drag::{DragEvent, DragId};
pub use errors::EditorError;
pub use mutations::{
    add_service, edit_section_field, edit_service_field, remove_service, reorder_section,
    reorder_service, toggle_section_visibility, toggle_service_visibility, Mutation,
    MutationError, MutationResult,
};
pub use persistence::{MemoryPersistence, PersistenceError, PersistenceService};
pub use session::{DispatchOutcome, EditSession, SaveOutcome, SessionOptions, SessionStatus};

// Re-export document types for convenience
pub use pagecraft_document::{
    DocumentError, PageDocument, Section, SectionKey, Service, ServiceKey,
};
