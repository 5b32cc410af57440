//! # Pagecraft Document
//!
//! The page-composition model behind a practitioner's public profile page.
//!
//! ## Structure
//!
//! ```text
//! PageDocument
//!  ├─ sections: OrderedCollection<SectionKey, Section>
//!  │    info      → InfoContent { name, phone, email, address }
//!  │    banner    → BannerContent { text }
//!  │    services  → (owns the service collection below)
//!  └─ services: OrderedCollection<ServiceKey, Service>
//! ```
//!
//! ## Core Principles
//!
//! 1. **Values, not handles**: every edit produces a new document; the previous
//!    one stays readable and shares every part the edit did not touch
//! 2. **Order and content cannot desync**: the ordering and the key → payload map
//!    live in one `OrderedCollection` and only change together
//! 3. **Typed content**: section content is a tagged union checked against the
//!    section key; a mismatch is an error, never a silently empty field
//! 4. **One traversal**: everything that renders the page walks it through
//!    [`PageVisitor`], so visibility and ordering rules live in one place
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_document::{PageDocument, SectionKey};
//!
//! let doc = PageDocument::seed();
//! let titles: Vec<&str> = doc.visible_sections().map(|s| s.title()).collect();
//! assert_eq!(titles[0], "Practice Information");
//! assert_eq!(doc.section_order()[2], SectionKey::Services);
//! ```

mod document;
mod error;
mod ordered;
mod persisted;
mod section;
mod visitor;

pub use document::PageDocument;
pub use error::{DocumentError, DocumentResult};
pub use ordered::OrderedCollection;
pub use persisted::{
    LegacyDocument, LegacyServices, PersistedDocument, PersistedSection, PersistedService,
    StoredDocument,
};
pub use section::{
    BannerContent, InfoContent, Section, SectionContent, SectionKey, Service, ServiceKey,
    SECTION_DRAG_PREFIX,
};
pub use visitor::{walk_document, walk_section, walk_services, PageVisitor};
