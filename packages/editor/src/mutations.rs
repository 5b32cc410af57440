//! # Page Mutations
//!
//! The edit reducer: pure functions from `(document, command)` to a new document.
//!
//! ## Semantics
//!
//! ### Reorder
//! - "Drop onto": the active item takes over the slot the target holds now,
//!   items in between shift by one
//! - Dropping an item onto itself is the identity
//! - Sections and services are reordered independently
//!
//! ### Edit field
//! - Atomic replacement of one string field, checked against the content shape
//! - `title` is editable on every section; content fields depend on the kind
//!
//! ### Toggle visibility
//! - Flips one `visible` flag; never touches ordering
//!
//! Every reducer either fully applies or fails without producing a document,
//! so a failed command can never leave a half-applied edit behind. Only the
//! targeted collection is rebuilt; the other one is shared with the input.

use pagecraft_document::{DocumentError, PageDocument, SectionKey, Service, ServiceKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Edit commands accepted by the reducer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mutation {
    /// Drop section `active` onto the slot of section `over`
    ReorderSection { active: SectionKey, over: SectionKey },

    /// Drop service `active` onto the slot of service `over`
    ReorderService { active: ServiceKey, over: ServiceKey },

    /// Set one field of a section (`title` or a content field)
    EditSectionField {
        section: SectionKey,
        field: String,
        value: String,
    },

    ToggleSectionVisibility { section: SectionKey },

    /// Set `title` or `description` of a service
    EditServiceField {
        service: ServiceKey,
        field: String,
        value: String,
    },

    ToggleServiceVisibility { service: ServiceKey },

    /// Append a new visible service
    AddService {
        service: ServiceKey,
        title: String,
        description: String,
    },

    RemoveService { service: ServiceKey },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Invalid drag: {0}")]
    InvalidDrag(String),
}

impl MutationError {
    /// Errors the UI produces in normal use (stale keys, odd drops); safe to ignore
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            MutationError::Document(DocumentError::KeyNotFound(_)) | MutationError::InvalidDrag(_)
        )
    }

    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, MutationError::Document(DocumentError::DuplicateKey(_)))
    }
}

pub type MutationResult = Result<PageDocument, MutationError>;

impl Mutation {
    /// Apply to `doc`, returning the new document
    pub fn apply(&self, doc: &PageDocument) -> MutationResult {
        match self {
            Mutation::ReorderSection { active, over } => reorder_section(doc, *active, *over),
            Mutation::ReorderService { active, over } => reorder_service(doc, active, over),
            Mutation::EditSectionField {
                section,
                field,
                value,
            } => edit_section_field(doc, *section, field, value),
            Mutation::ToggleSectionVisibility { section } => {
                toggle_section_visibility(doc, *section)
            }
            Mutation::EditServiceField {
                service,
                field,
                value,
            } => edit_service_field(doc, service, field, value),
            Mutation::ToggleServiceVisibility { service } => {
                toggle_service_visibility(doc, service)
            }
            Mutation::AddService {
                service,
                title,
                description,
            } => add_service(
                doc,
                Service::new(service.clone(), title.as_str(), description.as_str()),
            ),
            Mutation::RemoveService { service } => remove_service(doc, service),
        }
    }

    /// Total version of [`Mutation::apply`]: on any error, returns `doc` unchanged
    pub fn reduce(&self, doc: &PageDocument) -> PageDocument {
        match self.apply(doc) {
            Ok(next) => next,
            Err(e) => {
                debug!(mutation = self.name(), error = %e, "Mutation was a no-op");
                doc.clone()
            }
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::ReorderSection { .. } => "reorder_section",
            Mutation::ReorderService { .. } => "reorder_service",
            Mutation::EditSectionField { .. } => "edit_section_field",
            Mutation::ToggleSectionVisibility { .. } => "toggle_section_visibility",
            Mutation::EditServiceField { .. } => "edit_service_field",
            Mutation::ToggleServiceVisibility { .. } => "toggle_service_visibility",
            Mutation::AddService { .. } => "add_service",
            Mutation::RemoveService { .. } => "remove_service",
        }
    }
}

pub fn reorder_section(doc: &PageDocument, active: SectionKey, over: SectionKey) -> MutationResult {
    if active == over {
        return Ok(doc.clone());
    }
    let sections = doc.sections().move_onto(&active, &over)?;
    Ok(doc.with_sections(sections)?)
}

pub fn reorder_service(doc: &PageDocument, active: &ServiceKey, over: &ServiceKey) -> MutationResult {
    if active == over {
        return Ok(doc.clone());
    }
    let services = doc.services().move_onto(active, over)?;
    Ok(doc.with_services(services)?)
}

pub fn edit_section_field(
    doc: &PageDocument,
    section: SectionKey,
    field: &str,
    value: &str,
) -> MutationResult {
    let sections = doc
        .sections()
        .update(&section, |current| current.with_field(field, value))?;
    Ok(doc.with_sections(sections)?)
}

pub fn toggle_section_visibility(doc: &PageDocument, section: SectionKey) -> MutationResult {
    let sections = doc
        .sections()
        .update(&section, |current| Ok(current.toggled()))?;
    Ok(doc.with_sections(sections)?)
}

pub fn edit_service_field(
    doc: &PageDocument,
    service: &ServiceKey,
    field: &str,
    value: &str,
) -> MutationResult {
    let services = doc
        .services()
        .update(service, |current| current.with_field(field, value))?;
    Ok(doc.with_services(services)?)
}

pub fn toggle_service_visibility(doc: &PageDocument, service: &ServiceKey) -> MutationResult {
    let services = doc
        .services()
        .update(service, |current| Ok(current.toggled()))?;
    Ok(doc.with_services(services)?)
}

pub fn add_service(doc: &PageDocument, service: Service) -> MutationResult {
    service.key().check()?;
    let services = doc.services().insert(service.key().clone(), service)?;
    Ok(doc.with_services(services)?)
}

pub fn remove_service(doc: &PageDocument, service: &ServiceKey) -> MutationResult {
    let services = doc.services().remove(service)?;
    Ok(doc.with_services(services)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::EditSectionField {
            section: SectionKey::Banner,
            field: "text".to_string(),
            value: "Closed for holidays".to_string(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_mutation_wire_format() {
        let json = r#"{ "type": "toggleServiceVisibility", "service": "voice" }"#;
        let mutation: Mutation = serde_json::from_str(json).unwrap();

        assert_eq!(
            mutation,
            Mutation::ToggleServiceVisibility {
                service: ServiceKey::from("voice")
            }
        );
    }

    #[test]
    fn test_reduce_returns_input_on_missing_key() {
        let doc = PageDocument::seed();
        let mutation = Mutation::ToggleServiceVisibility {
            service: ServiceKey::from("telehealth"),
        };

        assert_eq!(
            mutation.apply(&doc),
            Err(MutationError::Document(DocumentError::KeyNotFound(
                "telehealth".to_string()
            )))
        );
        assert_eq!(mutation.reduce(&doc), doc);
    }

    #[test]
    fn test_benign_classification() {
        assert!(MutationError::Document(DocumentError::KeyNotFound("x".into())).is_benign());
        assert!(MutationError::InvalidDrag("x".into()).is_benign());
        assert!(!MutationError::Document(DocumentError::DuplicateKey("x".into())).is_benign());
        assert!(MutationError::Document(DocumentError::DuplicateKey("x".into())).is_duplicate_key());
    }
}
