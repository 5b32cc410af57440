//! # Drag Classification
//!
//! A drag source reports `{ draggedKey, targetKey }` on drop. Section handles
//! carry `section-<key>` ids and service cards carry bare service keys, so the
//! namespace of the dragged id decides which order sequence gets reordered.

use crate::mutations::{Mutation, MutationError};
use pagecraft_document::{SectionKey, ServiceKey, SECTION_DRAG_PREFIX};
use serde::{Deserialize, Serialize};

/// Drop reported by the drag input source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEvent {
    pub dragged_key: String,
    pub target_key: String,
}

/// A drag id resolved to the item it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragId {
    Section(SectionKey),
    Service(ServiceKey),
}

impl DragId {
    pub fn parse(id: &str) -> Result<Self, MutationError> {
        match id.strip_prefix(SECTION_DRAG_PREFIX) {
            Some(name) => name
                .parse()
                .map(DragId::Section)
                .map_err(|_| MutationError::InvalidDrag(format!("unknown section id '{}'", id))),
            None if id.is_empty() => Err(MutationError::InvalidDrag("empty drag id".to_string())),
            None => Ok(DragId::Service(ServiceKey::from(id))),
        }
    }
}

impl DragEvent {
    pub fn new(dragged_key: impl Into<String>, target_key: impl Into<String>) -> Self {
        Self {
            dragged_key: dragged_key.into(),
            target_key: target_key.into(),
        }
    }

    /// Turn the drop into the matching reorder command
    pub fn classify(&self) -> Result<Mutation, MutationError> {
        let dragged = DragId::parse(&self.dragged_key)?;
        let target = DragId::parse(&self.target_key)?;

        match (dragged, target) {
            (DragId::Section(active), DragId::Section(over)) => {
                Ok(Mutation::ReorderSection { active, over })
            }
            (DragId::Service(active), DragId::Service(over)) => {
                Ok(Mutation::ReorderService { active, over })
            }
            _ => Err(MutationError::InvalidDrag(format!(
                "cannot drop '{}' onto '{}'",
                self.dragged_key, self.target_key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_drag() {
        let event = DragEvent::new("section-services", "section-info");
        assert_eq!(
            event.classify().unwrap(),
            Mutation::ReorderSection {
                active: SectionKey::Services,
                over: SectionKey::Info,
            }
        );
    }

    #[test]
    fn test_service_drag() {
        let event = DragEvent::new("prescriptions", "appointments");
        assert_eq!(
            event.classify().unwrap(),
            Mutation::ReorderService {
                active: ServiceKey::from("prescriptions"),
                over: ServiceKey::from("appointments"),
            }
        );
    }

    #[test]
    fn test_mixed_namespace_is_rejected() {
        let event = DragEvent::new("section-banner", "voice");
        let err = event.classify().unwrap_err();
        assert!(err.is_benign());
    }

    #[test]
    fn test_unknown_section_id() {
        assert!(matches!(
            DragId::parse("section-footer"),
            Err(MutationError::InvalidDrag(_))
        ));
        assert!(DragId::parse("").is_err());
    }

    #[test]
    fn test_drag_event_wire_format() {
        let event: DragEvent =
            serde_json::from_str(r#"{ "draggedKey": "voice", "targetKey": "appointments" }"#)
                .unwrap();
        assert_eq!(event, DragEvent::new("voice", "appointments"));
    }
}
