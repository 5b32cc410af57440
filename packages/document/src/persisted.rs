//! # Persisted Shape
//!
//! JSON shape a document is stored in:
//!
//! ```json
//! {
//!   "sectionOrder": ["info", "banner", "services"],
//!   "sections": {
//!     "info":     { "visible": true, "title": "...", "content": { "name": "...", ... } },
//!     "banner":   { "visible": true, "title": "...", "content": { "text": "..." } },
//!     "services": { "visible": true, "title": "..." }
//!   },
//!   "serviceOrder": ["appointments", "voice"],
//!   "services": {
//!     "appointments": { "visible": true, "title": "...", "description": "..." }
//!   }
//! }
//! ```
//!
//! Decoding is where untrusted data enters, so every invariant is checked
//! here.
//!
//! Pages saved by the first dashboard use a nested shape,
//! `{ "order", "sections", "services": { "order", "items" } }`, with the banner
//! stored as a bare string. Both are accepted on read; writes always use the
//! shape above with the banner as `{ "text": ... }`.

use crate::document::PageDocument;
use crate::error::{DocumentError, DocumentResult};
use crate::ordered::OrderedCollection;
use crate::section::{
    BannerContent, InfoContent, Section, SectionContent, SectionKey, Service, ServiceKey,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    pub section_order: Vec<String>,
    pub sections: BTreeMap<String, PersistedSection>,
    pub service_order: Vec<String>,
    pub services: BTreeMap<String, PersistedService>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSection {
    pub visible: bool,
    pub title: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedService {
    pub visible: bool,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Nested shape written by the first dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyDocument {
    pub order: Vec<String>,
    pub sections: BTreeMap<String, PersistedSection>,
    pub services: LegacyServices,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyServices {
    pub order: Vec<String>,
    pub items: BTreeMap<String, PersistedService>,
}

impl From<LegacyDocument> for PersistedDocument {
    fn from(legacy: LegacyDocument) -> Self {
        Self {
            section_order: legacy.order,
            sections: legacy.sections,
            service_order: legacy.services.order,
            services: legacy.services.items,
        }
    }
}

/// Any shape a stored page may be in
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredDocument {
    Current(PersistedDocument),
    Legacy(LegacyDocument),
}

impl From<StoredDocument> for PersistedDocument {
    fn from(stored: StoredDocument) -> Self {
        match stored {
            StoredDocument::Current(persisted) => persisted,
            StoredDocument::Legacy(legacy) => legacy.into(),
        }
    }
}

impl TryFrom<StoredDocument> for PageDocument {
    type Error = DocumentError;

    fn try_from(stored: StoredDocument) -> Result<Self, Self::Error> {
        PageDocument::try_from(PersistedDocument::from(stored))
    }
}

impl From<&PageDocument> for PersistedDocument {
    fn from(doc: &PageDocument) -> Self {
        let sections = doc
            .sections()
            .iter()
            .map(|(key, section)| {
                let persisted = PersistedSection {
                    visible: section.is_visible(),
                    title: section.title().to_string(),
                    content: encode_content(section.content()),
                };
                (key.to_string(), persisted)
            })
            .collect();

        let services = doc
            .services()
            .iter()
            .map(|(key, service)| {
                let persisted = PersistedService {
                    visible: service.is_visible(),
                    title: service.title().to_string(),
                    description: service.description().to_string(),
                };
                (key.to_string(), persisted)
            })
            .collect();

        Self {
            section_order: doc.section_order().iter().map(|k| k.to_string()).collect(),
            sections,
            service_order: doc.service_order().iter().map(|k| k.to_string()).collect(),
            services,
        }
    }
}

impl From<PageDocument> for PersistedDocument {
    fn from(doc: PageDocument) -> Self {
        PersistedDocument::from(&doc)
    }
}

impl TryFrom<PersistedDocument> for PageDocument {
    type Error = DocumentError;

    fn try_from(persisted: PersistedDocument) -> Result<Self, Self::Error> {
        let PersistedDocument {
            section_order,
            mut sections,
            service_order,
            mut services,
        } = persisted;

        let mut section_entries = Vec::with_capacity(section_order.len());
        let mut seen = HashSet::new();
        for name in &section_order {
            let key: SectionKey = name.parse().map_err(|_| {
                DocumentError::InvalidStructure(format!("unknown section '{}'", name))
            })?;
            if !seen.insert(key) {
                return Err(DocumentError::DuplicateKey(name.clone()));
            }
            let raw = sections.remove(name).ok_or_else(|| {
                DocumentError::InvalidStructure(format!("section '{}' is ordered but missing", name))
            })?;
            section_entries.push((key, decode_section(key, raw)?));
        }
        if let Some(orphan) = sections.keys().next() {
            return Err(DocumentError::InvalidStructure(format!(
                "section '{}' is missing from sectionOrder",
                orphan
            )));
        }

        let mut service_entries = Vec::with_capacity(service_order.len());
        let mut seen = HashSet::new();
        for name in &service_order {
            let key = ServiceKey::parse(name.as_str())
                .map_err(|e| DocumentError::InvalidStructure(e.to_string()))?;
            if !seen.insert(name.as_str()) {
                return Err(DocumentError::DuplicateKey(name.clone()));
            }
            let raw = services.remove(name).ok_or_else(|| {
                DocumentError::InvalidStructure(format!("service '{}' is ordered but missing", name))
            })?;
            let service =
                Service::new(key.clone(), raw.title, raw.description).with_visibility(raw.visible);
            service_entries.push((key, service));
        }
        if let Some(orphan) = services.keys().next() {
            return Err(DocumentError::InvalidStructure(format!(
                "service '{}' is missing from serviceOrder",
                orphan
            )));
        }

        PageDocument::new(
            OrderedCollection::from_entries(section_entries)?,
            OrderedCollection::from_entries(service_entries)?,
        )
    }
}

impl PageDocument {
    /// Decode a document from its stored JSON form
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let stored: StoredDocument = serde_json::from_str(json)
            .map_err(|e| DocumentError::InvalidStructure(e.to_string()))?;
        PageDocument::try_from(stored)
    }

    /// Encode the document in its stored JSON form
    pub fn to_json_pretty(&self) -> String {
        // A map of strings and bools always serializes.
        serde_json::to_string_pretty(&PersistedDocument::from(self)).unwrap_or_default()
    }
}

fn encode_content(content: &SectionContent) -> Value {
    match content {
        SectionContent::Info(info) => serde_json::to_value(info).unwrap_or(Value::Null),
        SectionContent::Banner(banner) => serde_json::to_value(banner).unwrap_or(Value::Null),
        SectionContent::Services => Value::Null,
    }
}

fn decode_section(key: SectionKey, raw: PersistedSection) -> DocumentResult<Section> {
    let content = decode_content(key, raw.content)?;
    Ok(Section::new(key, raw.title, content)?.with_visibility(raw.visible))
}

fn decode_content(key: SectionKey, value: Value) -> DocumentResult<SectionContent> {
    let mismatch = |found: &'static str| DocumentError::ShapeMismatch {
        key: key.to_string(),
        expected: key.as_str(),
        found,
    };

    match (key, value) {
        (_, Value::Null) => Ok(SectionContent::empty_for(key)),
        (SectionKey::Info, value @ Value::Object(_)) => serde_json::from_value::<InfoContent>(value)
            .map(SectionContent::Info)
            .map_err(|_| mismatch("malformed")),
        (SectionKey::Banner, Value::String(text)) => {
            Ok(SectionContent::Banner(BannerContent { text }))
        }
        (SectionKey::Banner, value @ Value::Object(_)) => {
            serde_json::from_value::<BannerContent>(value)
                .map(SectionContent::Banner)
                .map_err(|_| mismatch("malformed"))
        }
        (SectionKey::Services, Value::Object(map)) if map.is_empty() => {
            Ok(SectionContent::Services)
        }
        (_, other) => Err(mismatch(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
