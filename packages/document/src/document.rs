//! # Page Document
//!
//! The whole composable page: the ordered sections and the ordered services
//! nested inside the services section.
//!
//! A `PageDocument` is an immutable value. Editing APIs live in the editor
//! crate and build new documents through [`PageDocument::with_sections`] and
//! [`PageDocument::with_services`], which re-check that every payload is
//! stored under its own key.

use crate::error::{DocumentError, DocumentResult};
use crate::ordered::OrderedCollection;
use crate::persisted::{PersistedDocument, StoredDocument};
use crate::section::{BannerContent, InfoContent, Section, SectionKey, Service, ServiceKey};
use serde::{Deserialize, Serialize};

/// Ordered, nested document of page sections and services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredDocument", into = "PersistedDocument")]
pub struct PageDocument {
    sections: OrderedCollection<SectionKey, Section>,
    services: OrderedCollection<ServiceKey, Service>,
}

impl PageDocument {
    /// Assemble a document, checking that each payload sits under its own key
    pub fn new(
        sections: OrderedCollection<SectionKey, Section>,
        services: OrderedCollection<ServiceKey, Service>,
    ) -> DocumentResult<Self> {
        check_sections(&sections)?;
        check_services(&services)?;
        Ok(Self { sections, services })
    }

    /// Default arrangement every new account starts with
    pub fn seed() -> Self {
        Self::seed_with_contact(InfoContent::default())
    }

    /// Default arrangement with the info block pre-filled
    pub fn seed_with_contact(info: InfoContent) -> Self {
        let info_section = Section::empty(SectionKey::Info)
            .with_info(info)
            .unwrap_or_else(|_| Section::empty(SectionKey::Info));
        let sections = vec![
            info_section,
            Section::empty(SectionKey::Banner),
            Section::empty(SectionKey::Services),
        ];
        let services = vec![
            Service::new(
                "appointments",
                "Book Appointment",
                "Schedule a visit with your doctor",
            ),
            Service::new(
                "voice",
                "Voice Consultation",
                "Get medical advice through a voice call",
            ),
            Service::new(
                "prescriptions",
                "Request Prescription",
                "Request a prescription renewal",
            ),
        ];

        Self {
            sections: collect_unique(sections.into_iter().map(|s| (s.key(), s))),
            services: collect_unique(services.into_iter().map(|s| (s.key().clone(), s))),
        }
    }

    pub fn sections(&self) -> &OrderedCollection<SectionKey, Section> {
        &self.sections
    }

    pub fn services(&self) -> &OrderedCollection<ServiceKey, Service> {
        &self.services
    }

    /// Render order of the sections
    pub fn section_order(&self) -> &[SectionKey] {
        self.sections.order()
    }

    /// Order of the services inside the services section
    pub fn service_order(&self) -> &[ServiceKey] {
        self.services.order()
    }

    pub fn section(&self, key: SectionKey) -> Option<&Section> {
        self.sections.get(&key)
    }

    pub fn service(&self, key: &ServiceKey) -> Option<&Service> {
        self.services.get(key)
    }

    /// Visible sections in render order, recomputed on every call
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> + '_ {
        self.sections.values().filter(|section| section.is_visible())
    }

    /// Visible services in their own order, recomputed on every call
    pub fn visible_services(&self) -> impl Iterator<Item = &Service> + '_ {
        self.services.values().filter(|service| service.is_visible())
    }

    /// Typed info content; `ShapeMismatch` if the info slot holds another shape
    pub fn info(&self) -> DocumentResult<&InfoContent> {
        self.require_section(SectionKey::Info)?.info()
    }

    /// Typed banner content; `ShapeMismatch` if the banner slot holds another shape
    pub fn banner(&self) -> DocumentResult<&BannerContent> {
        self.require_section(SectionKey::Banner)?.banner()
    }

    /// Copy with the section collection replaced; services stay shared
    pub fn with_sections(
        &self,
        sections: OrderedCollection<SectionKey, Section>,
    ) -> DocumentResult<Self> {
        check_sections(&sections)?;
        Ok(Self {
            sections,
            services: self.services.clone(),
        })
    }

    /// Copy with the service collection replaced; sections stay shared
    pub fn with_services(
        &self,
        services: OrderedCollection<ServiceKey, Service>,
    ) -> DocumentResult<Self> {
        check_services(&services)?;
        Ok(Self {
            sections: self.sections.clone(),
            services,
        })
    }

    /// Check every structural invariant of the document
    pub fn validate(&self) -> DocumentResult<()> {
        self.sections.check_consistency()?;
        self.services.check_consistency()?;
        check_sections(&self.sections)?;
        check_services(&self.services)
    }

    fn require_section(&self, key: SectionKey) -> DocumentResult<&Section> {
        self.sections
            .get(&key)
            .ok_or_else(|| DocumentError::KeyNotFound(key.to_string()))
    }
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::seed()
    }
}

fn check_sections(sections: &OrderedCollection<SectionKey, Section>) -> DocumentResult<()> {
    for (key, section) in sections.iter() {
        if section.key() != *key {
            return Err(DocumentError::InvalidStructure(format!(
                "section '{}' stored under key '{}'",
                section.key(),
                key
            )));
        }
        if section.content().kind() != *key {
            return Err(DocumentError::ShapeMismatch {
                key: key.to_string(),
                expected: key.as_str(),
                found: section.content().kind().as_str(),
            });
        }
    }
    Ok(())
}

fn check_services(services: &OrderedCollection<ServiceKey, Service>) -> DocumentResult<()> {
    for (key, service) in services.iter() {
        key.check()?;
        if service.key() != key {
            return Err(DocumentError::InvalidStructure(format!(
                "service '{}' stored under key '{}'",
                service.key(),
                key
            )));
        }
    }
    Ok(())
}

// Seed keys are distinct literals, so collection cannot collide.
fn collect_unique<K, V, I>(entries: I) -> OrderedCollection<K, V>
where
    K: Clone + Eq + std::hash::Hash + std::fmt::Display,
    I: IntoIterator<Item = (K, V)>,
{
    OrderedCollection::from_entries(entries).unwrap_or_default()
}
