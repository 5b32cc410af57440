//! Sections, services and their typed content

use crate::error::{DocumentError, DocumentResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix a drag source puts on section ids (`section-info`); bare ids are services
pub const SECTION_DRAG_PREFIX: &str = "section-";

/// The closed set of page sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Info,
    Banner,
    Services,
}

impl SectionKey {
    pub const ALL: [SectionKey; 3] = [SectionKey::Info, SectionKey::Banner, SectionKey::Services];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Info => "info",
            SectionKey::Banner => "banner",
            SectionKey::Services => "services",
        }
    }

    /// Title a freshly seeded section carries
    pub fn default_title(&self) -> &'static str {
        match self {
            SectionKey::Info => "Practice Information",
            SectionKey::Banner => "Practice Updates",
            SectionKey::Services => "Available Services",
        }
    }

    /// Id the drag source uses for this section
    pub fn drag_id(&self) -> String {
        format!("{}{}", SECTION_DRAG_PREFIX, self.as_str())
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(SectionKey::Info),
            "banner" => Ok(SectionKey::Banner),
            "services" => Ok(SectionKey::Services),
            other => Err(DocumentError::KeyNotFound(other.to_string())),
        }
    }
}

/// Stable identifier of a service entry (`appointments`, `voice`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceKey(String);

impl ServiceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Checked constructor for keys coming from outside the program
    pub fn parse(key: impl Into<String>) -> DocumentResult<Self> {
        let key = Self(key.into());
        key.check()?;
        Ok(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A service key must be non-empty and stay out of the section drag namespace
    pub fn check(&self) -> DocumentResult<()> {
        if self.0.is_empty() {
            return Err(DocumentError::InvalidKey("service key is empty".to_string()));
        }
        if self.0.starts_with(SECTION_DRAG_PREFIX) {
            return Err(DocumentError::InvalidKey(format!(
                "service key '{}' uses the reserved '{}' prefix",
                self.0, SECTION_DRAG_PREFIX
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ServiceKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Contact block shown in the info section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoContent {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl InfoContent {
    pub const FIELDS: [&'static str; 4] = ["name", "phone", "email", "address"];

    fn field_mut(&mut self, field: &str) -> Option<&mut String> {
        match field {
            "name" => Some(&mut self.name),
            "phone" => Some(&mut self.phone),
            "email" => Some(&mut self.email),
            "address" => Some(&mut self.address),
            _ => None,
        }
    }
}

/// Announcement text shown in the banner section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerContent {
    pub text: String,
}

/// Content payload of a section, tagged by section kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    Info(InfoContent),
    Banner(BannerContent),
    /// The services section renders the document's service collection
    Services,
}

impl SectionContent {
    /// Empty content of the right shape for `key`
    pub fn empty_for(key: SectionKey) -> Self {
        match key {
            SectionKey::Info => SectionContent::Info(InfoContent::default()),
            SectionKey::Banner => SectionContent::Banner(BannerContent::default()),
            SectionKey::Services => SectionContent::Services,
        }
    }

    /// Section kind this content belongs to
    pub fn kind(&self) -> SectionKey {
        match self {
            SectionContent::Info(_) => SectionKey::Info,
            SectionContent::Banner(_) => SectionKey::Banner,
            SectionContent::Services => SectionKey::Services,
        }
    }

    /// Read one content field by name
    pub fn field(&self, field: &str) -> Option<&str> {
        match (self, field) {
            (SectionContent::Info(info), "name") => Some(&info.name),
            (SectionContent::Info(info), "phone") => Some(&info.phone),
            (SectionContent::Info(info), "email") => Some(&info.email),
            (SectionContent::Info(info), "address") => Some(&info.address),
            (SectionContent::Banner(banner), "text") => Some(&banner.text),
            _ => None,
        }
    }

    fn with_field(&self, field: &str, value: &str) -> DocumentResult<Self> {
        let unknown = || DocumentError::UnknownField {
            target: format!("{} section", self.kind()),
            field: field.to_string(),
        };

        match self {
            SectionContent::Info(info) => {
                let mut info = info.clone();
                *info.field_mut(field).ok_or_else(unknown)? = value.to_string();
                Ok(SectionContent::Info(info))
            }
            SectionContent::Banner(_) if field == "text" => {
                Ok(SectionContent::Banner(BannerContent {
                    text: value.to_string(),
                }))
            }
            _ => Err(unknown()),
        }
    }
}

/// A named, independently visible block of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    key: SectionKey,
    visible: bool,
    title: String,
    content: SectionContent,
}

impl Section {
    /// Create a visible section; fails when `content` is shaped for another key
    pub fn new(
        key: SectionKey,
        title: impl Into<String>,
        content: SectionContent,
    ) -> DocumentResult<Self> {
        if content.kind() != key {
            return Err(DocumentError::ShapeMismatch {
                key: key.to_string(),
                expected: key.as_str(),
                found: content.kind().as_str(),
            });
        }

        Ok(Self {
            key,
            visible: true,
            title: title.into(),
            content,
        })
    }

    /// Visible section with the default title and empty content
    pub fn empty(key: SectionKey) -> Self {
        Self {
            key,
            visible: true,
            title: key.default_title().to_string(),
            content: SectionContent::empty_for(key),
        }
    }

    pub fn key(&self) -> SectionKey {
        self.key
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &SectionContent {
        &self.content
    }

    /// Typed access to info content
    pub fn info(&self) -> DocumentResult<&InfoContent> {
        match &self.content {
            SectionContent::Info(info) => Ok(info),
            other => Err(self.mismatch(SectionKey::Info, other)),
        }
    }

    /// Typed access to banner content
    pub fn banner(&self) -> DocumentResult<&BannerContent> {
        match &self.content {
            SectionContent::Banner(banner) => Ok(banner),
            other => Err(self.mismatch(SectionKey::Banner, other)),
        }
    }

    /// Copy with visibility set to `visible`
    pub fn with_visibility(&self, visible: bool) -> Self {
        Self {
            visible,
            ..self.clone()
        }
    }

    /// Copy with visibility flipped
    pub fn toggled(&self) -> Self {
        self.with_visibility(!self.visible)
    }

    /// Copy with info content replaced
    pub fn with_info(&self, info: InfoContent) -> DocumentResult<Self> {
        self.info()?;
        Ok(Self {
            content: SectionContent::Info(info),
            ..self.clone()
        })
    }

    /// Copy with banner content replaced
    pub fn with_banner(&self, banner: BannerContent) -> DocumentResult<Self> {
        self.banner()?;
        Ok(Self {
            content: SectionContent::Banner(banner),
            ..self.clone()
        })
    }

    /// Copy with one named field changed (`title` or a content field)
    pub fn with_field(&self, field: &str, value: &str) -> DocumentResult<Self> {
        if field == "title" {
            return Ok(Self {
                title: value.to_string(),
                ..self.clone()
            });
        }

        Ok(Self {
            content: self.content.with_field(field, value)?,
            ..self.clone()
        })
    }

    fn mismatch(&self, expected: SectionKey, found: &SectionContent) -> DocumentError {
        DocumentError::ShapeMismatch {
            key: self.key.to_string(),
            expected: expected.as_str(),
            found: found.kind().as_str(),
        }
    }
}

/// One offering listed inside the services section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    key: ServiceKey,
    visible: bool,
    title: String,
    description: String,
}

impl Service {
    pub const FIELDS: [&'static str; 2] = ["title", "description"];

    /// Create a visible service
    pub fn new(
        key: impl Into<ServiceKey>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            visible: true,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn with_visibility(&self, visible: bool) -> Self {
        Self {
            visible,
            ..self.clone()
        }
    }

    pub fn toggled(&self) -> Self {
        self.with_visibility(!self.visible)
    }

    /// Copy with `title` or `description` changed
    pub fn with_field(&self, field: &str, value: &str) -> DocumentResult<Self> {
        let mut next = self.clone();
        match field {
            "title" => next.title = value.to_string(),
            "description" => next.description = value.to_string(),
            other => {
                return Err(DocumentError::UnknownField {
                    target: format!("service '{}'", self.key),
                    field: other.to_string(),
                })
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key_parse_and_display() {
        for key in SectionKey::ALL {
            assert_eq!(key.as_str().parse::<SectionKey>().unwrap(), key);
        }
        assert!("footer".parse::<SectionKey>().is_err());
        assert_eq!(SectionKey::Banner.drag_id(), "section-banner");
    }

    #[test]
    fn test_section_new_rejects_wrong_shape() {
        let result = Section::new(
            SectionKey::Banner,
            "Updates",
            SectionContent::Info(InfoContent::default()),
        );

        assert_eq!(
            result,
            Err(DocumentError::ShapeMismatch {
                key: "banner".to_string(),
                expected: "banner",
                found: "info",
            })
        );
    }

    #[test]
    fn test_typed_accessors_check_tag() {
        let banner = Section::empty(SectionKey::Banner);
        assert!(banner.banner().is_ok());

        let err = banner.info().unwrap_err();
        assert!(matches!(err, DocumentError::ShapeMismatch { expected: "info", .. }));
        assert!(err.is_corrupt_data());
    }

    #[test]
    fn test_with_field_updates_content() {
        let info = Section::empty(SectionKey::Info);
        let edited = info.with_field("phone", "555-0100").unwrap();

        assert_eq!(edited.info().unwrap().phone, "555-0100");
        assert_eq!(info.info().unwrap().phone, "");
        assert_eq!(edited.content().field("phone"), Some("555-0100"));
    }

    #[test]
    fn test_with_field_title_applies_to_every_kind() {
        for key in SectionKey::ALL {
            let section = Section::empty(key).with_field("title", "Renamed").unwrap();
            assert_eq!(section.title(), "Renamed");
        }
    }

    #[test]
    fn test_with_field_rejects_foreign_field() {
        let banner = Section::empty(SectionKey::Banner);
        let err = banner.with_field("phone", "x").unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownField {
                target: "banner section".to_string(),
                field: "phone".to_string(),
            }
        );

        let services = Section::empty(SectionKey::Services);
        assert!(services.with_field("text", "x").is_err());
    }

    #[test]
    fn test_with_banner_on_info_section_fails() {
        let info = Section::empty(SectionKey::Info);
        assert!(info.with_banner(BannerContent::default()).is_err());
    }

    #[test]
    fn test_service_fields() {
        let service = Service::new("voice", "Voice Consultation", "Call us");
        assert!(service.is_visible());
        assert!(!service.toggled().is_visible());

        let renamed = service.with_field("title", "Phone call").unwrap();
        assert_eq!(renamed.title(), "Phone call");
        assert!(service.with_field("visible", "false").is_err());
    }

    #[test]
    fn test_service_key_stays_out_of_section_namespace() {
        assert_eq!(ServiceKey::parse("voice").unwrap().as_str(), "voice");
        assert!(ServiceKey::parse("sections").is_ok());

        for bad in ["", "section-info", "section-"] {
            assert!(matches!(
                ServiceKey::parse(bad),
                Err(DocumentError::InvalidKey(_))
            ));
        }
    }
}
