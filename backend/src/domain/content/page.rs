//! Page documents: ordered sections of typed items.

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::ContentValidationError;

const PAGE_NAME_MAX: usize = 64;

/// Unique page identifier, e.g. `home` or `about-us`.
///
/// ## Invariants
/// - 1 to 64 characters.
/// - ASCII letters, digits, `-` and `_` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PageName(String);

impl PageName {
    /// Validate a page name.
    ///
    /// # Examples
    /// ```
    /// use tourbook::domain::PageName;
    ///
    /// assert!(PageName::new("about-us").is_ok());
    /// assert!(PageName::new("about us").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ContentValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ContentValidationError::EmptyField { field: "pageName" });
        }
        if value.len() > PAGE_NAME_MAX {
            return Err(ContentValidationError::TooLong {
                field: "pageName",
                max: PAGE_NAME_MAX,
            });
        }
        let valid = value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ContentValidationError::InvalidCharacters { field: "pageName" });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PageName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for PageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PageName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// One typed item inside a page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageItem {
    Heading {
        id: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u8>,
    },
    Paragraph {
        id: String,
        text: String,
    },
    Button {
        id: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
    Image {
        id: String,
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Statistic {
        id: String,
        value: String,
        label: String,
    },
}

impl PageItem {
    /// Identifier of the item within its section.
    pub fn id(&self) -> &str {
        match self {
            Self::Heading { id, .. }
            | Self::Paragraph { id, .. }
            | Self::Button { id, .. }
            | Self::Image { id, .. }
            | Self::Statistic { id, .. } => id,
        }
    }
}

/// Named list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSection {
    pub name: String,
    pub items: Vec<PageItem>,
}

/// Ordered mapping from section name to its items.
///
/// Serialises as a JSON object whose key order matches insertion order.
/// Section names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDocument {
    sections: Vec<PageSection>,
}

/// Failure while replacing an item in a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PagePatchError {
    #[error("section {section} does not exist")]
    SectionMissing { section: String },
    #[error("item {item_id} does not exist in section {section}")]
    ItemMissing { section: String, item_id: String },
}

impl PageDocument {
    /// Build a document, rejecting duplicate section names.
    pub fn new(sections: Vec<PageSection>) -> Result<Self, ContentValidationError> {
        let mut document = Self::default();
        for section in sections {
            document.push_section(section)?;
        }
        Ok(document)
    }

    fn push_section(&mut self, section: PageSection) -> Result<(), ContentValidationError> {
        if self.section(&section.name).is_some() {
            return Err(ContentValidationError::DuplicateSection {
                section: section.name,
            });
        }
        self.sections.push(section);
        Ok(())
    }

    pub fn sections(&self) -> &[PageSection] {
        self.sections.as_slice()
    }

    pub fn section(&self, name: &str) -> Option<&PageSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Replace the item with `item_id` in `section` by `replacement`.
    pub fn replace_item(
        &mut self,
        section: &str,
        item_id: &str,
        replacement: PageItem,
    ) -> Result<(), PagePatchError> {
        let target = self
            .sections
            .iter_mut()
            .find(|candidate| candidate.name == section)
            .ok_or_else(|| PagePatchError::SectionMissing {
                section: section.to_owned(),
            })?;
        let slot = target
            .items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| PagePatchError::ItemMissing {
                section: section.to_owned(),
                item_id: item_id.to_owned(),
            })?;
        *slot = replacement;
        Ok(())
    }

    /// Encode as JSON text for storage.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode stored JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Serialize for PageDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, &section.items)?;
        }
        map.end()
    }
}

struct PageDocumentVisitor;

impl<'de> Visitor<'de> for PageDocumentVisitor {
    type Value = PageDocument;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("an object mapping section names to item lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut document = PageDocument::default();
        while let Some((name, items)) = access.next_entry::<String, Vec<PageItem>>()? {
            document
                .push_section(PageSection { name, items })
                .map_err(serde::de::Error::custom)?;
        }
        Ok(document)
    }
}

impl<'de> Deserialize<'de> for PageDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PageDocumentVisitor)
    }
}

/// Stored page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub page_name: PageName,
    #[schema(value_type = Object)]
    pub document: PageDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Default content used when resetting a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageDefault {
    pub page_name: PageName,
    #[schema(value_type = Object)]
    pub document: PageDocument,
}
