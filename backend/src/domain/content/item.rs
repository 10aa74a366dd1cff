//! Individually addressable content items.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::ContentValidationError;
use super::page::PageName;

const ITEM_ID_MAX: usize = 128;
const SECTION_NAME_MAX: usize = 64;

/// Caller-chosen identifier of a content item.
///
/// ## Invariants
/// - 1 to 128 characters.
/// - No whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ContentItemId(String);

impl ContentItemId {
    /// Validate an item identifier.
    ///
    /// # Examples
    /// ```
    /// use tourbook::domain::ContentItemId;
    ///
    /// assert!(ContentItemId::new("home.hero.title").is_ok());
    /// assert!(ContentItemId::new("home hero").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ContentValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ContentValidationError::EmptyField { field: "id" });
        }
        if value.chars().count() > ITEM_ID_MAX {
            return Err(ContentValidationError::TooLong {
                field: "id",
                max: ITEM_ID_MAX,
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ContentValidationError::InvalidCharacters { field: "id" });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ContentItemId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ContentItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Kind of a content item; mirrors the page item variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Heading,
    Paragraph,
    Button,
    Image,
    Statistic,
}

impl ContentKind {
    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Button => "button",
            Self::Image => "image",
            Self::Statistic => "statistic",
        }
    }
}

impl FromStr for ContentKind {
    type Err = ContentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "heading" => Ok(Self::Heading),
            "paragraph" => Ok(Self::Paragraph),
            "button" => Ok(Self::Button),
            "image" => Ok(Self::Image),
            "statistic" => Ok(Self::Statistic),
            other => Err(ContentValidationError::UnknownKind {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated write model for a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItemDraft {
    pub id: ContentItemId,
    pub kind: ContentKind,
    pub content: String,
    pub metadata: Option<Value>,
    pub page_name: PageName,
    pub section_name: String,
}

impl ContentItemDraft {
    /// Validate the section name and assemble a draft.
    pub fn new(
        id: ContentItemId,
        kind: ContentKind,
        content: impl Into<String>,
        metadata: Option<Value>,
        page_name: PageName,
        section_name: impl Into<String>,
    ) -> Result<Self, ContentValidationError> {
        let section_name = section_name.into().trim().to_owned();
        if section_name.is_empty() {
            return Err(ContentValidationError::EmptyField {
                field: "sectionName",
            });
        }
        if section_name.chars().count() > SECTION_NAME_MAX {
            return Err(ContentValidationError::TooLong {
                field: "sectionName",
                max: SECTION_NAME_MAX,
            });
        }
        Ok(Self {
            id,
            kind,
            content: content.into(),
            metadata: metadata.filter(|value| !value.is_null()),
            page_name,
            section_name,
        })
    }
}

/// Stored content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentItemId,
    pub kind: ContentKind,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub page_name: PageName,
    pub section_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
