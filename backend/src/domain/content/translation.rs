//! Per-language overlays for content items and static UI strings.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::ContentValidationError;
use super::item::{ContentItemId, ContentKind};
use super::page::PageName;

const STATIC_KEY_MAX: usize = 255;
const CATEGORY_MAX: usize = 64;

/// Supported languages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Vi,
}

impl Language {
    /// Two-letter code used in storage and URLs.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ContentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "vi" => Ok(Self::Vi),
            _ => Err(ContentValidationError::UnknownLanguage {
                value: value.to_owned(),
            }),
        }
    }
}

/// Write model for one translation of a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationDraft {
    pub content_item_id: ContentItemId,
    pub language: Language,
    pub content: String,
    pub metadata: Option<Value>,
}

/// Stored translation of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentTranslation {
    pub content_item_id: ContentItemId,
    pub language: Language,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Translation joined with the placement of its parent item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationVariant {
    pub language: Language,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub kind: ContentKind,
    pub page_name: PageName,
    pub section_name: String,
    pub updated_at: DateTime<Utc>,
}

/// Translations grouped by parent item id.
pub type TranslationsByItem = BTreeMap<ContentItemId, Vec<TranslationVariant>>;

/// Result of a bulk translation upsert.
///
/// Entries whose parent item is missing are skipped rather than failing the
/// batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkTranslationOutcome {
    pub applied: usize,
    pub skipped: Vec<ContentItemId>,
}

/// Key of a static UI string, e.g. `nav.home`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct StaticTranslationKey(String);

impl StaticTranslationKey {
    /// Validate a key: non-empty, at most 255 characters, no whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ContentValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ContentValidationError::EmptyField { field: "key" });
        }
        if value.chars().count() > STATIC_KEY_MAX {
            return Err(ContentValidationError::TooLong {
                field: "key",
                max: STATIC_KEY_MAX,
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ContentValidationError::InvalidCharacters { field: "key" });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for StaticTranslationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StaticTranslationKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Write model for a static UI string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTranslationDraft {
    pub key: StaticTranslationKey,
    pub en: String,
    pub vi: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl StaticTranslationDraft {
    /// Assemble a draft, dropping blank optional fields.
    pub fn new(
        key: StaticTranslationKey,
        en: impl Into<String>,
        vi: impl Into<String>,
        category: Option<String>,
        description: Option<String>,
    ) -> Result<Self, ContentValidationError> {
        let category = category
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        if category
            .as_ref()
            .is_some_and(|value| value.chars().count() > CATEGORY_MAX)
        {
            return Err(ContentValidationError::TooLong {
                field: "category",
                max: CATEGORY_MAX,
            });
        }
        Ok(Self {
            key,
            en: en.into(),
            vi: vi.into(),
            category,
            description: description.filter(|value| !value.trim().is_empty()),
        })
    }
}

/// Stored static UI string in both languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaticTranslation {
    pub key: StaticTranslationKey,
    pub en: String,
    pub vi: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}
