//! Shared lookup entities referenced by tours through join tables.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TourValidationError;
use super::validation::{NAME_MAX, require_text};

/// Validated unique name of a lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct LookupName(String);

impl LookupName {
    /// Trim and validate a lookup name.
    ///
    /// # Examples
    /// ```
    /// use tourbook::domain::LookupName;
    ///
    /// let name = LookupName::new("  Hanoi ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Hanoi");
    /// assert!(LookupName::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, TourValidationError> {
        require_text(value.into(), "name", NAME_MAX).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for LookupName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for LookupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// City a tour visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub wiki_url: Option<String>,
}

/// Write model for a new city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDraft {
    pub name: LookupName,
    pub image_url: String,
    pub wiki_url: Option<String>,
}

impl CityDraft {
    /// Build a draft, normalising blank optional URLs to `None`.
    pub fn new(
        name: impl Into<String>,
        image_url: impl Into<String>,
        wiki_url: Option<String>,
    ) -> Result<Self, TourValidationError> {
        Ok(Self {
            name: LookupName::new(name)?,
            image_url: image_url.into().trim().to_owned(),
            wiki_url: wiki_url
                .map(|url| url.trim().to_owned())
                .filter(|url| !url.is_empty()),
        })
    }
}

/// Kind of event a tour includes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: i32,
    pub name: String,
}

/// Item bundled into a tour package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageItem {
    pub id: i32,
    pub name: String,
}
