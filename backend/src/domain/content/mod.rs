//! Page content, content items and their translations.

mod item;
mod page;
mod translation;

pub use item::{ContentItem, ContentItemDraft, ContentItemId, ContentKind};
pub use page::{
    PageContent, PageDefault, PageDocument, PageItem, PageName, PagePatchError, PageSection,
};
pub use translation::{
    BulkTranslationOutcome, ContentTranslation, Language, StaticTranslation,
    StaticTranslationDraft, StaticTranslationKey, TranslationDraft, TranslationVariant,
    TranslationsByItem,
};

/// Validation failures raised by content types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} contains unsupported characters")]
    InvalidCharacters { field: &'static str },
    #[error("section {section} appears more than once")]
    DuplicateSection { section: String },
    #[error("unknown content kind: {value}")]
    UnknownKind { value: String },
    #[error("unsupported language: {value}")]
    UnknownLanguage { value: String },
}

impl ContentValidationError {
    /// Field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field }
            | Self::TooLong { field, .. }
            | Self::InvalidCharacters { field } => field,
            Self::DuplicateSection { .. } => "document",
            Self::UnknownKind { .. } => "kind",
            Self::UnknownLanguage { .. } => "language",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyField { .. } => "empty",
            Self::TooLong { .. } => "too_long",
            Self::InvalidCharacters { .. } => "invalid_characters",
            Self::DuplicateSection { .. } => "duplicate_section",
            Self::UnknownKind { .. } => "unknown_kind",
            Self::UnknownLanguage { .. } => "unknown_language",
        }
    }
}
