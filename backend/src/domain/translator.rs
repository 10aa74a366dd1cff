//! Translation suggestions for editors.
//!
//! A [`TranslationSuggester`] is built once at startup. It prefers an injected
//! [`MachineTranslator`] and falls back to a small built-in phrase dictionary
//! when the engine is absent or fails. The availability of the engine is
//! fixed at construction and reported to clients.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::MachineTranslator;
use crate::domain::{Error, Language};

const BUILT_IN_PHRASES: &[(&str, &str)] = &[
    ("home", "trang chủ"),
    ("tours", "chuyến đi"),
    ("about us", "về chúng tôi"),
    ("contact", "liên hệ"),
    ("book now", "đặt ngay"),
    ("register", "đăng ký"),
    ("price", "giá"),
    ("early bird", "ưu đãi sớm"),
    ("duration", "thời lượng"),
    ("location", "địa điểm"),
    ("learn more", "tìm hiểu thêm"),
    ("welcome", "chào mừng"),
];

/// Whether a machine translation engine was configured at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TranslatorAvailability {
    Available,
    Unavailable,
}

/// Where a suggestion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    Machine,
    Dictionary,
    /// No translation was found; the source text is echoed back.
    Untranslated,
}

/// Suggested translation for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationSuggestion {
    pub text: String,
    pub source: SuggestionSource,
    pub availability: TranslatorAvailability,
}

/// Bidirectional English/Vietnamese phrase table with case-insensitive
/// exact matching.
#[derive(Debug, Clone, Default)]
pub struct PhraseDictionary {
    en_to_vi: HashMap<String, String>,
    vi_to_en: HashMap<String, String>,
}

impl PhraseDictionary {
    /// Dictionary seeded with the common site phrases.
    pub fn built_in() -> Self {
        BUILT_IN_PHRASES
            .iter()
            .fold(Self::default(), |dictionary, (en, vi)| {
                dictionary.with_phrase(en, vi)
            })
    }

    /// Add an English/Vietnamese pair.
    #[must_use]
    pub fn with_phrase(mut self, en: &str, vi: &str) -> Self {
        self.en_to_vi.insert(normalise(en), vi.to_owned());
        self.vi_to_en.insert(normalise(vi), en.to_owned());
        self
    }

    /// Look a phrase up. `None` for unknown phrases and same-language pairs.
    pub fn lookup(&self, text: &str, from: Language, to: Language) -> Option<&str> {
        let table = match (from, to) {
            (Language::En, Language::Vi) => &self.en_to_vi,
            (Language::Vi, Language::En) => &self.vi_to_en,
            _ => return None,
        };
        table.get(&normalise(text)).map(String::as_str)
    }
}

fn normalise(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Stateless suggestion service shared by HTTP workers.
#[derive(Clone)]
pub struct TranslationSuggester {
    translator: Option<Arc<dyn MachineTranslator>>,
    dictionary: PhraseDictionary,
    availability: TranslatorAvailability,
}

impl TranslationSuggester {
    /// Build a suggester; availability follows whether an engine is given.
    pub fn new(
        translator: Option<Arc<dyn MachineTranslator>>,
        dictionary: PhraseDictionary,
    ) -> Self {
        let availability = if translator.is_some() {
            TranslatorAvailability::Available
        } else {
            TranslatorAvailability::Unavailable
        };
        Self {
            translator,
            dictionary,
            availability,
        }
    }

    /// Dictionary-only suggester.
    pub fn dictionary_only() -> Self {
        Self::new(None, PhraseDictionary::built_in())
    }

    pub fn availability(&self) -> TranslatorAvailability {
        self.availability
    }

    /// Suggest a translation of `text` from one language into the other.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::InvalidRequest`] when the text is
    /// blank or both languages are the same.
    pub async fn suggest(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<TranslationSuggestion, Error> {
        if from == to {
            return Err(Error::invalid_request("source and target languages must differ")
                .with_details(serde_json::json!({
                    "field": "to",
                    "code": "same_language",
                    "value": to,
                })));
        }
        if text.trim().is_empty() {
            return Err(Error::invalid_request("text must not be empty").with_details(
                serde_json::json!({ "field": "text", "code": "empty" }),
            ));
        }

        if let Some(translator) = &self.translator {
            match translator.translate(text, from, to).await {
                Ok(translated) => return Ok(self.suggestion(translated, SuggestionSource::Machine)),
                Err(err) => warn!(
                    error = %err,
                    code = err.code().as_str(),
                    %from,
                    %to,
                    "machine translation failed"
                ),
            }
        }

        Ok(match self.dictionary.lookup(text, from, to) {
            Some(phrase) => self.suggestion(phrase.to_owned(), SuggestionSource::Dictionary),
            None => self.suggestion(text.to_owned(), SuggestionSource::Untranslated),
        })
    }

    fn suggestion(&self, text: String, source: SuggestionSource) -> TranslationSuggestion {
        TranslationSuggestion {
            text,
            source,
            availability: self.availability,
        }
    }
}

impl std::fmt::Debug for TranslationSuggester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationSuggester")
            .field("availability", &self.availability)
            .finish_non_exhaustive()
    }
}
