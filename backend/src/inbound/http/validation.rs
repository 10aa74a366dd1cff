//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `InvalidRequest` error whose details carry the
//! offending `field` and a stable `code`.

use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    ContentItemId, ContentValidationError, Error, Language, PageName, StaticTranslationKey,
    TourValidationError,
};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Map a tour write-model rejection onto the request field.
pub(crate) fn tour_validation_error(err: &TourValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

/// Map a content rejection onto the request field.
pub(crate) fn content_validation_error(err: &ContentValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn parse_page_name(value: String) -> Result<PageName, Error> {
    PageName::new(value).map_err(|err| content_validation_error(&err))
}

pub(crate) fn parse_item_id(value: String) -> Result<ContentItemId, Error> {
    ContentItemId::new(value).map_err(|err| content_validation_error(&err))
}

pub(crate) fn parse_static_key(value: String) -> Result<StaticTranslationKey, Error> {
    StaticTranslationKey::new(value).map_err(|err| content_validation_error(&err))
}

pub(crate) fn parse_language(value: &str) -> Result<Language, Error> {
    Language::from_str(value).map_err(|err| content_validation_error(&err))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub(crate) fn parse_date(value: &str, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        Error::invalid_request(format!("{} must be a YYYY-MM-DD date", field.as_str()))
            .with_details(json!({
                "field": field.as_str(),
                "value": value,
                "code": "invalid_date",
            }))
    })
}
