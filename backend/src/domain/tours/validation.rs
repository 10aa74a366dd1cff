//! Validation helpers shared by tour and lookup write models.

use std::collections::HashSet;

use super::TourValidationError;

pub(super) const NAME_MAX: usize = 255;

pub(super) fn require_text(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, TourValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TourValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(TourValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

pub(super) fn ensure_price(value: i64, field: &'static str) -> Result<i64, TourValidationError> {
    if value < 0 {
        return Err(TourValidationError::NegativePrice { field, value });
    }
    Ok(value)
}

pub(super) fn ensure_optional_price(
    value: Option<i64>,
    field: &'static str,
) -> Result<Option<i64>, TourValidationError> {
    value.map(|amount| ensure_price(amount, field)).transpose()
}

/// Reject non-positive identifiers and collapse duplicates, keeping the first
/// occurrence of each.
pub(super) fn dedupe_ids(
    ids: Vec<i32>,
    field: &'static str,
) -> Result<Vec<i32>, TourValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    let mut kept = Vec::with_capacity(ids.len());
    for id in ids {
        if id <= 0 {
            return Err(TourValidationError::InvalidReference { field, value: id });
        }
        if seen.insert(id) {
            kept.push(id);
        }
    }
    Ok(kept)
}

pub(super) fn clean_images(images: Vec<String>) -> Result<Vec<String>, TourValidationError> {
    images
        .into_iter()
        .map(|url| {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                Err(TourValidationError::EmptyField {
                    field: "additionalImages",
                })
            } else {
                Ok(trimmed.to_owned())
            }
        })
        .collect()
}
