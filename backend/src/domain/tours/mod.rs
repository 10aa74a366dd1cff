//! Tour aggregate, pricing rule and the shared lookups tours link to.
//!
//! A [`Tour`] is the read model assembled from the tour root row and its four
//! child collections. Writes go through a validated [`TourDraft`], which
//! always carries the full replacement lists for those collections.

mod lookup;
mod pricing;
mod tour;
mod validation;

pub use lookup::{City, CityDraft, EventType, LookupName, PackageItem};
pub use pricing::{PriceQuote, PriceTier, PriceTiers};
pub use tour::{Tour, TourDraft, TourDraftInput, TourFields, TourId};

/// Validation failures raised while constructing tour write models.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourValidationError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Offending field name.
        field: &'static str,
    },
    /// A text field exceeded its storage limit.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Offending field name.
        field: &'static str,
        /// Maximum number of characters accepted.
        max: usize,
    },
    /// A price was negative.
    #[error("{field} must not be negative (got {value})")]
    NegativePrice {
        /// Offending field name.
        field: &'static str,
        /// Rejected amount.
        value: i64,
    },
    /// A lookup identifier was not a positive integer.
    #[error("{field} contains invalid identifier {value}")]
    InvalidReference {
        /// Offending field name.
        field: &'static str,
        /// Rejected identifier.
        value: i32,
    },
}

impl TourValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field }
            | Self::TooLong { field, .. }
            | Self::NegativePrice { field, .. }
            | Self::InvalidReference { field, .. } => field,
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyField { .. } => "empty",
            Self::TooLong { .. } => "too_long",
            Self::NegativePrice { .. } => "negative_price",
            Self::InvalidReference { .. } => "invalid_reference",
        }
    }
}

#[cfg(test)]
mod tests;
