//! Tour read model and validated write model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TourValidationError;
use super::lookup::{City, EventType, PackageItem};
use super::pricing::{PriceQuote, PriceTiers};
use super::validation::{NAME_MAX, clean_images, dedupe_ids, require_text};

/// Database identity of a tour.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct TourId(i32);

impl TourId {
    /// Wrap a raw database identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw database identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scalar columns of the tour root row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourFields {
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub image_url: String,
    pub prices: PriceTiers,
    /// Human-readable display date, e.g. "March 2026".
    pub date: String,
    pub location: String,
    pub duration: String,
    pub tour_dates: String,
    pub customize: String,
    pub early_bird_deadline: Option<NaiveDate>,
    pub standard_deadline: Option<NaiveDate>,
}

/// Tour aggregate with its collections attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: TourId,
    #[serde(flatten)]
    pub fields: TourFields,
    pub cities: Vec<City>,
    pub event_types: Vec<EventType>,
    pub package_items: Vec<PackageItem>,
    pub additional_images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Tour {
    /// Price a registration made on `registration_date`.
    pub fn price_for(&self, registration_date: NaiveDate, returning_university: bool) -> PriceQuote {
        self.fields.prices.quote(
            self.fields.early_bird_deadline,
            registration_date,
            returning_university,
        )
    }

    /// Whether registrations are still accepted on `date`.
    ///
    /// Without a standard deadline registration never closes. This is
    /// informational; nothing in the store enforces it.
    pub fn registration_open(&self, date: NaiveDate) -> bool {
        self.fields
            .standard_deadline
            .is_none_or(|deadline| date <= deadline)
    }
}

/// Unvalidated input for [`TourDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourDraftInput {
    pub fields: TourFields,
    pub city_ids: Vec<i32>,
    pub event_type_ids: Vec<i32>,
    pub package_item_ids: Vec<i32>,
    pub additional_images: Vec<String>,
}

/// Validated full-replacement write model for a tour.
///
/// ## Invariants
/// - Required text fields are trimmed and non-empty.
/// - Prices are non-negative.
/// - Each identifier list holds positive, distinct ids in first-seen order.
/// - Image URLs are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourDraft {
    fields: TourFields,
    city_ids: Vec<i32>,
    event_type_ids: Vec<i32>,
    package_item_ids: Vec<i32>,
    additional_images: Vec<String>,
}

impl TourDraft {
    /// Validate a draft.
    ///
    /// # Examples
    /// ```
    /// use tourbook::domain::{PriceTiers, TourDraft, TourDraftInput, TourFields};
    ///
    /// let input = TourDraftInput {
    ///     fields: TourFields {
    ///         title: "Ha Long Bay".into(),
    ///         description: String::new(),
    ///         short_description: String::new(),
    ///         image_url: String::new(),
    ///         prices: PriceTiers {
    ///             standard_regular: 10_000,
    ///             standard_returning: None,
    ///             early_bird_regular: None,
    ///             early_bird_returning: None,
    ///         },
    ///         date: "May 2026".into(),
    ///         location: "Quang Ninh".into(),
    ///         duration: "3 days".into(),
    ///         tour_dates: String::new(),
    ///         customize: String::new(),
    ///         early_bird_deadline: None,
    ///         standard_deadline: None,
    ///     },
    ///     city_ids: vec![2, 1, 2],
    ///     event_type_ids: vec![],
    ///     package_item_ids: vec![],
    ///     additional_images: vec![],
    /// };
    /// let draft = TourDraft::new(input).expect("valid draft");
    /// assert_eq!(draft.city_ids(), &[2, 1]);
    /// ```
    pub fn new(input: TourDraftInput) -> Result<Self, TourValidationError> {
        let TourDraftInput {
            fields,
            city_ids,
            event_type_ids,
            package_item_ids,
            additional_images,
        } = input;

        let fields = TourFields {
            title: require_text(fields.title, "title", NAME_MAX)?,
            date: require_text(fields.date, "date", NAME_MAX)?,
            location: require_text(fields.location, "location", NAME_MAX)?,
            duration: require_text(fields.duration, "duration", NAME_MAX)?,
            prices: fields.prices.validate()?,
            ..fields
        };

        Ok(Self {
            fields,
            city_ids: dedupe_ids(city_ids, "cityIds")?,
            event_type_ids: dedupe_ids(event_type_ids, "eventTypeIds")?,
            package_item_ids: dedupe_ids(package_item_ids, "packageItemIds")?,
            additional_images: clean_images(additional_images)?,
        })
    }

    pub fn fields(&self) -> &TourFields {
        &self.fields
    }

    pub fn city_ids(&self) -> &[i32] {
        self.city_ids.as_slice()
    }

    pub fn event_type_ids(&self) -> &[i32] {
        self.event_type_ids.as_slice()
    }

    pub fn package_item_ids(&self) -> &[i32] {
        self.package_item_ids.as_slice()
    }

    pub fn additional_images(&self) -> &[String] {
        self.additional_images.as_slice()
    }
}
