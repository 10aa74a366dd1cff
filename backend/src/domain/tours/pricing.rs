//! Four-tier tour pricing.
//!
//! Amounts are integers in the smallest currency unit. The early-bird tier
//! applies up to and including the early-bird deadline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::TourValidationError;
use super::validation::{ensure_optional_price, ensure_price};

/// Price table for one tour.
///
/// `standard_regular` is the only required amount; the others fall back as
/// described on [`PriceTiers::quote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceTiers {
    /// Standard price for first-time participants.
    pub standard_regular: i64,
    /// Standard price for returning-university participants.
    pub standard_returning: Option<i64>,
    /// Early-bird price for first-time participants.
    pub early_bird_regular: Option<i64>,
    /// Early-bird price for returning-university participants.
    pub early_bird_returning: Option<i64>,
}

/// Tier a quote was priced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Registration on or before the early-bird deadline.
    EarlyBird,
    /// Any other registration.
    Standard,
}

/// Price owed for one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Tier the amount was taken from after fallbacks.
    pub tier: PriceTier,
    /// Whether the returning-university rate was requested.
    pub returning_university: bool,
    /// Amount in the smallest currency unit.
    pub amount: i64,
}

impl PriceTiers {
    /// Reject negative amounts.
    pub fn validate(self) -> Result<Self, TourValidationError> {
        Ok(Self {
            standard_regular: ensure_price(self.standard_regular, "prices.standardRegular")?,
            standard_returning: ensure_optional_price(
                self.standard_returning,
                "prices.standardReturning",
            )?,
            early_bird_regular: ensure_optional_price(
                self.early_bird_regular,
                "prices.earlyBirdRegular",
            )?,
            early_bird_returning: ensure_optional_price(
                self.early_bird_returning,
                "prices.earlyBirdReturning",
            )?,
        })
    }

    /// Price a registration.
    ///
    /// The early-bird tier is chosen when `early_bird_deadline` is set and
    /// `registration_date` is on or before it. Inside a tier a missing
    /// returning price falls back to that tier's regular price. When the
    /// early-bird amount for the participant is absent altogether the standard
    /// tier is used, and the quote then reports [`PriceTier::Standard`].
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use tourbook::domain::{PriceTier, PriceTiers};
    ///
    /// let tiers = PriceTiers {
    ///     standard_regular: 5_000,
    ///     standard_returning: None,
    ///     early_bird_regular: Some(4_000),
    ///     early_bird_returning: None,
    /// };
    /// let deadline = NaiveDate::from_ymd_opt(2026, 3, 1);
    /// let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    /// let quote = tiers.quote(deadline, day, true);
    /// assert_eq!(quote.tier, PriceTier::EarlyBird);
    /// assert_eq!(quote.amount, 4_000);
    /// ```
    pub fn quote(
        &self,
        early_bird_deadline: Option<NaiveDate>,
        registration_date: NaiveDate,
        returning_university: bool,
    ) -> PriceQuote {
        let early_bird = early_bird_deadline.is_some_and(|deadline| registration_date <= deadline);
        let early_bird_amount = early_bird
            .then(|| {
                if returning_university {
                    self.early_bird_returning.or(self.early_bird_regular)
                } else {
                    self.early_bird_regular
                }
            })
            .flatten();

        match early_bird_amount {
            Some(amount) => PriceQuote {
                tier: PriceTier::EarlyBird,
                returning_university,
                amount,
            },
            None => PriceQuote {
                tier: PriceTier::Standard,
                returning_university,
                amount: if returning_university {
                    self.standard_returning.unwrap_or(self.standard_regular)
                } else {
                    self.standard_regular
                },
            },
        }
    }
}
