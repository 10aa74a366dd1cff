//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live next to
//! the repositories that load them.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{
    cities, content_items, content_translations, event_types, package_items, page_contents,
    static_translations, tour_additional_images, tour_cities, tour_event_types,
    tour_package_items, tours,
};

// ---------------------------------------------------------------------------
// Tour models
// ---------------------------------------------------------------------------

/// Row struct for reading from the tours table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TourRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub image_url: String,
    pub early_bird_regular_price: Option<i64>,
    pub early_bird_returning_price: Option<i64>,
    pub standard_regular_price: i64,
    pub standard_returning_price: Option<i64>,
    pub display_date: String,
    pub location: String,
    pub duration: String,
    pub tour_dates: String,
    pub customize: String,
    pub early_bird_deadline: Option<NaiveDate>,
    pub standard_deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Scalar tour columns shared by inserts and full-overwrite updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tours)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct TourScalarsRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub short_description: &'a str,
    pub image_url: &'a str,
    pub early_bird_regular_price: Option<i64>,
    pub early_bird_returning_price: Option<i64>,
    pub standard_regular_price: i64,
    pub standard_returning_price: Option<i64>,
    pub display_date: &'a str,
    pub location: &'a str,
    pub duration: &'a str,
    pub tour_dates: &'a str,
    pub customize: &'a str,
    pub early_bird_deadline: Option<NaiveDate>,
    pub standard_deadline: Option<NaiveDate>,
}

/// Insertable tour root carrying the creation timestamp.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tours)]
pub(crate) struct NewTourRow<'a> {
    #[diesel(embed)]
    pub scalars: TourScalarsRow<'a>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = tour_cities)]
pub(crate) struct NewTourCityRow {
    pub tour_id: i32,
    pub city_id: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = tour_event_types)]
pub(crate) struct NewTourEventTypeRow {
    pub tour_id: i32,
    pub event_type_id: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = tour_package_items)]
pub(crate) struct NewTourPackageItemRow {
    pub tour_id: i32,
    pub package_item_id: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tour_additional_images)]
pub(crate) struct NewTourImageRow<'a> {
    pub tour_id: i32,
    pub image_url: &'a str,
    pub position: i32,
}

// ---------------------------------------------------------------------------
// Lookup models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CityRow {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub wiki_url: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cities)]
pub(crate) struct NewCityRow<'a> {
    pub name: &'a str,
    pub image_url: &'a str,
    pub wiki_url: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = event_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventTypeRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = package_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PackageItemRow {
    pub id: i32,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Page content models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = page_contents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PageContentRow {
    pub page_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = page_contents)]
pub(crate) struct NewPageContentRow<'a> {
    pub page_name: &'a str,
    pub content: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = page_contents)]
pub(crate) struct PageContentUpdate<'a> {
    pub content: &'a str,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Content item and translation models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentItemRow {
    pub id: String,
    pub kind: String,
    pub content: String,
    pub metadata: Option<String>,
    pub page_name: String,
    pub section_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = content_items)]
pub(crate) struct NewContentItemRow<'a> {
    pub id: &'a str,
    pub kind: &'a str,
    pub content: &'a str,
    pub metadata: Option<String>,
    pub page_name: &'a str,
    pub section_name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_translations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContentTranslationRow {
    pub content_item_id: String,
    pub language: String,
    pub content: String,
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = content_translations)]
pub(crate) struct NewContentTranslationRow<'a> {
    pub content_item_id: &'a str,
    pub language: &'a str,
    pub content: &'a str,
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parent placement loaded alongside each translation.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = content_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemPlacementRow {
    pub kind: String,
    pub page_name: String,
    pub section_name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = static_translations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StaticTranslationRow {
    pub key: String,
    pub en: String,
    pub vi: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = static_translations)]
pub(crate) struct NewStaticTranslationRow<'a> {
    pub key: &'a str,
    pub en: &'a str,
    pub vi: &'a str,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
