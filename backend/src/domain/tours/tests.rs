//! Tests for tour validation and pricing.

use chrono::{NaiveDate, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

#[fixture]
fn fields() -> TourFields {
    TourFields {
        title: "Sapa Trek".to_owned(),
        description: "Rice terraces".to_owned(),
        short_description: String::new(),
        image_url: "https://img.example/sapa.jpg".to_owned(),
        prices: PriceTiers {
            standard_regular: 10_000,
            standard_returning: Some(9_000),
            early_bird_regular: Some(8_000),
            early_bird_returning: Some(7_000),
        },
        date: "June 2026".to_owned(),
        location: "Lao Cai".to_owned(),
        duration: "4 days".to_owned(),
        tour_dates: "1-4 June".to_owned(),
        customize: String::new(),
        early_bird_deadline: Some(day(2026, 3, 31)),
        standard_deadline: Some(day(2026, 5, 15)),
    }
}

#[fixture]
fn input(fields: TourFields) -> TourDraftInput {
    TourDraftInput {
        fields,
        city_ids: vec![3, 1, 3, 2],
        event_type_ids: vec![5],
        package_item_ids: vec![],
        additional_images: vec![" https://img.example/a.jpg ".to_owned()],
    }
}

fn tour_with(fields: TourFields) -> Tour {
    Tour {
        id: TourId::new(1),
        fields,
        cities: vec![],
        event_types: vec![],
        package_items: vec![],
        additional_images: vec![],
        created_at: Utc
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid fixture timestamp"),
    }
}

#[rstest]
fn draft_trims_and_dedupes(mut input: TourDraftInput) {
    input.fields.title = "  Sapa Trek ".to_owned();
    let draft = TourDraft::new(input).expect("valid draft");
    assert_eq!(draft.fields().title, "Sapa Trek");
    assert_eq!(draft.city_ids(), &[3, 1, 2]);
    assert_eq!(draft.additional_images(), &["https://img.example/a.jpg".to_owned()]);
}

#[rstest]
#[case("title")]
#[case("location")]
#[case("duration")]
#[case("date")]
fn draft_rejects_blank_required_fields(mut input: TourDraftInput, #[case] field: &str) {
    match field {
        "title" => input.fields.title = "  ".to_owned(),
        "location" => input.fields.location = String::new(),
        "duration" => input.fields.duration = "\t".to_owned(),
        _ => input.fields.date = String::new(),
    }
    let err = TourDraft::new(input).expect_err("blank field rejected");
    assert_eq!(err.field(), field);
    assert_eq!(err.code(), "empty");
}

#[rstest]
fn draft_rejects_negative_prices(mut input: TourDraftInput) {
    input.fields.prices.early_bird_returning = Some(-1);
    let err = TourDraft::new(input).expect_err("negative price rejected");
    assert_eq!(
        err,
        TourValidationError::NegativePrice {
            field: "prices.earlyBirdReturning",
            value: -1,
        }
    );
}

#[rstest]
fn draft_rejects_non_positive_ids(mut input: TourDraftInput) {
    input.package_item_ids = vec![4, 0];
    let err = TourDraft::new(input).expect_err("zero id rejected");
    assert_eq!(err.field(), "packageItemIds");
}

#[rstest]
fn draft_rejects_blank_image_urls(mut input: TourDraftInput) {
    input.additional_images.push("   ".to_owned());
    let err = TourDraft::new(input).expect_err("blank image rejected");
    assert_eq!(err.field(), "additionalImages");
}

#[rstest]
fn draft_rejects_overlong_title(mut input: TourDraftInput) {
    input.fields.title = "x".repeat(256);
    let err = TourDraft::new(input).expect_err("long title rejected");
    assert_eq!(err.code(), "too_long");
}

#[rstest]
#[case(day(2026, 3, 30), false, PriceTier::EarlyBird, 8_000)]
#[case(day(2026, 3, 31), false, PriceTier::EarlyBird, 8_000)]
#[case(day(2026, 3, 31), true, PriceTier::EarlyBird, 7_000)]
#[case(day(2026, 4, 1), false, PriceTier::Standard, 10_000)]
#[case(day(2026, 4, 1), true, PriceTier::Standard, 9_000)]
fn price_follows_inclusive_early_bird_deadline(
    fields: TourFields,
    #[case] date: NaiveDate,
    #[case] returning: bool,
    #[case] tier: PriceTier,
    #[case] amount: i64,
) {
    let quote = tour_with(fields).price_for(date, returning);
    assert_eq!(
        quote,
        PriceQuote {
            tier,
            returning_university: returning,
            amount,
        }
    );
}

#[rstest]
fn missing_returning_price_uses_regular_of_same_tier(mut fields: TourFields) {
    fields.prices.early_bird_returning = None;
    fields.prices.standard_returning = None;
    let tour = tour_with(fields);

    assert_eq!(tour.price_for(day(2026, 1, 1), true).amount, 8_000);
    assert_eq!(tour.price_for(day(2026, 5, 1), true).amount, 10_000);
}

#[rstest]
fn early_bird_returning_price_stands_without_regular(mut fields: TourFields) {
    fields.prices.early_bird_regular = None;
    let tour = tour_with(fields);

    let returning = tour.price_for(day(2026, 3, 1), true);
    assert_eq!(returning.tier, PriceTier::EarlyBird);
    assert_eq!(returning.amount, 7_000);

    let first_timer = tour.price_for(day(2026, 3, 1), false);
    assert_eq!(first_timer.tier, PriceTier::Standard);
    assert_eq!(first_timer.amount, 10_000);
}

#[rstest]
fn empty_early_bird_tier_falls_back_to_standard(mut fields: TourFields) {
    fields.prices.early_bird_regular = None;
    fields.prices.early_bird_returning = None;
    let quote = tour_with(fields).price_for(day(2026, 1, 1), true);
    assert_eq!(quote.tier, PriceTier::Standard);
    assert_eq!(quote.amount, 9_000);
}

#[rstest]
fn no_early_bird_deadline_means_standard(mut fields: TourFields) {
    fields.early_bird_deadline = None;
    let quote = tour_with(fields).price_for(day(2020, 1, 1), false);
    assert_eq!(quote.tier, PriceTier::Standard);
}

#[rstest]
fn registration_closes_after_standard_deadline(fields: TourFields) {
    let tour = tour_with(fields);
    assert!(tour.registration_open(day(2026, 5, 15)));
    assert!(!tour.registration_open(day(2026, 5, 16)));
}

#[rstest]
fn registration_open_without_deadline(mut fields: TourFields) {
    fields.standard_deadline = None;
    assert!(tour_with(fields).registration_open(day(2099, 1, 1)));
}

#[rstest]
fn tour_serialises_flat_camel_case(fields: TourFields) {
    let value = serde_json::to_value(tour_with(fields)).expect("serialise tour");
    assert_eq!(value["title"], "Sapa Trek");
    assert_eq!(value["prices"]["standardRegular"], 10_000);
    assert_eq!(value["earlyBirdDeadline"], "2026-03-31");
    assert!(value.get("fields").is_none());
}

#[rstest]
fn city_draft_drops_blank_wiki_url() {
    let draft = CityDraft::new(" Hue ", "https://img.example/hue.jpg", Some("  ".to_owned()))
        .expect("valid city");
    assert_eq!(draft.name.as_ref(), "Hue");
    assert!(draft.wiki_url.is_none());
}
