//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    ContentItemDraft, ContentItemId, ContentKind, PageDocument, PageName, PriceTiers, TourDraft,
    TourDraftInput, TourFields,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 24, 10, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn sample_tour_draft() -> TourDraft {
    TourDraft::new(TourDraftInput {
        fields: TourFields {
            title: "Mekong Delta".to_owned(),
            description: "Floating markets".to_owned(),
            short_description: "Boats".to_owned(),
            image_url: "https://img.example/mekong.jpg".to_owned(),
            prices: PriceTiers {
                standard_regular: 12_000,
                standard_returning: Some(11_000),
                early_bird_regular: Some(10_000),
                early_bird_returning: None,
            },
            date: "July 2026".to_owned(),
            location: "Can Tho".to_owned(),
            duration: "2 days".to_owned(),
            tour_dates: "4-5 July".to_owned(),
            customize: String::new(),
            early_bird_deadline: chrono::NaiveDate::from_ymd_opt(2026, 5, 1),
            standard_deadline: chrono::NaiveDate::from_ymd_opt(2026, 6, 20),
        },
        city_ids: vec![1],
        event_type_ids: vec![],
        package_item_ids: vec![],
        additional_images: vec![],
    })
    .expect("valid fixture draft")
}

pub(crate) fn page_name(raw: &str) -> PageName {
    PageName::new(raw).expect("valid page name")
}

pub(crate) fn item_id(raw: &str) -> ContentItemId {
    ContentItemId::new(raw).expect("valid item id")
}

pub(crate) fn sample_document() -> PageDocument {
    PageDocument::from_json(
        r#"{"hero":[{"type":"heading","id":"title","text":"Welcome"},{"type":"paragraph","id":"lead","text":"Travel with us"}]}"#,
    )
    .expect("valid fixture document")
}

pub(crate) fn sample_item_draft(id: &str) -> ContentItemDraft {
    ContentItemDraft::new(
        item_id(id),
        ContentKind::Heading,
        "Welcome",
        None,
        page_name("home"),
        "hero",
    )
    .expect("valid fixture item")
}
