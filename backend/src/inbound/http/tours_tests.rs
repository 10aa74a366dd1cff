//! Tests for tour HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockTourCommand, MockTourQuery, TourPriceResponse};
use crate::domain::service_test_support::{fixture_timestamp, sample_tour_draft};
use crate::domain::{EventType, PriceQuote, PriceTier, Tour};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::test_app;

fn sample_tour(id: i32) -> Tour {
    let draft = sample_tour_draft();
    Tour {
        id: TourId::new(id),
        fields: draft.fields().clone(),
        cities: Vec::new(),
        event_types: Vec::new(),
        package_items: Vec::new(),
        additional_images: Vec::new(),
        created_at: fixture_timestamp(),
    }
}

fn tour_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Floating markets",
        "shortDescription": "Boats",
        "imageUrl": "https://img.example/mekong.jpg",
        "prices": {
            "standardRegular": 12000,
            "standardReturning": 11000,
            "earlyBirdRegular": 10000,
            "earlyBirdReturning": null
        },
        "date": "July 2026",
        "location": "Can Tho",
        "duration": "2 days",
        "tourDates": "4-5 July",
        "customize": "",
        "earlyBirdDeadline": "2026-05-01",
        "standardDeadline": null,
        "cityIds": [3, 1, 3],
        "eventTypeIds": [2],
        "additionalImages": [" https://img.example/a.jpg "]
    })
}

fn with_command(command: MockTourCommand) -> HttpStatePorts {
    HttpStatePorts {
        tours: Arc::new(command),
        ..HttpStatePorts::fixtures()
    }
}

fn with_query(query: MockTourQuery) -> HttpStatePorts {
    HttpStatePorts {
        tours_query: Arc::new(query),
        ..HttpStatePorts::fixtures()
    }
}

#[actix_web::test]
async fn list_tours_wraps_the_collection() {
    let app = actix_test::init_service(test_app(HttpStatePorts::fixtures())).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/tours")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "status": "success", "data": [] }));
}

#[actix_web::test]
async fn missing_tour_is_a_fail_envelope() {
    let app = actix_test::init_service(test_app(HttpStatePorts::fixtures())).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/tours/42")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["data"]["code"], "not_found");
}

#[actix_web::test]
async fn create_tour_validates_and_returns_created() {
    let mut command = MockTourCommand::new();
    command
        .expect_create_tour()
        .withf(|draft| {
            draft.city_ids() == [3, 1]
                && draft.event_type_ids() == [2]
                && draft.additional_images() == ["https://img.example/a.jpg"]
        })
        .times(1)
        .returning(|_| Ok(sample_tour(7)));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/tours")
        .set_json(tour_payload("Mekong Delta"))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["id"], 7);
    assert_eq!(body["data"]["title"], "Mekong Delta");
}

#[actix_web::test]
async fn blank_title_is_rejected_before_the_port() {
    let mut command = MockTourCommand::new();
    command.expect_create_tour().never();
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/tours")
        .set_json(tour_payload("   "))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["data"]["details"]["field"], "title");
    assert_eq!(body["data"]["details"]["code"], "empty");
}

#[actix_web::test]
async fn malformed_json_is_a_fail_envelope() {
    let app = actix_test::init_service(test_app(HttpStatePorts::fixtures())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/tours")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"title\":")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "fail");
    assert_eq!(body["data"]["details"]["code"], "invalid_body");
}

#[actix_web::test]
async fn unknown_lookup_on_update_is_a_bad_request() {
    let mut command = MockTourCommand::new();
    command
        .expect_update_tour()
        .withf(|id, _| *id == TourId::new(5))
        .returning(|_, _| Err(Error::invalid_request("tour references an unknown lookup")));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::put()
        .uri("/api/v1/tours/5")
        .set_json(tour_payload("Mekong Delta"))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_tour_returns_a_message() {
    let mut command = MockTourCommand::new();
    command
        .expect_delete_tour()
        .withf(|id| *id == TourId::new(3))
        .returning(|_| Ok(()));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::delete()
        .uri("/api/v1/tours/3")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "status": "success", "message": "Tour deleted successfully" })
    );
}

#[actix_web::test]
async fn price_quote_parses_the_query() {
    let mut query = MockTourQuery::new();
    query
        .expect_quote_price()
        .withf(|id, date, returning| {
            *id == TourId::new(2)
                && *date == NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date")
                && *returning
        })
        .returning(|id, date, returning| {
            Ok(TourPriceResponse {
                tour_id: id,
                registration_date: date,
                quote: PriceQuote {
                    tier: PriceTier::EarlyBird,
                    returning_university: returning,
                    amount: 10_000,
                },
                registration_open: true,
            })
        });
    let app = actix_test::init_service(test_app(with_query(query))).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/tours/2/price?registrationDate=2026-05-01&returningUniversity=true")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"]["tier"], "early_bird");
    assert_eq!(body["data"]["amount"], 10_000);
    assert_eq!(body["data"]["registrationOpen"], true);
}

#[rstest]
#[case("/api/v1/tours/2/price?registrationDate=01-05-2026")]
#[case("/api/v1/tours/2/price")]
#[actix_web::test]
async fn price_quote_requires_an_iso_date(#[case] uri: &str) {
    let mut query = MockTourQuery::new();
    query.expect_quote_price().never();
    let app = actix_test::init_service(test_app(with_query(query))).await;
    let request = actix_test::TestRequest::get().uri(uri).to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["status"], "fail");
}

#[actix_web::test]
async fn create_event_type_returns_created() {
    let mut command = MockTourCommand::new();
    command
        .expect_create_event_type()
        .withf(|name| name.as_str() == "Workshop")
        .returning(|name| {
            Ok(EventType {
                id: 4,
                name: name.to_string(),
            })
        });
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/event-types")
        .set_json(json!({ "name": " Workshop " }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"], json!({ "id": 4, "name": "Workshop" }));
}
