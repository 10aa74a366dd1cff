//! Tests for page content HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use crate::domain::ports::{MockPageContentCommand, SavedPage};
use crate::domain::service_test_support::{fixture_timestamp, page_name, sample_document};
use crate::domain::{PageContent, PageItem};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::test_app;

fn with_command(command: MockPageContentCommand) -> HttpStatePorts {
    HttpStatePorts {
        pages: Arc::new(command),
        ..HttpStatePorts::fixtures()
    }
}

fn stored(name: &str) -> PageContent {
    PageContent {
        page_name: page_name(name),
        document: sample_document(),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

#[actix_web::test]
async fn first_save_answers_created_and_keeps_section_order() {
    let app = actix_test::init_service(test_app(HttpStatePorts::fixtures())).await;
    let request = actix_test::TestRequest::put()
        .uri("/api/v1/contents/about")
        .insert_header(("content-type", "application/json"))
        .set_payload(
            r#"{"content":{"team":[{"type":"paragraph","id":"intro","text":"Hi"}],"hero":[{"type":"heading","id":"title","text":"About","level":1}]}}"#,
        )
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = actix_test::read_body(response).await;
    let text = std::str::from_utf8(&body).expect("utf8 body");
    let team = text.find("\"team\"").expect("team section");
    let hero = text.find("\"hero\"").expect("hero section");
    assert!(team < hero, "sections keep request order: {text}");
}

#[actix_web::test]
async fn resave_answers_ok() {
    let mut command = MockPageContentCommand::new();
    command
        .expect_save_page()
        .withf(|name, _| name.as_str() == "home")
        .returning(|_, _| {
            Ok(SavedPage {
                page: stored("home"),
                created: false,
            })
        });
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::put()
        .uri("/api/v1/contents/home")
        .set_json(json!({ "content": { "hero": [] } }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Page updated");
    assert_eq!(body["data"]["pageName"], "home");
}

#[actix_web::test]
async fn invalid_page_names_are_rejected() {
    let mut command = MockPageContentCommand::new();
    command.expect_save_page().never();
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::put()
        .uri("/api/v1/contents/home%20page")
        .set_json(json!({ "content": {} }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"]["details"]["field"], "pageName");
}

#[actix_web::test]
async fn unknown_item_types_are_rejected() {
    let app = actix_test::init_service(test_app(HttpStatePorts::fixtures())).await;
    let request = actix_test::TestRequest::put()
        .uri("/api/v1/contents/home")
        .set_json(json!({ "content": { "hero": [{ "type": "video", "id": "v" }] } }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_page_is_not_found() {
    let app = actix_test::init_service(test_app(HttpStatePorts::fixtures())).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/contents/pricing")
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn patch_addresses_section_and_item() {
    let mut command = MockPageContentCommand::new();
    command
        .expect_patch_item()
        .withf(|request| {
            request.page_name.as_str() == "home"
                && request.section == "hero"
                && request.item_id == "title"
                && matches!(&request.item, PageItem::Heading { text, .. } if text == "Xin chào")
        })
        .times(1)
        .returning(|_| Ok(stored("home")));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::patch()
        .uri("/api/v1/contents/home/sections/hero/items/title")
        .set_json(json!({ "type": "heading", "id": "title", "text": "Xin chào" }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn reset_all_passes_every_default() {
    let mut command = MockPageContentCommand::new();
    command
        .expect_reset_all()
        .withf(|defaults| {
            defaults
                .iter()
                .map(|default| default.page_name.as_str())
                .eq(["home", "about"])
        })
        .returning(|defaults| {
            Ok(defaults
                .into_iter()
                .map(|default| stored(default.page_name.as_str()))
                .collect())
        });
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/contents/reset")
        .set_json(json!({
            "pages": [
                { "pageName": "home", "document": { "hero": [] } },
                { "pageName": "about", "document": {} }
            ]
        }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn reset_page_uses_the_path_name() {
    let mut command = MockPageContentCommand::new();
    command
        .expect_reset_page()
        .withf(|default| default.page_name.as_str() == "about")
        .returning(|default| Ok(stored(default.page_name.as_str())));
    let app = actix_test::init_service(test_app(with_command(command))).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/contents/about/reset")
        .set_json(json!({ "content": { "hero": [] } }))
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Page reset");
}
