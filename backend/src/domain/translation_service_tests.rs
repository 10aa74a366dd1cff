//! Tests for the translation services.

use std::sync::Arc;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockTranslationRepository;
use crate::domain::service_test_support::{
    fixture_clock, fixture_timestamp, item_id, page_name, sample_item_draft,
};

fn command(repo: MockTranslationRepository) -> TranslationCommandService<MockTranslationRepository> {
    TranslationCommandService::new(Arc::new(repo), fixture_clock())
}

fn query(repo: MockTranslationRepository) -> TranslationQueryService<MockTranslationRepository> {
    TranslationQueryService::new(Arc::new(repo))
}

fn vi_draft(id: &str) -> TranslationDraft {
    TranslationDraft {
        content_item_id: item_id(id),
        language: Language::Vi,
        content: "Xin chào".to_owned(),
        metadata: None,
    }
}

#[tokio::test]
async fn missing_parent_item_is_not_found_with_fixed_message() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_upsert_translation()
        .times(1)
        .return_once(|draft, _| {
            Err(TranslationRepositoryError::content_item_missing(
                draft.content_item_id.as_str(),
            ))
        });

    let err = command(repo)
        .upsert_translation(vi_draft("home.ghost"))
        .await
        .expect_err("missing parent");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Content item does not exist");
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "id": "home.ghost" }))
    );
}

#[tokio::test]
async fn upsert_translation_uses_clock() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_upsert_translation()
        .withf(|_, now| *now == fixture_timestamp())
        .times(1)
        .return_once(|draft, now| {
            Ok(ContentTranslation {
                content_item_id: draft.content_item_id.clone(),
                language: draft.language,
                content: draft.content.clone(),
                metadata: None,
                created_at: now,
                updated_at: now,
            })
        });

    let stored = command(repo)
        .upsert_translation(vi_draft("home.title"))
        .await
        .expect("upsert succeeds");
    assert_eq!(stored.language, Language::Vi);
}

#[tokio::test]
async fn empty_batches_skip_the_repository() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_bulk_upsert_translations().never();
    repo.expect_bulk_upsert_content_items().never();
    let service = command(repo);

    let outcome = service
        .bulk_upsert_translations(Vec::new())
        .await
        .expect("empty batch");
    assert_eq!(outcome, BulkTranslationOutcome::default());
    let items = service
        .bulk_upsert_content_items(Vec::new())
        .await
        .expect("empty batch");
    assert!(items.is_empty());
}

#[tokio::test]
async fn bulk_translation_outcome_is_passed_through() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_bulk_upsert_translations()
        .times(1)
        .return_once(|_, _| {
            Ok(BulkTranslationOutcome {
                applied: 1,
                skipped: vec![item_id("home.ghost")],
            })
        });

    let outcome = command(repo)
        .bulk_upsert_translations(vec![vi_draft("home.title"), vi_draft("home.ghost")])
        .await
        .expect("bulk succeeds");
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.skipped, vec![item_id("home.ghost")]);
}

#[tokio::test]
async fn bulk_item_failure_surfaces_as_internal() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_bulk_upsert_content_items()
        .times(1)
        .return_once(|_, _| Err(TranslationRepositoryError::query("value too long")));

    let err = command(repo)
        .bulk_upsert_content_items(vec![sample_item_draft("a"), sample_item_draft("b")])
        .await
        .expect_err("batch fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn delete_missing_translation_is_not_found() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_delete_translation()
        .times(1)
        .return_once(|_, _| Ok(false));

    let err = command(repo)
        .delete_translation(item_id("home.title"), Language::En)
        .await
        .expect_err("missing translation");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_missing_item_is_not_found() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_delete_content_item()
        .times(1)
        .return_once(|_| Ok(false));

    let err = command(repo)
        .delete_content_item(item_id("home.title"))
        .await
        .expect_err("missing item");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn connection_failures_are_service_unavailable() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_list_translations()
        .times(1)
        .return_once(|| Err(TranslationRepositoryError::connection("timed out")));

    let err = query(repo).list_translations().await.expect_err("down");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn page_filter_reaches_repository() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_list_content_items()
        .withf(|page| page.as_ref().map(PageName::as_str) == Some("home"))
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let items = query(repo)
        .list_content_items(Some(page_name("home")))
        .await
        .expect("list succeeds");
    assert!(items.is_empty());
}

#[tokio::test]
async fn get_missing_translation_is_not_found() {
    let mut repo = MockTranslationRepository::new();
    repo.expect_find_translation()
        .times(1)
        .return_once(|_, _| Ok(None));

    let err = query(repo)
        .get_translation(item_id("home.title"), Language::Vi)
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
