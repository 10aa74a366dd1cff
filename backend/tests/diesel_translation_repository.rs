//! Integration tests for `DieselTranslationRepository` against embedded
//! PostgreSQL.

use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use serde_json::json;
use tokio::runtime::Runtime;
use tourbook::domain::ports::{TranslationRepository, TranslationRepositoryError};
use tourbook::domain::{
    ContentItemDraft, ContentItemId, ContentKind, Language, PageName, StaticTranslationDraft,
    StaticTranslationKey, TranslationDraft,
};
use tourbook::outbound::persistence::{DbPool, DieselTranslationRepository, PoolConfig};

mod support;

use support::{count_rows, handle_cluster_setup_failure, provision_template_database};

struct TestContext {
    runtime: Runtime,
    repository: DieselTranslationRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let temp_db = provision_template_database()?;
    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselTranslationRepository::new(pool),
        database_url,
        _database: temp_db,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, 14, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn item_id(raw: &str) -> ContentItemId {
    ContentItemId::new(raw).expect("valid item id")
}

fn item(id: &str, page: &str) -> ContentItemDraft {
    ContentItemDraft::new(
        item_id(id),
        ContentKind::Button,
        "Book now",
        Some(json!({"href": "/book"})),
        PageName::new(page).expect("valid page name"),
        "hero",
    )
    .expect("valid item")
}

fn translation(id: &str, language: Language, content: &str) -> TranslationDraft {
    TranslationDraft {
        content_item_id: item_id(id),
        language,
        content: content.to_owned(),
        metadata: None,
    }
}

fn seed_items(context: &TestContext, items: &[ContentItemDraft]) {
    context
        .runtime
        .block_on(context.repository.bulk_upsert_content_items(items, now()))
        .expect("items stored");
}

#[rstest]
fn translation_waits_for_its_parent_item(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: translation_waits_for_its_parent_item skipped");
        return;
    };

    let result = context.runtime.block_on(
        context
            .repository
            .upsert_translation(&translation("ghost", Language::Vi, "ma"), now()),
    );

    assert_eq!(
        result,
        Err(TranslationRepositoryError::content_item_missing("ghost"))
    );
    assert_eq!(
        count_rows(&context.database_url, "content_translations"),
        Ok(0)
    );

    let mut parent = item("ghost", "home");
    parent.kind = ContentKind::Paragraph;
    seed_items(&context, &[parent]);
    let retried = context
        .runtime
        .block_on(
            context
                .repository
                .upsert_translation(&translation("ghost", Language::Vi, "ma"), now()),
        )
        .expect("upsert succeeds once the parent exists");
    assert_eq!(retried.content, "ma");
}

#[rstest]
fn bulk_translations_skip_missing_parents(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: bulk_translations_skip_missing_parents skipped");
        return;
    };
    seed_items(&context, &[item("cta", "home")]);

    let outcome = context
        .runtime
        .block_on(context.repository.bulk_upsert_translations(
            &[
                translation("cta", Language::En, "Book now"),
                translation("gone", Language::Vi, "mất"),
                translation("cta", Language::Vi, "Đặt ngay"),
            ],
            now(),
        ))
        .expect("bulk upsert runs");

    assert_eq!(outcome.applied, 2);
    assert_eq!(outcome.skipped, vec![item_id("gone")]);
    assert_eq!(
        count_rows(&context.database_url, "content_translations"),
        Ok(2)
    );
}

#[rstest]
fn bulk_items_roll_back_when_one_row_fails(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: bulk_items_roll_back_when_one_row_fails skipped");
        return;
    };
    seed_items(&context, &[item("cta", "home")]);
    let mut oversized = item("banner", "home");
    oversized.section_name = "s".repeat(65);
    let mut revised = item("cta", "home");
    revised.content = "Reserve".to_owned();

    let result = context.runtime.block_on(
        context
            .repository
            .bulk_upsert_content_items(&[revised, item("form", "contact"), oversized], now()),
    );

    assert!(matches!(
        result,
        Err(TranslationRepositoryError::Query { .. })
    ));
    assert_eq!(count_rows(&context.database_url, "content_items"), Ok(1));
    let kept = context
        .runtime
        .block_on(context.repository.find_content_item(&item_id("cta")))
        .expect("find succeeds")
        .expect("seeded item remains");
    assert_eq!(kept.content, "Book now");
}

#[rstest]
fn translations_are_grouped_by_item_and_page(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: translations_are_grouped_by_item_and_page skipped");
        return;
    };
    seed_items(&context, &[item("cta", "home"), item("form", "contact")]);
    for draft in [
        translation("cta", Language::En, "Book now"),
        translation("cta", Language::Vi, "Đặt ngay"),
        translation("form", Language::Vi, "Gửi"),
    ] {
        context
            .runtime
            .block_on(context.repository.upsert_translation(&draft, now()))
            .expect("translation stored");
    }

    let all = context
        .runtime
        .block_on(context.repository.list_translations())
        .expect("list succeeds");
    let home = context
        .runtime
        .block_on(
            context
                .repository
                .list_page_translations(&PageName::new("home").expect("valid page")),
        )
        .expect("page list succeeds");

    assert_eq!(all.len(), 2);
    assert_eq!(all.get(&item_id("cta")).map(Vec::len), Some(2));
    assert_eq!(home.keys().collect::<Vec<_>>(), vec![&item_id("cta")]);
    let variants = home.get(&item_id("cta")).expect("cta grouped");
    assert!(variants.iter().all(|v| v.kind == ContentKind::Button));
}

#[rstest]
fn deleting_an_item_cascades_to_translations(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: deleting_an_item_cascades_to_translations skipped");
        return;
    };
    seed_items(&context, &[item("cta", "home")]);
    context
        .runtime
        .block_on(
            context
                .repository
                .upsert_translation(&translation("cta", Language::Vi, "Đặt ngay"), now()),
        )
        .expect("translation stored");

    let deleted = context
        .runtime
        .block_on(context.repository.delete_content_item(&item_id("cta")))
        .expect("delete runs");

    assert!(deleted);
    assert_eq!(count_rows(&context.database_url, "content_items"), Ok(0));
    assert_eq!(
        count_rows(&context.database_url, "content_translations"),
        Ok(0)
    );
}

#[rstest]
fn item_upsert_keeps_creation_time_and_metadata(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: item_upsert_keeps_creation_time_and_metadata skipped");
        return;
    };
    seed_items(&context, &[item("cta", "home")]);
    let later = now() + chrono::Duration::hours(3);
    let mut revised = item("cta", "home");
    revised.content = "Reserve".to_owned();

    let stored = context
        .runtime
        .block_on(context.repository.upsert_content_item(&revised, later))
        .expect("upsert succeeds");

    assert_eq!(stored.content, "Reserve");
    assert_eq!(stored.created_at, now());
    assert_eq!(stored.updated_at, later);
    assert_eq!(stored.metadata, Some(json!({"href": "/book"})));
}

#[rstest]
fn static_translations_filter_by_category(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: static_translations_filter_by_category skipped");
        return;
    };
    for (key, category) in [("nav.home", Some("nav")), ("footer.copy", None), ("nav.tours", Some("nav"))] {
        let entry = StaticTranslationDraft::new(
            StaticTranslationKey::new(key).expect("valid key"),
            key,
            key,
            category.map(str::to_owned),
            None,
        )
        .expect("valid entry");
        context
            .runtime
            .block_on(context.repository.upsert_static_translation(&entry, now()))
            .expect("static translation stored");
    }

    let nav = context
        .runtime
        .block_on(
            context
                .repository
                .list_static_translations(Some("nav".to_owned())),
        )
        .expect("filtered list");
    let everything = context
        .runtime
        .block_on(context.repository.list_static_translations(None))
        .expect("full list");

    let nav_keys: Vec<&str> = nav.iter().map(|entry| entry.key.as_str()).collect();
    assert_eq!(nav_keys, vec!["nav.home", "nav.tours"]);
    assert_eq!(everything.len(), 3);
}
