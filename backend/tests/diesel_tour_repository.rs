//! Integration tests for `DieselTourRepository` against embedded PostgreSQL.
//!
//! Covers the aggregate write paths across the five tour tables: atomic
//! creation with rollback, full-replacement updates, cascading deletes and
//! newest-first listing.

use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use tourbook::domain::ports::{TourRepository, TourRepositoryError};
use tourbook::domain::{
    CityDraft, LookupName, PriceTiers, TourDraft, TourDraftInput, TourFields, TourId,
};
use tourbook::outbound::persistence::{DbPool, DieselTourRepository, PoolConfig};

mod support;

use support::{count_rows, handle_cluster_setup_failure, provision_template_database};

struct TestContext {
    runtime: Runtime,
    repository: DieselTourRepository,
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
        repository: DieselTourRepository::new(pool),
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

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn draft(title: &str, city_ids: Vec<i32>, images: Vec<&str>) -> TourDraft {
    TourDraft::new(TourDraftInput {
        fields: TourFields {
            title: title.to_owned(),
            description: "Limestone karsts".to_owned(),
            short_description: "Cruise".to_owned(),
            image_url: "https://img.example/halong.jpg".to_owned(),
            prices: PriceTiers {
                standard_regular: 20_000,
                standard_returning: Some(18_000),
                early_bird_regular: Some(16_000),
                early_bird_returning: Some(15_000),
            },
            date: "August 2026".to_owned(),
            location: "Ha Long".to_owned(),
            duration: "3 days".to_owned(),
            tour_dates: "1-3 August".to_owned(),
            customize: String::new(),
            early_bird_deadline: chrono::NaiveDate::from_ymd_opt(2026, 6, 1),
            standard_deadline: chrono::NaiveDate::from_ymd_opt(2026, 7, 15),
        },
        city_ids,
        event_type_ids: Vec::new(),
        package_item_ids: Vec::new(),
        additional_images: images.into_iter().map(str::to_owned).collect(),
    })
    .expect("valid tour draft")
}

fn seed_cities(context: &TestContext, names: &[&str]) -> Vec<i32> {
    names
        .iter()
        .map(|name| {
            let city = CityDraft::new(*name, "", None).expect("valid city");
            context
                .runtime
                .block_on(context.repository.create_city(&city))
                .expect("city inserted")
                .id
        })
        .collect()
}

#[rstest]
fn create_keeps_collection_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: create_keeps_collection_order skipped");
        return;
    };
    let ids = seed_cities(&context, &["Hanoi", "Hue", "Da Nang"]);
    let ordered = vec![ids[2], ids[0], ids[1]];

    let created = context
        .runtime
        .block_on(context.repository.create_tour(
            &draft("Ha Long Bay", ordered.clone(), vec!["https://img.example/b.jpg", "https://img.example/a.jpg"]),
            at(9),
        ))
        .expect("tour created");

    let city_ids: Vec<i32> = created.cities.iter().map(|city| city.id).collect();
    assert_eq!(city_ids, ordered);
    assert_eq!(
        created.additional_images,
        vec!["https://img.example/b.jpg", "https://img.example/a.jpg"]
    );

    let reloaded = context
        .runtime
        .block_on(context.repository.find_tour(created.id))
        .expect("find succeeds")
        .expect("tour exists");
    assert_eq!(reloaded, created);
}

#[rstest]
fn unknown_city_rolls_back_the_whole_tour(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: unknown_city_rolls_back_the_whole_tour skipped");
        return;
    };

    let ids = seed_cities(&context, &["Hanoi", "Hue"]);

    let result = context.runtime.block_on(context.repository.create_tour(
        &draft(
            "Phantom",
            vec![ids[0], ids[1], 9_999],
            vec!["https://img.example/x.jpg"],
        ),
        at(9),
    ));

    assert!(matches!(
        result,
        Err(TourRepositoryError::UnknownReference { .. })
    ));
    assert_eq!(count_rows(&context.database_url, "tours"), Ok(0));
    assert_eq!(count_rows(&context.database_url, "tour_cities"), Ok(0));
    assert_eq!(
        count_rows(&context.database_url, "tour_additional_images"),
        Ok(0)
    );
}

#[rstest]
fn update_replaces_every_collection(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_every_collection skipped");
        return;
    };
    let ids = seed_cities(&context, &["Hanoi", "Hue"]);
    let created = context
        .runtime
        .block_on(context.repository.create_tour(
            &draft("Ha Long Bay", vec![ids[0], ids[1]], vec!["https://img.example/a.jpg"]),
            at(9),
        ))
        .expect("tour created");

    let replacement = draft("Ha Long Bay by night", vec![ids[1]], vec![]);
    for _ in 0..2 {
        context
            .runtime
            .block_on(context.repository.update_tour(created.id, &replacement))
            .expect("update succeeds")
            .expect("tour exists");
    }
    let updated = context
        .runtime
        .block_on(context.repository.find_tour(created.id))
        .expect("find succeeds")
        .expect("tour exists");

    assert_eq!(updated.fields.title, "Ha Long Bay by night");
    assert_eq!(updated.created_at, created.created_at);
    let city_ids: Vec<i32> = updated.cities.iter().map(|city| city.id).collect();
    assert_eq!(city_ids, vec![ids[1]]);
    assert!(updated.additional_images.is_empty());
    assert_eq!(count_rows(&context.database_url, "tour_cities"), Ok(1));
}

#[rstest]
fn update_of_missing_tour_writes_nothing(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_of_missing_tour_writes_nothing skipped");
        return;
    };

    let result = context
        .runtime
        .block_on(
            context
                .repository
                .update_tour(TourId::new(4_242), &draft("Ghost", vec![], vec!["https://img.example/g.jpg"])),
        )
        .expect("update runs");

    assert!(result.is_none());
    assert_eq!(
        count_rows(&context.database_url, "tour_additional_images"),
        Ok(0)
    );
}

#[rstest]
fn delete_cascades_to_child_rows(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_cascades_to_child_rows skipped");
        return;
    };
    let ids = seed_cities(&context, &["Hoi An"]);
    let created = context
        .runtime
        .block_on(context.repository.create_tour(
            &draft("Lantern night", vec![ids[0]], vec!["https://img.example/l.jpg"]),
            at(9),
        ))
        .expect("tour created");
    let sibling = context
        .runtime
        .block_on(
            context
                .repository
                .create_tour(&draft("Old town walk", vec![ids[0]], vec![]), at(10)),
        )
        .expect("sibling created");

    let deleted = context
        .runtime
        .block_on(context.repository.delete_tour(created.id))
        .expect("delete runs");
    let deleted_again = context
        .runtime
        .block_on(context.repository.delete_tour(created.id))
        .expect("delete runs");

    assert!(deleted);
    assert!(!deleted_again);
    assert_eq!(count_rows(&context.database_url, "tour_cities"), Ok(1));
    assert_eq!(
        count_rows(&context.database_url, "tour_additional_images"),
        Ok(0)
    );
    assert_eq!(count_rows(&context.database_url, "cities"), Ok(1));
    let survivor = context
        .runtime
        .block_on(context.repository.find_tour(sibling.id))
        .expect("find succeeds")
        .expect("sibling remains");
    assert_eq!(survivor.cities.len(), 1);
}

#[rstest]
fn list_is_newest_first(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: list_is_newest_first skipped");
        return;
    };
    for (title, hour) in [("Early", 8), ("Late", 12), ("Middle", 10)] {
        context
            .runtime
            .block_on(context.repository.create_tour(&draft(title, vec![], vec![]), at(hour)))
            .expect("tour created");
    }

    let titles: Vec<String> = context
        .runtime
        .block_on(context.repository.list_tours())
        .expect("list succeeds")
        .into_iter()
        .map(|tour| tour.fields.title)
        .collect();

    assert_eq!(titles, vec!["Late", "Middle", "Early"]);
}

#[rstest]
fn duplicate_lookup_names_are_reported(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_lookup_names_are_reported skipped");
        return;
    };
    let name = LookupName::new("Workshop").expect("valid name");
    context
        .runtime
        .block_on(context.repository.create_event_type(&name))
        .expect("first insert");

    let result = context
        .runtime
        .block_on(context.repository.create_event_type(&name));

    assert_eq!(result, Err(TourRepositoryError::duplicate_name("Workshop")));
}
