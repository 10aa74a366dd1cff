//! PostgreSQL-backed `TourRepository` implementation using Diesel ORM.
//!
//! A tour is stored across the `tours` root and four child tables. Reads load
//! the roots with one query and each child table with one `tour_id = ANY(..)`
//! query, then stitch the collections together in memory. Every write runs in
//! a single transaction and re-reads the aggregate before committing.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{TourRepository, TourRepositoryError};
use crate::domain::{
    City, CityDraft, EventType, LookupName, PackageItem, PriceTiers, Tour, TourDraft, TourFields,
    TourId,
};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{
    CityRow, EventTypeRow, NewCityRow, NewTourCityRow, NewTourEventTypeRow, NewTourImageRow,
    NewTourPackageItemRow, NewTourRow, PackageItemRow, TourRow, TourScalarsRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{
    cities, event_types, package_items, tour_additional_images, tour_cities, tour_event_types,
    tour_package_items, tours,
};

/// Diesel-backed implementation of the tour repository port.
#[derive(Clone)]
pub struct DieselTourRepository {
    pool: DbPool,
}

impl DieselTourRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TourRepositoryError {
    map_basic_pool_error(error, TourRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> TourRepositoryError {
    if let Some(ConstraintViolation::ForeignKey { constraint }) = constraint_violation(&error) {
        return TourRepositoryError::unknown_reference(
            constraint.unwrap_or_else(|| "foreign key violation".to_owned()),
        );
    }
    map_basic_diesel_error(
        error,
        TourRepositoryError::query,
        TourRepositoryError::connection,
    )
}

fn map_lookup_error(error: DieselError, name: &LookupName) -> TourRepositoryError {
    match constraint_violation(&error) {
        Some(ConstraintViolation::Unique { .. }) => {
            TourRepositoryError::duplicate_name(name.as_str())
        }
        _ => map_diesel_error(error),
    }
}

/// Failure inside a tour write transaction.
#[derive(Debug)]
enum TxError {
    Diesel(DieselError),
    /// The addressed tour does not exist; the transaction is rolled back.
    Missing,
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_tx_error(error: TxError) -> TourRepositoryError {
    match error {
        TxError::Diesel(error) => map_diesel_error(error),
        TxError::Missing => TourRepositoryError::query("tour vanished inside its own transaction"),
    }
}

fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn scalars(fields: &TourFields) -> TourScalarsRow<'_> {
    let PriceTiers {
        standard_regular,
        standard_returning,
        early_bird_regular,
        early_bird_returning,
    } = fields.prices;
    TourScalarsRow {
        title: &fields.title,
        description: &fields.description,
        short_description: &fields.short_description,
        image_url: &fields.image_url,
        early_bird_regular_price: early_bird_regular,
        early_bird_returning_price: early_bird_returning,
        standard_regular_price: standard_regular,
        standard_returning_price: standard_returning,
        display_date: &fields.date,
        location: &fields.location,
        duration: &fields.duration,
        tour_dates: &fields.tour_dates,
        customize: &fields.customize,
        early_bird_deadline: fields.early_bird_deadline,
        standard_deadline: fields.standard_deadline,
    }
}

fn row_to_city(row: CityRow) -> City {
    City {
        id: row.id,
        name: row.name,
        image_url: row.image_url,
        wiki_url: row.wiki_url,
    }
}

fn row_to_event_type(row: EventTypeRow) -> EventType {
    EventType {
        id: row.id,
        name: row.name,
    }
}

fn row_to_package_item(row: PackageItemRow) -> PackageItem {
    PackageItem {
        id: row.id,
        name: row.name,
    }
}

/// Group `(tour_id, value)` pairs, keeping the load order inside each group.
fn group_by_tour<T>(rows: Vec<(i32, T)>) -> HashMap<i32, Vec<T>> {
    let mut grouped: HashMap<i32, Vec<T>> = HashMap::new();
    for (tour_id, value) in rows {
        grouped.entry(tour_id).or_default().push(value);
    }
    grouped
}

/// Attach child collections to already loaded roots, preserving root order.
async fn assemble_tours(
    conn: &mut AsyncPgConnection,
    roots: Vec<TourRow>,
) -> Result<Vec<Tour>, DieselError> {
    if roots.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = roots.iter().map(|row| row.id).collect();

    let city_rows: Vec<(i32, CityRow)> = tour_cities::table
        .inner_join(cities::table)
        .filter(tour_cities::tour_id.eq_any(&ids))
        .order((tour_cities::tour_id, tour_cities::position))
        .select((tour_cities::tour_id, CityRow::as_select()))
        .load(conn)
        .await?;
    let event_type_rows: Vec<(i32, EventTypeRow)> = tour_event_types::table
        .inner_join(event_types::table)
        .filter(tour_event_types::tour_id.eq_any(&ids))
        .order((tour_event_types::tour_id, tour_event_types::position))
        .select((tour_event_types::tour_id, EventTypeRow::as_select()))
        .load(conn)
        .await?;
    let package_item_rows: Vec<(i32, PackageItemRow)> = tour_package_items::table
        .inner_join(package_items::table)
        .filter(tour_package_items::tour_id.eq_any(&ids))
        .order((tour_package_items::tour_id, tour_package_items::position))
        .select((tour_package_items::tour_id, PackageItemRow::as_select()))
        .load(conn)
        .await?;
    let image_rows: Vec<(i32, String)> = tour_additional_images::table
        .filter(tour_additional_images::tour_id.eq_any(&ids))
        .order((
            tour_additional_images::tour_id,
            tour_additional_images::position,
            tour_additional_images::id,
        ))
        .select((
            tour_additional_images::tour_id,
            tour_additional_images::image_url,
        ))
        .load(conn)
        .await?;

    let mut cities_by_tour = group_by_tour(city_rows);
    let mut event_types_by_tour = group_by_tour(event_type_rows);
    let mut package_items_by_tour = group_by_tour(package_item_rows);
    let mut images_by_tour = group_by_tour(image_rows);

    Ok(roots
        .into_iter()
        .map(|row| {
            let id = row.id;
            Tour {
                id: TourId::new(id),
                cities: cities_by_tour
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(row_to_city)
                    .collect(),
                event_types: event_types_by_tour
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(row_to_event_type)
                    .collect(),
                package_items: package_items_by_tour
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(row_to_package_item)
                    .collect(),
                additional_images: images_by_tour.remove(&id).unwrap_or_default(),
                created_at: row.created_at,
                fields: row_to_fields(row),
            }
        })
        .collect())
}

fn row_to_fields(row: TourRow) -> TourFields {
    TourFields {
        title: row.title,
        description: row.description,
        short_description: row.short_description,
        image_url: row.image_url,
        prices: PriceTiers {
            standard_regular: row.standard_regular_price,
            standard_returning: row.standard_returning_price,
            early_bird_regular: row.early_bird_regular_price,
            early_bird_returning: row.early_bird_returning_price,
        },
        date: row.display_date,
        location: row.location,
        duration: row.duration,
        tour_dates: row.tour_dates,
        customize: row.customize,
        early_bird_deadline: row.early_bird_deadline,
        standard_deadline: row.standard_deadline,
    }
}

async fn load_all(conn: &mut AsyncPgConnection) -> Result<Vec<Tour>, DieselError> {
    let roots: Vec<TourRow> = tours::table
        .order((tours::created_at.desc(), tours::id.desc()))
        .select(TourRow::as_select())
        .load(conn)
        .await?;
    assemble_tours(conn, roots).await
}

async fn load_one(conn: &mut AsyncPgConnection, id: i32) -> Result<Option<Tour>, DieselError> {
    let root: Option<TourRow> = tours::table
        .filter(tours::id.eq(id))
        .select(TourRow::as_select())
        .first(conn)
        .await
        .optional()?;
    let Some(root) = root else {
        return Ok(None);
    };
    Ok(assemble_tours(conn, vec![root]).await?.pop())
}

/// Insert the four child collections of a tour from a draft.
async fn insert_children(
    conn: &mut AsyncPgConnection,
    tour_id: i32,
    draft: &TourDraft,
) -> Result<(), DieselError> {
    let city_rows: Vec<NewTourCityRow> = draft
        .city_ids()
        .iter()
        .enumerate()
        .map(|(index, &city_id)| NewTourCityRow {
            tour_id,
            city_id,
            position: position(index),
        })
        .collect();
    if !city_rows.is_empty() {
        diesel::insert_into(tour_cities::table)
            .values(&city_rows)
            .execute(conn)
            .await?;
    }

    let event_type_rows: Vec<NewTourEventTypeRow> = draft
        .event_type_ids()
        .iter()
        .enumerate()
        .map(|(index, &event_type_id)| NewTourEventTypeRow {
            tour_id,
            event_type_id,
            position: position(index),
        })
        .collect();
    if !event_type_rows.is_empty() {
        diesel::insert_into(tour_event_types::table)
            .values(&event_type_rows)
            .execute(conn)
            .await?;
    }

    let package_item_rows: Vec<NewTourPackageItemRow> = draft
        .package_item_ids()
        .iter()
        .enumerate()
        .map(|(index, &package_item_id)| NewTourPackageItemRow {
            tour_id,
            package_item_id,
            position: position(index),
        })
        .collect();
    if !package_item_rows.is_empty() {
        diesel::insert_into(tour_package_items::table)
            .values(&package_item_rows)
            .execute(conn)
            .await?;
    }

    let image_rows: Vec<NewTourImageRow<'_>> = draft
        .additional_images()
        .iter()
        .enumerate()
        .map(|(index, image_url)| NewTourImageRow {
            tour_id,
            image_url,
            position: position(index),
        })
        .collect();
    if !image_rows.is_empty() {
        diesel::insert_into(tour_additional_images::table)
            .values(&image_rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

async fn delete_children(conn: &mut AsyncPgConnection, tour_id: i32) -> Result<(), DieselError> {
    diesel::delete(tour_cities::table.filter(tour_cities::tour_id.eq(tour_id)))
        .execute(conn)
        .await?;
    diesel::delete(tour_event_types::table.filter(tour_event_types::tour_id.eq(tour_id)))
        .execute(conn)
        .await?;
    diesel::delete(tour_package_items::table.filter(tour_package_items::tour_id.eq(tour_id)))
        .execute(conn)
        .await?;
    diesel::delete(
        tour_additional_images::table.filter(tour_additional_images::tour_id.eq(tour_id)),
    )
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl TourRepository for DieselTourRepository {
    async fn list_tours(&self) -> Result<Vec<Tour>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // One read transaction so roots and children come from one snapshot.
        conn.build_transaction()
            .read_only()
            .run(|conn| async move { load_all(conn).await }.scope_boxed())
            .await
            .map_err(map_diesel_error)
    }

    async fn find_tour(&self, id: TourId) -> Result<Option<Tour>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.build_transaction()
            .read_only()
            .run(|conn| async move { load_one(conn, id.get()).await }.scope_boxed())
            .await
            .map_err(map_diesel_error)
    }

    async fn create_tour(
        &self,
        draft: &TourDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Tour, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let new_row = NewTourRow {
                    scalars: scalars(draft.fields()),
                    created_at,
                };
                let tour_id: i32 = diesel::insert_into(tours::table)
                    .values(&new_row)
                    .returning(tours::id)
                    .get_result(conn)
                    .await?;
                insert_children(conn, tour_id, draft).await?;
                load_one(conn, tour_id).await?.ok_or(TxError::Missing)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn update_tour(
        &self,
        id: TourId,
        draft: &TourDraft,
    ) -> Result<Option<Tour>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let updated = diesel::update(tours::table.filter(tours::id.eq(id.get())))
                        .set(&scalars(draft.fields()))
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Err(TxError::Missing);
                    }
                    delete_children(conn, id.get()).await?;
                    insert_children(conn, id.get(), draft).await?;
                    load_one(conn, id.get()).await?.ok_or(TxError::Missing)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(tour) => Ok(Some(tour)),
            Err(TxError::Missing) => Ok(None),
            Err(error) => Err(map_tx_error(error)),
        }
    }

    async fn delete_tour(&self, id: TourId) -> Result<bool, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                delete_children(conn, id.get()).await?;
                let deleted = diesel::delete(tours::table.filter(tours::id.eq(id.get())))
                    .execute(conn)
                    .await?;
                Ok::<_, DieselError>(deleted > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_cities(&self) -> Result<Vec<City>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CityRow> = cities::table
            .order((cities::name, cities::id))
            .select(CityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_city).collect())
    }

    async fn create_city(&self, city: &CityDraft) -> Result<City, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCityRow {
            name: city.name.as_str(),
            image_url: &city.image_url,
            wiki_url: city.wiki_url.as_deref(),
        };
        diesel::insert_into(cities::table)
            .values(&new_row)
            .returning(CityRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_city)
            .map_err(|err| map_lookup_error(err, &city.name))
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventTypeRow> = event_types::table
            .order((event_types::name, event_types::id))
            .select(EventTypeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_event_type).collect())
    }

    async fn create_event_type(&self, name: &LookupName) -> Result<EventType, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(event_types::table)
            .values(event_types::name.eq(name.as_str()))
            .returning(EventTypeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_event_type)
            .map_err(|err| map_lookup_error(err, name))
    }

    async fn list_package_items(&self) -> Result<Vec<PackageItem>, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PackageItemRow> = package_items::table
            .order((package_items::name, package_items::id))
            .select(PackageItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_package_item).collect())
    }

    async fn create_package_item(
        &self,
        name: &LookupName,
    ) -> Result<PackageItem, TourRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(package_items::table)
            .values(package_items::name.eq(name.as_str()))
            .returning(PackageItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(row_to_package_item)
            .map_err(|err| map_lookup_error(err, name))
    }
}
