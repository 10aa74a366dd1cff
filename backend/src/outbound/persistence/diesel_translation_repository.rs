//! PostgreSQL-backed `TranslationRepository` implementation.
//!
//! Content items upsert on their caller-chosen id. Translations check their
//! parent inside the same transaction as the write; the bulk path skips
//! orphans with a warning while the item bulk path is all-or-nothing.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::upsert::excluded;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use serde_json::Value;
use tracing::warn;

use crate::domain::ports::{TranslationRepository, TranslationRepositoryError};
use crate::domain::{
    BulkTranslationOutcome, ContentItem, ContentItemDraft, ContentItemId, ContentKind,
    ContentTranslation, Language, PageName, StaticTranslation, StaticTranslationDraft,
    StaticTranslationKey, TranslationDraft, TranslationVariant, TranslationsByItem,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{
    ContentItemRow, ContentTranslationRow, ItemPlacementRow, NewContentItemRow,
    NewContentTranslationRow, NewStaticTranslationRow, StaticTranslationRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{content_items, content_translations, static_translations};

/// Diesel-backed implementation of the translation port.
#[derive(Clone)]
pub struct DieselTranslationRepository {
    pool: DbPool,
}

impl DieselTranslationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TranslationRepositoryError {
    map_basic_pool_error(error, TranslationRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> TranslationRepositoryError {
    map_basic_diesel_error(
        error,
        TranslationRepositoryError::query,
        TranslationRepositoryError::connection,
    )
}

/// Failure inside a translation write transaction.
#[derive(Debug)]
enum TxError {
    Diesel(DieselError),
    ItemMissing(ContentItemId),
    Port(TranslationRepositoryError),
}

impl From<DieselError> for TxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl From<TranslationRepositoryError> for TxError {
    fn from(error: TranslationRepositoryError) -> Self {
        Self::Port(error)
    }
}

fn map_tx_error(error: TxError) -> TranslationRepositoryError {
    match error {
        TxError::Diesel(error) => map_diesel_error(error),
        TxError::ItemMissing(id) => TranslationRepositoryError::content_item_missing(id.as_str()),
        TxError::Port(error) => error,
    }
}

// ---------------------------------------------------------------------------
// Row-to-domain converters
// ---------------------------------------------------------------------------

fn decode_error(what: &str, err: impl std::fmt::Display) -> TranslationRepositoryError {
    TranslationRepositoryError::query(format!("decode {what}: {err}"))
}

fn encode_metadata(metadata: Option<&Value>) -> Option<String> {
    metadata.map(Value::to_string)
}

fn decode_metadata(raw: Option<String>) -> Result<Option<Value>, TranslationRepositoryError> {
    raw.map(|text| serde_json::from_str(&text).map_err(|err| decode_error("metadata", err)))
        .transpose()
}

fn row_to_item(row: ContentItemRow) -> Result<ContentItem, TranslationRepositoryError> {
    Ok(ContentItem {
        id: ContentItemId::new(row.id).map_err(|err| decode_error("content item id", err))?,
        kind: ContentKind::from_str(&row.kind).map_err(|err| decode_error("kind", err))?,
        content: row.content,
        metadata: decode_metadata(row.metadata)?,
        page_name: PageName::new(row.page_name).map_err(|err| decode_error("page name", err))?,
        section_name: row.section_name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_translation(
    row: ContentTranslationRow,
) -> Result<ContentTranslation, TranslationRepositoryError> {
    Ok(ContentTranslation {
        content_item_id: ContentItemId::new(row.content_item_id)
            .map_err(|err| decode_error("content item id", err))?,
        language: Language::from_str(&row.language).map_err(|err| decode_error("language", err))?,
        content: row.content,
        metadata: decode_metadata(row.metadata)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_static(row: StaticTranslationRow) -> Result<StaticTranslation, TranslationRepositoryError> {
    Ok(StaticTranslation {
        key: StaticTranslationKey::new(row.key).map_err(|err| decode_error("key", err))?,
        en: row.en,
        vi: row.vi,
        category: row.category,
        description: row.description,
        updated_at: row.updated_at,
    })
}

/// Group joined translation rows by parent item.
fn group_variants(
    rows: Vec<(ContentTranslationRow, ItemPlacementRow)>,
) -> Result<TranslationsByItem, TranslationRepositoryError> {
    let mut grouped = TranslationsByItem::new();
    for (translation, placement) in rows {
        let translation = row_to_translation(translation)?;
        let variant = TranslationVariant {
            language: translation.language,
            content: translation.content,
            metadata: translation.metadata,
            kind: ContentKind::from_str(&placement.kind).map_err(|err| decode_error("kind", err))?,
            page_name: PageName::new(placement.page_name)
                .map_err(|err| decode_error("page name", err))?,
            section_name: placement.section_name,
            updated_at: translation.updated_at,
        };
        grouped
            .entry(translation.content_item_id)
            .or_default()
            .push(variant);
    }
    Ok(grouped)
}

// ---------------------------------------------------------------------------
// Statements shared by single and bulk writes
// ---------------------------------------------------------------------------

async fn upsert_item_row(
    conn: &mut AsyncPgConnection,
    item: &ContentItemDraft,
    now: DateTime<Utc>,
) -> Result<ContentItemRow, DieselError> {
    let new_row = NewContentItemRow {
        id: item.id.as_str(),
        kind: item.kind.as_str(),
        content: &item.content,
        metadata: encode_metadata(item.metadata.as_ref()),
        page_name: item.page_name.as_str(),
        section_name: &item.section_name,
        created_at: now,
        updated_at: now,
    };
    diesel::insert_into(content_items::table)
        .values(&new_row)
        .on_conflict(content_items::id)
        .do_update()
        .set((
            content_items::kind.eq(excluded(content_items::kind)),
            content_items::content.eq(excluded(content_items::content)),
            content_items::metadata.eq(excluded(content_items::metadata)),
            content_items::page_name.eq(excluded(content_items::page_name)),
            content_items::section_name.eq(excluded(content_items::section_name)),
            content_items::updated_at.eq(excluded(content_items::updated_at)),
        ))
        .returning(ContentItemRow::as_returning())
        .get_result(conn)
        .await
}

async fn item_exists(conn: &mut AsyncPgConnection, id: &ContentItemId) -> Result<bool, DieselError> {
    diesel::select(exists(
        content_items::table.filter(content_items::id.eq(id.as_str())),
    ))
    .get_result(conn)
    .await
}

async fn upsert_translation_row(
    conn: &mut AsyncPgConnection,
    translation: &TranslationDraft,
    now: DateTime<Utc>,
) -> Result<ContentTranslationRow, DieselError> {
    let new_row = NewContentTranslationRow {
        content_item_id: translation.content_item_id.as_str(),
        language: translation.language.code(),
        content: &translation.content,
        metadata: encode_metadata(translation.metadata.as_ref()),
        created_at: now,
        updated_at: now,
    };
    diesel::insert_into(content_translations::table)
        .values(&new_row)
        .on_conflict((
            content_translations::content_item_id,
            content_translations::language,
        ))
        .do_update()
        .set((
            content_translations::content.eq(excluded(content_translations::content)),
            content_translations::metadata.eq(excluded(content_translations::metadata)),
            content_translations::updated_at.eq(excluded(content_translations::updated_at)),
        ))
        .returning(ContentTranslationRow::as_returning())
        .get_result(conn)
        .await
}

#[async_trait]
impl TranslationRepository for DieselTranslationRepository {
    async fn upsert_content_item(
        &self,
        item: &ContentItemDraft,
        now: DateTime<Utc>,
    ) -> Result<ContentItem, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = upsert_item_row(&mut conn, item, now)
            .await
            .map_err(map_diesel_error)?;
        row_to_item(row)
    }

    async fn bulk_upsert_content_items(
        &self,
        items: &[ContentItemDraft],
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let mut stored = Vec::with_capacity(items.len());
                for item in items {
                    let row = upsert_item_row(conn, item, now).await?;
                    stored.push(row_to_item(row)?);
                }
                Ok::<_, TxError>(stored)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }

    async fn delete_content_item(
        &self,
        id: &ContentItemId,
    ) -> Result<bool, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(content_items::table.filter(content_items::id.eq(id.as_str())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_content_items(
        &self,
        page: Option<PageName>,
    ) -> Result<Vec<ContentItem>, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = content_items::table
            .select(ContentItemRow::as_select())
            .order((
                content_items::page_name,
                content_items::section_name,
                content_items::id,
            ))
            .into_boxed();
        if let Some(page) = page.as_ref() {
            query = query.filter(content_items::page_name.eq(page.as_str()));
        }
        let rows: Vec<ContentItemRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_item).collect()
    }

    async fn find_content_item(
        &self,
        id: &ContentItemId,
    ) -> Result<Option<ContentItem>, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = content_items::table
            .filter(content_items::id.eq(id.as_str()))
            .select(ContentItemRow::as_select())
            .first::<ContentItemRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_item).transpose()
    }

    async fn upsert_translation(
        &self,
        translation: &TranslationDraft,
        now: DateTime<Utc>,
    ) -> Result<ContentTranslation, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                async move {
                    if !item_exists(conn, &translation.content_item_id).await? {
                        return Err(TxError::ItemMissing(translation.content_item_id.clone()));
                    }
                    Ok(upsert_translation_row(conn, translation, now).await?)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;
        row_to_translation(row)
    }

    async fn bulk_upsert_translations(
        &self,
        batch: &[TranslationDraft],
        now: DateTime<Utc>,
    ) -> Result<BulkTranslationOutcome, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let mut outcome = BulkTranslationOutcome::default();
                for entry in batch {
                    if !item_exists(conn, &entry.content_item_id).await? {
                        warn!(
                            content_item_id = %entry.content_item_id,
                            language = %entry.language,
                            "skipping translation for missing content item"
                        );
                        outcome.skipped.push(entry.content_item_id.clone());
                        continue;
                    }
                    upsert_translation_row(conn, entry, now).await?;
                    outcome.applied += 1;
                }
                Ok::<_, DieselError>(outcome)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_translation(
        &self,
        id: &ContentItemId,
        language: Language,
    ) -> Result<Option<ContentTranslation>, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = content_translations::table
            .filter(content_translations::content_item_id.eq(id.as_str()))
            .filter(content_translations::language.eq(language.code()))
            .select(ContentTranslationRow::as_select())
            .first::<ContentTranslationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_translation).transpose()
    }

    async fn delete_translation(
        &self,
        id: &ContentItemId,
        language: Language,
    ) -> Result<bool, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            content_translations::table
                .filter(content_translations::content_item_id.eq(id.as_str()))
                .filter(content_translations::language.eq(language.code())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_translations(&self) -> Result<TranslationsByItem, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(ContentTranslationRow, ItemPlacementRow)> = content_translations::table
            .inner_join(content_items::table)
            .order((
                content_translations::content_item_id,
                content_translations::language,
            ))
            .select((
                ContentTranslationRow::as_select(),
                ItemPlacementRow::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        group_variants(rows)
    }

    async fn list_page_translations(
        &self,
        page: &PageName,
    ) -> Result<TranslationsByItem, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(ContentTranslationRow, ItemPlacementRow)> = content_translations::table
            .inner_join(content_items::table)
            .filter(content_items::page_name.eq(page.as_str()))
            .order((
                content_translations::content_item_id,
                content_translations::language,
            ))
            .select((
                ContentTranslationRow::as_select(),
                ItemPlacementRow::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        group_variants(rows)
    }

    async fn upsert_static_translation(
        &self,
        entry: &StaticTranslationDraft,
        now: DateTime<Utc>,
    ) -> Result<StaticTranslation, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewStaticTranslationRow {
            key: entry.key.as_str(),
            en: &entry.en,
            vi: &entry.vi,
            category: entry.category.as_deref(),
            description: entry.description.as_deref(),
            updated_at: now,
        };
        let row = diesel::insert_into(static_translations::table)
            .values(&new_row)
            .on_conflict(static_translations::key)
            .do_update()
            .set((
                static_translations::en.eq(excluded(static_translations::en)),
                static_translations::vi.eq(excluded(static_translations::vi)),
                static_translations::category.eq(excluded(static_translations::category)),
                static_translations::description.eq(excluded(static_translations::description)),
                static_translations::updated_at.eq(excluded(static_translations::updated_at)),
            ))
            .returning(StaticTranslationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_static(row)
    }

    async fn list_static_translations(
        &self,
        category: Option<String>,
    ) -> Result<Vec<StaticTranslation>, TranslationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = static_translations::table
            .select(StaticTranslationRow::as_select())
            .order(static_translations::key)
            .into_boxed();
        if let Some(category) = category.as_deref() {
            query = query.filter(static_translations::category.eq(category));
        }
        let rows: Vec<StaticTranslationRow> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_static).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn translation_row(id: &str, language: &str) -> ContentTranslationRow {
        ContentTranslationRow {
            content_item_id: id.to_owned(),
            language: language.to_owned(),
            content: format!("{id}/{language}"),
            metadata: Some(r#"{"tone":"warm"}"#.to_owned()),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn placement(kind: &str) -> ItemPlacementRow {
        ItemPlacementRow {
            kind: kind.to_owned(),
            page_name: "home".to_owned(),
            section_name: "hero".to_owned(),
        }
    }

    #[rstest]
    fn variants_are_grouped_by_parent_item() {
        let grouped = group_variants(vec![
            (translation_row("home.lead", "en"), placement("paragraph")),
            (translation_row("home.lead", "vi"), placement("paragraph")),
            (translation_row("home.title", "vi"), placement("heading")),
        ])
        .expect("rows decode");

        let lead = ContentItemId::new("home.lead").expect("valid id");
        let languages: Vec<Language> = grouped[&lead]
            .iter()
            .map(|variant| variant.language)
            .collect();
        assert_eq!(languages, [Language::En, Language::Vi]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&lead][0].metadata, Some(json!({ "tone": "warm" })));
    }

    #[rstest]
    #[case(translation_row("home.lead", "fr"), placement("paragraph"))]
    #[case(translation_row("home.lead", "en"), placement("carousel"))]
    fn undecodable_rows_are_query_errors(
        #[case] translation: ContentTranslationRow,
        #[case] placement: ItemPlacementRow,
    ) {
        let err = group_variants(vec![(translation, placement)]).expect_err("bad row");
        assert!(matches!(err, TranslationRepositoryError::Query { .. }));
    }

    #[rstest]
    fn metadata_round_trips_through_text() {
        let value = json!({ "href": "/tours" });
        let encoded = encode_metadata(Some(&value));
        assert_eq!(decode_metadata(encoded).expect("decodes"), Some(value));
        assert_eq!(decode_metadata(None).expect("decodes"), None);
    }

    #[rstest]
    fn missing_parent_maps_to_named_error() {
        let id = ContentItemId::new("home.ghost").expect("valid id");
        assert_eq!(
            map_tx_error(TxError::ItemMissing(id)),
            TranslationRepositoryError::content_item_missing("home.ghost")
        );
    }

    #[rstest]
    #[case(TranslationRepositoryError::query("decode kind: carousel"))]
    #[case(TranslationRepositoryError::content_item_missing("home.lead"))]
    #[case(TranslationRepositoryError::connection("pool closed"))]
    fn port_errors_leave_transactions_unchanged(#[case] error: TranslationRepositoryError) {
        assert_eq!(map_tx_error(TxError::from(error.clone())), error);
    }
}
