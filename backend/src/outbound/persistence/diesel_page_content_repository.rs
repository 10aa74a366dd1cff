//! PostgreSQL-backed `PageContentRepository` implementation.
//!
//! Documents are written as serialized JSON text and decoded on read, so the
//! section order chosen by editors survives storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PageContentRepository, PageContentRepositoryError, SavedPage};
use crate::domain::{PageContent, PageDefault, PageDocument, PageName};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPageContentRow, PageContentRow, PageContentUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::page_contents;

/// Diesel-backed implementation of the page content port.
#[derive(Clone)]
pub struct DieselPageContentRepository {
    pool: DbPool,
}

impl DieselPageContentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PageContentRepositoryError {
    map_basic_pool_error(error, PageContentRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> PageContentRepositoryError {
    map_basic_diesel_error(
        error,
        PageContentRepositoryError::query,
        PageContentRepositoryError::connection,
    )
}

fn encode_document(
    name: &PageName,
    document: &PageDocument,
) -> Result<String, PageContentRepositoryError> {
    document.to_json().map_err(|err| {
        PageContentRepositoryError::query(format!("serialise document for page {name}: {err}"))
    })
}

fn row_to_page(row: PageContentRow) -> Result<PageContent, PageContentRepositoryError> {
    let PageContentRow {
        page_name,
        content,
        created_at,
        updated_at,
    } = row;
    let document = PageDocument::from_json(&content).map_err(|err| {
        PageContentRepositoryError::invalid_document(page_name.as_str(), err.to_string())
    })?;
    let page_name = PageName::new(page_name.as_str()).map_err(|err| {
        PageContentRepositoryError::invalid_document(page_name.as_str(), err.to_string())
    })?;
    Ok(PageContent {
        page_name,
        document,
        created_at,
        updated_at,
    })
}

async fn insert_default(
    conn: &mut AsyncPgConnection,
    default: &PageDefault,
    content: &str,
    now: DateTime<Utc>,
) -> Result<(), DieselError> {
    diesel::insert_into(page_contents::table)
        .values(&NewPageContentRow {
            page_name: default.page_name.as_str(),
            content,
            created_at: now,
            updated_at: now,
        })
        .execute(conn)
        .await
        .map(|_| ())
}

fn stored_default(default: &PageDefault, now: DateTime<Utc>) -> PageContent {
    PageContent {
        page_name: default.page_name.clone(),
        document: default.document.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl PageContentRepository for DieselPageContentRepository {
    async fn list_pages(&self) -> Result<Vec<PageContent>, PageContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PageContentRow> = page_contents::table
            .order(page_contents::page_name)
            .select(PageContentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_page).collect()
    }

    async fn find_page(
        &self,
        name: &PageName,
    ) -> Result<Option<PageContent>, PageContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = page_contents::table
            .filter(page_contents::page_name.eq(name.as_str()))
            .select(PageContentRow::as_select())
            .first::<PageContentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_page).transpose()
    }

    async fn save_page(
        &self,
        name: &PageName,
        document: &PageDocument,
        now: DateTime<Utc>,
    ) -> Result<SavedPage, PageContentRepositoryError> {
        let content = encode_document(name, document)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let existing: Option<i32> = page_contents::table
            .filter(page_contents::page_name.eq(name.as_str()))
            .select(page_contents::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let (row, created) = match existing {
            Some(id) => {
                let row = diesel::update(page_contents::table.filter(page_contents::id.eq(id)))
                    .set(&PageContentUpdate {
                        content: &content,
                        updated_at: now,
                    })
                    .returning(PageContentRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                (row, false)
            }
            None => {
                let row = diesel::insert_into(page_contents::table)
                    .values(&NewPageContentRow {
                        page_name: name.as_str(),
                        content: &content,
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(PageContentRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                (row, true)
            }
        };

        Ok(SavedPage {
            page: PageContent {
                page_name: name.clone(),
                document: document.clone(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            created,
        })
    }

    async fn reset_all(
        &self,
        defaults: &[PageDefault],
        now: DateTime<Utc>,
    ) -> Result<Vec<PageContent>, PageContentRepositoryError> {
        let encoded = defaults
            .iter()
            .map(|default| encode_document(&default.page_name, &default.document))
            .collect::<Result<Vec<_>, _>>()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(page_contents::table).execute(conn).await?;
                let rows: Vec<NewPageContentRow<'_>> = defaults
                    .iter()
                    .zip(&encoded)
                    .map(|(default, content)| NewPageContentRow {
                        page_name: default.page_name.as_str(),
                        content,
                        created_at: now,
                        updated_at: now,
                    })
                    .collect();
                if !rows.is_empty() {
                    diesel::insert_into(page_contents::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, DieselError>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?;

        Ok(defaults
            .iter()
            .map(|default| stored_default(default, now))
            .collect())
    }

    async fn reset_page(
        &self,
        default: &PageDefault,
        now: DateTime<Utc>,
    ) -> Result<PageContent, PageContentRepositoryError> {
        let content = encode_document(&default.page_name, &default.document)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            page_contents::table.filter(page_contents::page_name.eq(default.page_name.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        insert_default(&mut conn, default, &content, now)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored_default(default, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(content: &str) -> PageContentRow {
        PageContentRow {
            page_name: "home".to_owned(),
            content: content.to_owned(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    fn stored_text_decodes_in_section_order() {
        let page = row_to_page(row(
            r#"{"footer":[],"hero":[{"type":"paragraph","id":"p","text":"hi"}]}"#,
        ))
        .expect("valid document");
        let names: Vec<&str> = page
            .document
            .sections()
            .iter()
            .map(|section| section.name.as_str())
            .collect();
        assert_eq!(names, ["footer", "hero"]);
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"hero":[{"type":"video","id":"v"}]}"#)]
    fn undecodable_text_is_an_invalid_document(#[case] content: &str) {
        let err = row_to_page(row(content)).expect_err("invalid document");
        assert!(matches!(
            err,
            PageContentRepositoryError::InvalidDocument { ref page, .. } if page == "home"
        ));
    }
}
