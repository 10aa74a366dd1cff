//! Port for page document storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PageContent, PageDefault, PageDocument, PageName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by page content repository adapters.
    pub enum PageContentRepositoryError {
        /// No connection could be checked out.
        Connection { message: String } => ServiceUnavailable:
            "page content repository connection failed: {message}",
        /// A statement failed.
        Query { message: String } => InternalError:
            "page content repository query failed: {message}",
        /// A stored document could not be decoded.
        InvalidDocument { page: String, message: String } => InternalError:
            "stored document for page {page} is invalid: {message}",
    }
}

/// Outcome of [`PageContentRepository::save_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPage {
    pub page: PageContent,
    /// `true` when the page did not exist before the save.
    pub created: bool,
}

/// Persistence port for page documents.
///
/// `save_page` checks for the page and then updates or inserts it under the
/// store's default isolation. Two concurrent first saves of one page race;
/// the unique page name makes the loser fail with
/// [`PageContentRepositoryError::Query`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageContentRepository: Send + Sync {
    /// Every page, ordered by name.
    async fn list_pages(&self) -> Result<Vec<PageContent>, PageContentRepositoryError>;

    async fn find_page(
        &self,
        name: &PageName,
    ) -> Result<Option<PageContent>, PageContentRepositoryError>;

    /// Insert or replace the document of one page.
    async fn save_page(
        &self,
        name: &PageName,
        document: &PageDocument,
        now: DateTime<Utc>,
    ) -> Result<SavedPage, PageContentRepositoryError>;

    /// Replace every page with `defaults` in one transaction.
    ///
    /// Page names in `defaults` must be unique.
    async fn reset_all(
        &self,
        defaults: &[PageDefault],
        now: DateTime<Utc>,
    ) -> Result<Vec<PageContent>, PageContentRepositoryError>;

    /// Delete one page and insert its default. Not transactional.
    async fn reset_page(
        &self,
        default: &PageDefault,
        now: DateTime<Utc>,
    ) -> Result<PageContent, PageContentRepositoryError>;
}

/// Store without pages; writes are echoed back as freshly created.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePageContentRepository;

#[async_trait]
impl PageContentRepository for FixturePageContentRepository {
    async fn list_pages(&self) -> Result<Vec<PageContent>, PageContentRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_page(
        &self,
        _name: &PageName,
    ) -> Result<Option<PageContent>, PageContentRepositoryError> {
        Ok(None)
    }

    async fn save_page(
        &self,
        name: &PageName,
        document: &PageDocument,
        now: DateTime<Utc>,
    ) -> Result<SavedPage, PageContentRepositoryError> {
        Ok(SavedPage {
            page: PageContent {
                page_name: name.clone(),
                document: document.clone(),
                created_at: now,
                updated_at: now,
            },
            created: true,
        })
    }

    async fn reset_all(
        &self,
        defaults: &[PageDefault],
        now: DateTime<Utc>,
    ) -> Result<Vec<PageContent>, PageContentRepositoryError> {
        Ok(defaults
            .iter()
            .map(|default| PageContent {
                page_name: default.page_name.clone(),
                document: default.document.clone(),
                created_at: now,
                updated_at: now,
            })
            .collect())
    }

    async fn reset_page(
        &self,
        default: &PageDefault,
        now: DateTime<Utc>,
    ) -> Result<PageContent, PageContentRepositoryError> {
        Ok(PageContent {
            page_name: default.page_name.clone(),
            document: default.document.clone(),
            created_at: now,
            updated_at: now,
        })
    }
}
