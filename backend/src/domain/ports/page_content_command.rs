//! Driving port for page content mutations.

use async_trait::async_trait;

use crate::domain::{Error, PageContent, PageDefault, PageDocument, PageItem, PageName};

use super::SavedPage;

/// Replace one item inside a page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchPageItemRequest {
    pub page_name: PageName,
    pub section: String,
    pub item_id: String,
    /// New item; its id must equal `item_id`.
    pub item: PageItem,
}

/// Inbound contract for writing page documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageContentCommand: Send + Sync {
    /// Create or fully replace a page document.
    async fn save_page(&self, name: PageName, document: PageDocument)
    -> Result<SavedPage, Error>;

    /// Replace a single item and save the page.
    ///
    /// # Errors
    /// `NotFound` when the page, section or item is absent; `InvalidRequest`
    /// when the replacement carries a different id.
    async fn patch_item(&self, request: PatchPageItemRequest) -> Result<PageContent, Error>;

    /// Replace every page with the supplied defaults.
    ///
    /// # Errors
    /// `InvalidRequest` when two defaults share a page name.
    async fn reset_all(&self, defaults: Vec<PageDefault>) -> Result<Vec<PageContent>, Error>;

    /// Replace one page with its default.
    async fn reset_page(&self, default: PageDefault) -> Result<PageContent, Error>;
}

/// Command fixture that echoes documents back as newly created pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePageContentCommand;

fn fixture_page(page_name: PageName, document: PageDocument) -> PageContent {
    PageContent {
        page_name,
        document,
        created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        updated_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
    }
}

#[async_trait]
impl PageContentCommand for FixturePageContentCommand {
    async fn save_page(
        &self,
        name: PageName,
        document: PageDocument,
    ) -> Result<SavedPage, Error> {
        Ok(SavedPage {
            page: fixture_page(name, document),
            created: true,
        })
    }

    async fn patch_item(&self, request: PatchPageItemRequest) -> Result<PageContent, Error> {
        Err(Error::not_found(format!(
            "page {} not found",
            request.page_name
        )))
    }

    async fn reset_all(&self, defaults: Vec<PageDefault>) -> Result<Vec<PageContent>, Error> {
        Ok(defaults
            .into_iter()
            .map(|default| fixture_page(default.page_name, default.document))
            .collect())
    }

    async fn reset_page(&self, default: PageDefault) -> Result<PageContent, Error> {
        Ok(fixture_page(default.page_name, default.document))
    }
}
