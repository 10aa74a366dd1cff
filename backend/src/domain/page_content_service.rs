//! Page content services implementing the page content driving ports.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    PageContentCommand, PageContentQuery, PageContentRepository, PageContentRepositoryError,
    PatchPageItemRequest, SavedPage,
};
use crate::domain::{Error, PageContent, PageDefault, PageDocument, PageName, PagePatchError};

fn map_repository_error(error: PageContentRepositoryError) -> Error {
    Error::new(error.code(), error.to_string())
}

fn page_not_found(name: &PageName) -> Error {
    Error::not_found(format!("page {name} not found")).with_details(json!({ "pageName": name }))
}

fn map_patch_error(error: &PagePatchError) -> Error {
    let details = match error {
        PagePatchError::SectionMissing { section } => json!({ "section": section }),
        PagePatchError::ItemMissing { section, item_id } => {
            json!({ "section": section, "itemId": item_id })
        }
    };
    Error::not_found(error.to_string()).with_details(details)
}

/// Page content write service.
#[derive(Clone)]
pub struct PageContentCommandService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PageContentCommandService<R> {
    /// Create the service over a repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> PageContentCommandService<R>
where
    R: PageContentRepository,
{
    fn ensure_unique_pages(defaults: &[PageDefault]) -> Result<(), Error> {
        let mut seen = HashSet::with_capacity(defaults.len());
        for default in defaults {
            if !seen.insert(default.page_name.as_str()) {
                return Err(Error::invalid_request(format!(
                    "page {} appears more than once in the defaults",
                    default.page_name
                ))
                .with_details(json!({
                    "field": "pages",
                    "code": "duplicate_page",
                    "value": default.page_name,
                })));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R> PageContentCommand for PageContentCommandService<R>
where
    R: PageContentRepository,
{
    async fn save_page(
        &self,
        name: PageName,
        document: PageDocument,
    ) -> Result<SavedPage, Error> {
        self.repo
            .save_page(&name, &document, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn patch_item(&self, request: PatchPageItemRequest) -> Result<PageContent, Error> {
        let PatchPageItemRequest {
            page_name,
            section,
            item_id,
            item,
        } = request;

        if item.id() != item_id {
            return Err(Error::invalid_request(
                "item id in the body does not match the addressed item",
            )
            .with_details(json!({
                "field": "id",
                "code": "id_mismatch",
                "value": item.id(),
                "expected": item_id,
            })));
        }

        let mut page = self
            .repo
            .find_page(&page_name)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| page_not_found(&page_name))?;
        page.document
            .replace_item(&section, &item_id, item)
            .map_err(|err| map_patch_error(&err))?;

        let saved = self
            .repo
            .save_page(&page_name, &page.document, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        Ok(saved.page)
    }

    async fn reset_all(&self, defaults: Vec<PageDefault>) -> Result<Vec<PageContent>, Error> {
        Self::ensure_unique_pages(&defaults)?;
        self.repo
            .reset_all(&defaults, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn reset_page(&self, default: PageDefault) -> Result<PageContent, Error> {
        self.repo
            .reset_page(&default, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }
}

/// Page content read service.
#[derive(Clone)]
pub struct PageContentQueryService<R> {
    repo: Arc<R>,
}

impl<R> PageContentQueryService<R> {
    /// Create the service over a repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> PageContentQuery for PageContentQueryService<R>
where
    R: PageContentRepository,
{
    async fn list_pages(&self) -> Result<Vec<PageContent>, Error> {
        self.repo.list_pages().await.map_err(map_repository_error)
    }

    async fn get_page(&self, name: PageName) -> Result<PageContent, Error> {
        self.repo
            .find_page(&name)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| page_not_found(&name))
    }
}

#[cfg(test)]
#[path = "page_content_service_tests.rs"]
mod tests;
