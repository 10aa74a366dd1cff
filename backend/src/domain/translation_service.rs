//! Content item and translation services implementing the translation
//! driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    TranslationCommand, TranslationQuery, TranslationRepository, TranslationRepositoryError,
};
use crate::domain::{
    BulkTranslationOutcome, ContentItem, ContentItemDraft, ContentItemId, ContentTranslation,
    Error, Language, PageName, StaticTranslation, StaticTranslationDraft, TranslationDraft,
    TranslationsByItem,
};

fn map_repository_error(error: TranslationRepositoryError) -> Error {
    match error {
        TranslationRepositoryError::ContentItemMissing { id } => {
            Error::not_found("Content item does not exist").with_details(json!({ "id": id }))
        }
        other => Error::new(other.code(), other.to_string()),
    }
}

fn item_not_found(id: &ContentItemId) -> Error {
    Error::not_found(format!("content item {id} not found")).with_details(json!({ "id": id }))
}

fn translation_not_found(id: &ContentItemId, language: Language) -> Error {
    Error::not_found(format!("translation {id}/{language} not found"))
        .with_details(json!({ "id": id, "language": language }))
}

/// Translation write service.
#[derive(Clone)]
pub struct TranslationCommandService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TranslationCommandService<R> {
    /// Create the service over a repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> TranslationCommand for TranslationCommandService<R>
where
    R: TranslationRepository,
{
    async fn upsert_content_item(&self, item: ContentItemDraft) -> Result<ContentItem, Error> {
        self.repo
            .upsert_content_item(&item, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn bulk_upsert_content_items(
        &self,
        items: Vec<ContentItemDraft>,
    ) -> Result<Vec<ContentItem>, Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        self.repo
            .bulk_upsert_content_items(&items, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn delete_content_item(&self, id: ContentItemId) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete_content_item(&id)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(item_not_found(&id))
        }
    }

    async fn upsert_translation(
        &self,
        translation: TranslationDraft,
    ) -> Result<ContentTranslation, Error> {
        self.repo
            .upsert_translation(&translation, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn bulk_upsert_translations(
        &self,
        batch: Vec<TranslationDraft>,
    ) -> Result<BulkTranslationOutcome, Error> {
        if batch.is_empty() {
            return Ok(BulkTranslationOutcome::default());
        }
        self.repo
            .bulk_upsert_translations(&batch, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }

    async fn delete_translation(
        &self,
        id: ContentItemId,
        language: Language,
    ) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete_translation(&id, language)
            .await
            .map_err(map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(translation_not_found(&id, language))
        }
    }

    async fn upsert_static_translation(
        &self,
        entry: StaticTranslationDraft,
    ) -> Result<StaticTranslation, Error> {
        self.repo
            .upsert_static_translation(&entry, self.clock.utc())
            .await
            .map_err(map_repository_error)
    }
}

/// Translation read service.
#[derive(Clone)]
pub struct TranslationQueryService<R> {
    repo: Arc<R>,
}

impl<R> TranslationQueryService<R> {
    /// Create the service over a repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> TranslationQuery for TranslationQueryService<R>
where
    R: TranslationRepository,
{
    async fn list_content_items(&self, page: Option<PageName>) -> Result<Vec<ContentItem>, Error> {
        self.repo
            .list_content_items(page)
            .await
            .map_err(map_repository_error)
    }

    async fn get_content_item(&self, id: ContentItemId) -> Result<ContentItem, Error> {
        self.repo
            .find_content_item(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| item_not_found(&id))
    }

    async fn get_translation(
        &self,
        id: ContentItemId,
        language: Language,
    ) -> Result<ContentTranslation, Error> {
        self.repo
            .find_translation(&id, language)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| translation_not_found(&id, language))
    }

    async fn list_translations(&self) -> Result<TranslationsByItem, Error> {
        self.repo
            .list_translations()
            .await
            .map_err(map_repository_error)
    }

    async fn list_page_translations(&self, page: PageName) -> Result<TranslationsByItem, Error> {
        self.repo
            .list_page_translations(&page)
            .await
            .map_err(map_repository_error)
    }

    async fn list_static_translations(
        &self,
        category: Option<String>,
    ) -> Result<Vec<StaticTranslation>, Error> {
        self.repo
            .list_static_translations(category)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "translation_service_tests.rs"]
mod tests;
