//! Driving port for content item and translation mutations.

use async_trait::async_trait;

use crate::domain::{
    BulkTranslationOutcome, ContentItem, ContentItemDraft, ContentItemId, ContentTranslation,
    Error, Language, StaticTranslation, StaticTranslationDraft, TranslationDraft,
};

/// Inbound contract for writing content items and translations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationCommand: Send + Sync {
    async fn upsert_content_item(&self, item: ContentItemDraft) -> Result<ContentItem, Error>;

    /// All-or-nothing batch upsert.
    async fn bulk_upsert_content_items(
        &self,
        items: Vec<ContentItemDraft>,
    ) -> Result<Vec<ContentItem>, Error>;

    /// Delete an item and its translations. `NotFound` when absent.
    async fn delete_content_item(&self, id: ContentItemId) -> Result<(), Error>;

    /// Upsert one translation. `NotFound` when the parent item is missing.
    async fn upsert_translation(
        &self,
        translation: TranslationDraft,
    ) -> Result<ContentTranslation, Error>;

    /// Upsert a batch, skipping entries whose parent item is missing.
    async fn bulk_upsert_translations(
        &self,
        batch: Vec<TranslationDraft>,
    ) -> Result<BulkTranslationOutcome, Error>;

    /// Delete one translation. `NotFound` when absent.
    async fn delete_translation(&self, id: ContentItemId, language: Language)
    -> Result<(), Error>;

    async fn upsert_static_translation(
        &self,
        entry: StaticTranslationDraft,
    ) -> Result<StaticTranslation, Error>;
}

/// Command fixture with no stored items.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTranslationCommand;

#[async_trait]
impl TranslationCommand for FixtureTranslationCommand {
    async fn upsert_content_item(&self, item: ContentItemDraft) -> Result<ContentItem, Error> {
        let now = chrono::DateTime::<chrono::Utc>::UNIX_EPOCH;
        Ok(ContentItem {
            id: item.id,
            kind: item.kind,
            content: item.content,
            metadata: item.metadata,
            page_name: item.page_name,
            section_name: item.section_name,
            created_at: now,
            updated_at: now,
        })
    }

    async fn bulk_upsert_content_items(
        &self,
        items: Vec<ContentItemDraft>,
    ) -> Result<Vec<ContentItem>, Error> {
        let mut stored = Vec::with_capacity(items.len());
        for item in items {
            stored.push(self.upsert_content_item(item).await?);
        }
        Ok(stored)
    }

    async fn delete_content_item(&self, id: ContentItemId) -> Result<(), Error> {
        Err(Error::not_found(format!("content item {id} not found")))
    }

    async fn upsert_translation(
        &self,
        translation: TranslationDraft,
    ) -> Result<ContentTranslation, Error> {
        Err(Error::not_found("Content item does not exist")
            .with_details(serde_json::json!({ "id": translation.content_item_id })))
    }

    async fn bulk_upsert_translations(
        &self,
        batch: Vec<TranslationDraft>,
    ) -> Result<BulkTranslationOutcome, Error> {
        Ok(BulkTranslationOutcome {
            applied: 0,
            skipped: batch.into_iter().map(|entry| entry.content_item_id).collect(),
        })
    }

    async fn delete_translation(
        &self,
        id: ContentItemId,
        language: Language,
    ) -> Result<(), Error> {
        Err(Error::not_found(format!("translation {id}/{language} not found")))
    }

    async fn upsert_static_translation(
        &self,
        entry: StaticTranslationDraft,
    ) -> Result<StaticTranslation, Error> {
        Ok(StaticTranslation {
            key: entry.key,
            en: entry.en,
            vi: entry.vi,
            category: entry.category,
            description: entry.description,
            updated_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        })
    }
}
