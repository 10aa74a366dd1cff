//! Port for content items, their per-language translations and static UI
//! strings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    BulkTranslationOutcome, ContentItem, ContentItemDraft, ContentItemId, ContentTranslation,
    Language, PageName, StaticTranslation, StaticTranslationDraft, TranslationDraft,
    TranslationsByItem,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by translation repository adapters.
    pub enum TranslationRepositoryError {
        /// No connection could be checked out.
        Connection { message: String } => ServiceUnavailable:
            "translation repository connection failed: {message}",
        /// A statement failed; any open transaction was rolled back.
        Query { message: String } => InternalError:
            "translation repository query failed: {message}",
        /// A translation targeted a content item that does not exist.
        ContentItemMissing { id: String } => NotFound:
            "Content item does not exist: {id}",
    }
}

/// Persistence port for content items and translations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Insert or update an item by id. Updates keep `created_at`.
    async fn upsert_content_item(
        &self,
        item: &ContentItemDraft,
        now: DateTime<Utc>,
    ) -> Result<ContentItem, TranslationRepositoryError>;

    /// Upsert a batch of items in one transaction; any failure rolls back
    /// the whole batch.
    async fn bulk_upsert_content_items(
        &self,
        items: &[ContentItemDraft],
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, TranslationRepositoryError>;

    /// Delete an item and, by cascade, its translations.
    async fn delete_content_item(&self, id: &ContentItemId)
    -> Result<bool, TranslationRepositoryError>;

    /// Items ordered by page, section and id, optionally for one page.
    async fn list_content_items(
        &self,
        page: Option<PageName>,
    ) -> Result<Vec<ContentItem>, TranslationRepositoryError>;

    async fn find_content_item(
        &self,
        id: &ContentItemId,
    ) -> Result<Option<ContentItem>, TranslationRepositoryError>;

    /// Insert or update one translation after checking its parent exists.
    ///
    /// A missing parent yields [`TranslationRepositoryError::ContentItemMissing`].
    async fn upsert_translation(
        &self,
        translation: &TranslationDraft,
        now: DateTime<Utc>,
    ) -> Result<ContentTranslation, TranslationRepositoryError>;

    /// Upsert a batch in one transaction, skipping entries whose parent is
    /// missing instead of failing.
    async fn bulk_upsert_translations(
        &self,
        batch: &[TranslationDraft],
        now: DateTime<Utc>,
    ) -> Result<BulkTranslationOutcome, TranslationRepositoryError>;

    async fn find_translation(
        &self,
        id: &ContentItemId,
        language: Language,
    ) -> Result<Option<ContentTranslation>, TranslationRepositoryError>;

    async fn delete_translation(
        &self,
        id: &ContentItemId,
        language: Language,
    ) -> Result<bool, TranslationRepositoryError>;

    /// Every translation grouped by parent item.
    async fn list_translations(&self) -> Result<TranslationsByItem, TranslationRepositoryError>;

    /// Translations of the items placed on one page, grouped by parent item.
    async fn list_page_translations(
        &self,
        page: &PageName,
    ) -> Result<TranslationsByItem, TranslationRepositoryError>;

    /// Insert or update a static string by key.
    async fn upsert_static_translation(
        &self,
        entry: &StaticTranslationDraft,
        now: DateTime<Utc>,
    ) -> Result<StaticTranslation, TranslationRepositoryError>;

    /// Static strings ordered by key, optionally for one category.
    async fn list_static_translations(
        &self,
        category: Option<String>,
    ) -> Result<Vec<StaticTranslation>, TranslationRepositoryError>;
}

/// Empty store. Item writes are echoed back; translation writes fail with
/// [`TranslationRepositoryError::ContentItemMissing`] since no item exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTranslationRepository;

fn echo_item(item: &ContentItemDraft, now: DateTime<Utc>) -> ContentItem {
    ContentItem {
        id: item.id.clone(),
        kind: item.kind,
        content: item.content.clone(),
        metadata: item.metadata.clone(),
        page_name: item.page_name.clone(),
        section_name: item.section_name.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl TranslationRepository for FixtureTranslationRepository {
    async fn upsert_content_item(
        &self,
        item: &ContentItemDraft,
        now: DateTime<Utc>,
    ) -> Result<ContentItem, TranslationRepositoryError> {
        Ok(echo_item(item, now))
    }

    async fn bulk_upsert_content_items(
        &self,
        items: &[ContentItemDraft],
        now: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, TranslationRepositoryError> {
        Ok(items.iter().map(|item| echo_item(item, now)).collect())
    }

    async fn delete_content_item(
        &self,
        _id: &ContentItemId,
    ) -> Result<bool, TranslationRepositoryError> {
        Ok(false)
    }

    async fn list_content_items(
        &self,
        _page: Option<PageName>,
    ) -> Result<Vec<ContentItem>, TranslationRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_content_item(
        &self,
        _id: &ContentItemId,
    ) -> Result<Option<ContentItem>, TranslationRepositoryError> {
        Ok(None)
    }

    async fn upsert_translation(
        &self,
        translation: &TranslationDraft,
        _now: DateTime<Utc>,
    ) -> Result<ContentTranslation, TranslationRepositoryError> {
        Err(TranslationRepositoryError::content_item_missing(
            translation.content_item_id.as_str(),
        ))
    }

    async fn bulk_upsert_translations(
        &self,
        batch: &[TranslationDraft],
        _now: DateTime<Utc>,
    ) -> Result<BulkTranslationOutcome, TranslationRepositoryError> {
        Ok(BulkTranslationOutcome {
            applied: 0,
            skipped: batch
                .iter()
                .map(|entry| entry.content_item_id.clone())
                .collect(),
        })
    }

    async fn find_translation(
        &self,
        _id: &ContentItemId,
        _language: Language,
    ) -> Result<Option<ContentTranslation>, TranslationRepositoryError> {
        Ok(None)
    }

    async fn delete_translation(
        &self,
        _id: &ContentItemId,
        _language: Language,
    ) -> Result<bool, TranslationRepositoryError> {
        Ok(false)
    }

    async fn list_translations(&self) -> Result<TranslationsByItem, TranslationRepositoryError> {
        Ok(TranslationsByItem::new())
    }

    async fn list_page_translations(
        &self,
        _page: &PageName,
    ) -> Result<TranslationsByItem, TranslationRepositoryError> {
        Ok(TranslationsByItem::new())
    }

    async fn upsert_static_translation(
        &self,
        entry: &StaticTranslationDraft,
        now: DateTime<Utc>,
    ) -> Result<StaticTranslation, TranslationRepositoryError> {
        Ok(StaticTranslation {
            key: entry.key.clone(),
            en: entry.en.clone(),
            vi: entry.vi.clone(),
            category: entry.category.clone(),
            description: entry.description.clone(),
            updated_at: now,
        })
    }

    async fn list_static_translations(
        &self,
        _category: Option<String>,
    ) -> Result<Vec<StaticTranslation>, TranslationRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_item_message_is_stable() {
        let err = TranslationRepositoryError::content_item_missing("home.title");
        assert_eq!(err.to_string(), "Content item does not exist: home.title");
    }
}
