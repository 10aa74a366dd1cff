//! Driving port for reading content items and translations.

use async_trait::async_trait;

use crate::domain::{
    ContentItem, ContentItemId, ContentTranslation, Error, Language, PageName, StaticTranslation,
    TranslationsByItem,
};

/// Inbound contract for translation reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationQuery: Send + Sync {
    async fn list_content_items(&self, page: Option<PageName>) -> Result<Vec<ContentItem>, Error>;

    /// One item. `NotFound` when absent.
    async fn get_content_item(&self, id: ContentItemId) -> Result<ContentItem, Error>;

    /// One translation. `NotFound` when absent.
    async fn get_translation(
        &self,
        id: ContentItemId,
        language: Language,
    ) -> Result<ContentTranslation, Error>;

    async fn list_translations(&self) -> Result<TranslationsByItem, Error>;

    async fn list_page_translations(&self, page: PageName) -> Result<TranslationsByItem, Error>;

    async fn list_static_translations(
        &self,
        category: Option<String>,
    ) -> Result<Vec<StaticTranslation>, Error>;
}

/// Query fixture with no stored data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTranslationQuery;

#[async_trait]
impl TranslationQuery for FixtureTranslationQuery {
    async fn list_content_items(
        &self,
        _page: Option<PageName>,
    ) -> Result<Vec<ContentItem>, Error> {
        Ok(Vec::new())
    }

    async fn get_content_item(&self, id: ContentItemId) -> Result<ContentItem, Error> {
        Err(Error::not_found(format!("content item {id} not found")))
    }

    async fn get_translation(
        &self,
        id: ContentItemId,
        language: Language,
    ) -> Result<ContentTranslation, Error> {
        Err(Error::not_found(format!("translation {id}/{language} not found")))
    }

    async fn list_translations(&self) -> Result<TranslationsByItem, Error> {
        Ok(TranslationsByItem::new())
    }

    async fn list_page_translations(&self, _page: PageName) -> Result<TranslationsByItem, Error> {
        Ok(TranslationsByItem::new())
    }

    async fn list_static_translations(
        &self,
        _category: Option<String>,
    ) -> Result<Vec<StaticTranslation>, Error> {
        Ok(Vec::new())
    }
}
