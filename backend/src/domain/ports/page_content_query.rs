//! Driving port for reading page content.

use async_trait::async_trait;

use crate::domain::{Error, PageContent, PageName};

/// Inbound contract for page reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageContentQuery: Send + Sync {
    /// Every page ordered by name.
    async fn list_pages(&self) -> Result<Vec<PageContent>, Error>;

    /// One page. `NotFound` when absent.
    async fn get_page(&self, name: PageName) -> Result<PageContent, Error>;
}

/// Query fixture with no pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePageContentQuery;

#[async_trait]
impl PageContentQuery for FixturePageContentQuery {
    async fn list_pages(&self) -> Result<Vec<PageContent>, Error> {
        Ok(Vec::new())
    }

    async fn get_page(&self, name: PageName) -> Result<PageContent, Error> {
        Err(Error::not_found(format!("page {name} not found")))
    }
}
