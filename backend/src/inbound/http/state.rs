//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only depend on the driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::TranslationSuggester;
use crate::domain::ports::{
    FixturePageContentCommand, FixturePageContentQuery, FixtureTourCommand, FixtureTourQuery,
    FixtureTranslationCommand, FixtureTranslationQuery, PageContentCommand, PageContentQuery,
    TourCommand, TourQuery, TranslationCommand, TranslationQuery,
};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub tours: Arc<dyn TourCommand>,
    pub tours_query: Arc<dyn TourQuery>,
    pub pages: Arc<dyn PageContentCommand>,
    pub pages_query: Arc<dyn PageContentQuery>,
    pub translations: Arc<dyn TranslationCommand>,
    pub translations_query: Arc<dyn TranslationQuery>,
}

impl HttpStatePorts {
    /// Fixture ports that need no database.
    pub fn fixtures() -> Self {
        Self {
            tours: Arc::new(FixtureTourCommand),
            tours_query: Arc::new(FixtureTourQuery),
            pages: Arc::new(FixturePageContentCommand),
            pages_query: Arc::new(FixturePageContentQuery),
            translations: Arc::new(FixtureTranslationCommand),
            translations_query: Arc::new(FixtureTranslationQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tours: Arc<dyn TourCommand>,
    pub tours_query: Arc<dyn TourQuery>,
    pub pages: Arc<dyn PageContentCommand>,
    pub pages_query: Arc<dyn PageContentQuery>,
    pub translations: Arc<dyn TranslationCommand>,
    pub translations_query: Arc<dyn TranslationQuery>,
    pub suggester: Arc<TranslationSuggester>,
}

impl HttpState {
    /// Construct state from a ports bundle and the suggester built at
    /// startup.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use tourbook::domain::TranslationSuggester;
    /// use tourbook::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts::fixtures(),
    ///     Arc::new(TranslationSuggester::dictionary_only()),
    /// );
    /// let _tours = state.tours_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, suggester: Arc<TranslationSuggester>) -> Self {
        let HttpStatePorts {
            tours,
            tours_query,
            pages,
            pages_query,
            translations,
            translations_query,
        } = ports;
        Self {
            tours,
            tours_query,
            pages,
            pages_query,
            translations,
            translations_query,
            suggester,
        }
    }
}
