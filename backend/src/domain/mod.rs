//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed tour and content model used by the HTTP
//! and persistence layers, the ports that separate them, and the services
//! that implement the driving ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Tour, TourDraft, City, EventType, PackageItem: tour catalogue.
//! - PageContent, PageDocument, ContentItem, ContentTranslation,
//!   StaticTranslation: page content and translations.
//! - *CommandService / *QueryService: implementations of the driving ports.
//! - TranslationSuggester: dictionary-backed translation suggestions.

pub mod content;
pub mod error;
pub mod page_content_service;
pub mod ports;
pub mod tour_service;
pub mod tours;
pub mod trace_id;
pub mod translation_service;
pub mod translator;

#[cfg(test)]
pub(crate) mod service_test_support;

pub use self::content::{
    BulkTranslationOutcome, ContentItem, ContentItemDraft, ContentItemId, ContentKind,
    ContentTranslation, ContentValidationError, Language, PageContent, PageDefault, PageDocument,
    PageItem, PageName, PagePatchError, PageSection, StaticTranslation, StaticTranslationDraft,
    StaticTranslationKey, TranslationDraft, TranslationVariant, TranslationsByItem,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::page_content_service::{PageContentCommandService, PageContentQueryService};
pub use self::tour_service::{TourCommandService, TourQueryService};
pub use self::tours::{
    City, CityDraft, EventType, LookupName, PackageItem, PriceQuote, PriceTier, PriceTiers, Tour,
    TourDraft, TourDraftInput, TourFields, TourId, TourValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::translation_service::{TranslationCommandService, TranslationQueryService};
pub use self::translator::{
    PhraseDictionary, SuggestionSource, TranslationSuggester, TranslationSuggestion,
    TranslatorAvailability,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use tourbook::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such tour"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
