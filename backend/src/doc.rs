//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! envelope mirrors from [`crate::inbound::http::schemas`] and the domain
//! types returned inside `data`. The document backs Swagger UI in debug
//! builds and is printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::ports::TourPriceResponse;
use crate::domain::{
    BulkTranslationOutcome, City, ContentItem, ContentItemId, ContentKind, ContentTranslation,
    EventType, Language, PackageItem, PageContent, PageDefault, PageItem, PageName, PriceQuote,
    PriceTier, PriceTiers, StaticTranslation, StaticTranslationKey, SuggestionSource, Tour,
    TourFields, TourId, TranslationSuggestion, TranslationVariant, TranslatorAvailability,
};
use crate::inbound::http::contents::{PageContentBody, ResetAllBody};
use crate::inbound::http::envelope::EnvelopeStatus;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorDataSchema, ErrorEnvelopeSchema, SuccessEnvelopeSchema,
};
use crate::inbound::http::tours::{CityRequestBody, LookupRequestBody, TourRequestBody};
use crate::inbound::http::translations::{
    BulkContentItem, BulkContentItemsBody, BulkTranslationsBody, ContentItemBody,
    StaticTranslationBody, SuggestBody, TranslationBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tourbook backend API",
        description = "Tour catalogue, bilingual page content and translations."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tours::list_tours,
        crate::inbound::http::tours::get_tour,
        crate::inbound::http::tours::create_tour,
        crate::inbound::http::tours::update_tour,
        crate::inbound::http::tours::delete_tour,
        crate::inbound::http::tours::quote_price,
        crate::inbound::http::tours::list_cities,
        crate::inbound::http::tours::create_city,
        crate::inbound::http::tours::list_event_types,
        crate::inbound::http::tours::create_event_type,
        crate::inbound::http::tours::list_package_items,
        crate::inbound::http::tours::create_package_item,
        crate::inbound::http::contents::list_pages,
        crate::inbound::http::contents::get_page,
        crate::inbound::http::contents::save_page,
        crate::inbound::http::contents::patch_item,
        crate::inbound::http::contents::reset_all,
        crate::inbound::http::contents::reset_page,
        crate::inbound::http::translations::list_content_items,
        crate::inbound::http::translations::get_content_item,
        crate::inbound::http::translations::upsert_content_item,
        crate::inbound::http::translations::bulk_upsert_content_items,
        crate::inbound::http::translations::delete_content_item,
        crate::inbound::http::translations::list_translations,
        crate::inbound::http::translations::list_page_translations,
        crate::inbound::http::translations::get_translation,
        crate::inbound::http::translations::upsert_translation,
        crate::inbound::http::translations::bulk_upsert_translations,
        crate::inbound::http::translations::delete_translation,
        crate::inbound::http::translations::suggest_translation,
        crate::inbound::http::translations::list_static_translations,
        crate::inbound::http::translations::upsert_static_translation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        EnvelopeStatus,
        ErrorCodeSchema,
        ErrorDataSchema,
        ErrorEnvelopeSchema,
        SuccessEnvelopeSchema,
        TourId,
        Tour,
        TourFields,
        PriceTiers,
        PriceTier,
        PriceQuote,
        TourPriceResponse,
        City,
        EventType,
        PackageItem,
        PageName,
        PageItem,
        PageContent,
        PageDefault,
        ContentItemId,
        ContentKind,
        ContentItem,
        Language,
        ContentTranslation,
        TranslationVariant,
        BulkTranslationOutcome,
        StaticTranslationKey,
        StaticTranslation,
        TranslationSuggestion,
        SuggestionSource,
        TranslatorAvailability,
        TourRequestBody,
        CityRequestBody,
        LookupRequestBody,
        PageContentBody,
        ResetAllBody,
        ContentItemBody,
        BulkContentItem,
        BulkContentItemsBody,
        TranslationBody,
        BulkTranslationsBody,
        SuggestBody,
        StaticTranslationBody,
    )),
    tags(
        (name = "tours", description = "Tours, pricing and lookup tables"),
        (name = "contents", description = "Page documents"),
        (name = "translations", description = "Content items, translations and static strings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
