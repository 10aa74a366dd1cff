//! Content item, translation and static string HTTP handlers.
//!
//! ```text
//! GET    /api/v1/content-items?page=
//! GET    /api/v1/content-items/{id}
//! PUT    /api/v1/content-items/{id}
//! POST   /api/v1/content-items/bulk
//! DELETE /api/v1/content-items/{id}
//! GET    /api/v1/translations
//! GET    /api/v1/pages/{page}/translations
//! GET    /api/v1/translations/{item_id}/{language}
//! PUT    /api/v1/translations
//! POST   /api/v1/translations/bulk
//! DELETE /api/v1/translations/{item_id}/{language}
//! POST   /api/v1/translations/suggest
//! GET    /api/v1/static-translations?category=
//! PUT    /api/v1/static-translations/{key}
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    ContentItemDraft, ContentKind, Error, StaticTranslationDraft, TranslationDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, SuccessEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    content_validation_error, parse_item_id, parse_language, parse_page_name, parse_static_key,
};

/// Placement and payload of a content item addressed by path.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemBody {
    pub kind: String,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    pub page_name: String,
    pub section_name: String,
}

/// Content item carrying its own id, used in bulk writes.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkContentItem {
    pub id: String,
    #[serde(flatten)]
    pub item: ContentItemBody,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkContentItemsBody {
    pub items: Vec<BulkContentItem>,
}

/// One translation of a content item.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationBody {
    pub content_item_id: String,
    pub language: String,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkTranslationsBody {
    pub translations: Vec<TranslationBody>,
}

/// Text to translate between English and Vietnamese.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SuggestBody {
    pub text: String,
    pub from: String,
    pub to: String,
}

/// Both language variants of a static UI string.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StaticTranslationBody {
    pub en: String,
    pub vi: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Optional page filter for content items.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageFilter {
    /// Only return items placed on this page.
    pub page: Option<String>,
}

/// Optional category filter for static strings.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

fn content_item_draft(id: String, body: ContentItemBody) -> Result<ContentItemDraft, Error> {
    let id = parse_item_id(id)?;
    let kind = ContentKind::from_str(&body.kind).map_err(|err| content_validation_error(&err))?;
    let page_name = parse_page_name(body.page_name)?;
    ContentItemDraft::new(
        id,
        kind,
        body.content,
        body.metadata,
        page_name,
        body.section_name,
    )
    .map_err(|err| content_validation_error(&err))
}

fn translation_draft(body: TranslationBody) -> Result<TranslationDraft, Error> {
    Ok(TranslationDraft {
        content_item_id: parse_item_id(body.content_item_id)?,
        language: parse_language(&body.language)?,
        content: body.content,
        metadata: body.metadata.filter(|value| !value.is_null()),
    })
}

/// Tag a validation failure with the position of the offending batch entry.
fn at_index(err: Error, index: usize) -> Error {
    let mut details = err.details().cloned().unwrap_or_else(|| json!({}));
    if let Some(map) = details.as_object_mut() {
        map.insert("index".to_owned(), json!(index));
    }
    err.with_details(details)
}

#[utoipa::path(
    get,
    path = "/api/v1/content-items",
    params(PageFilter),
    responses(
        (status = 200, description = "Content items", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid page name", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "listContentItems"
)]
#[get("/content-items")]
pub async fn list_content_items(
    state: web::Data<HttpState>,
    query: web::Query<PageFilter>,
) -> ApiResult<HttpResponse> {
    let page = query.into_inner().page.map(parse_page_name).transpose()?;
    let items = state.translations_query.list_content_items(page).await?;
    Ok(Envelope::success(items).ok())
}

#[utoipa::path(
    get,
    path = "/api/v1/content-items/{id}",
    params(("id" = String, Path, description = "Content item identifier")),
    responses(
        (status = 200, description = "Content item", body = SuccessEnvelopeSchema),
        (status = 404, description = "Content item not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "getContentItem"
)]
#[get("/content-items/{id}")]
pub async fn get_content_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_item_id(path.into_inner())?;
    let item = state.translations_query.get_content_item(id).await?;
    Ok(Envelope::success(item).ok())
}

/// Create or replace a content item.
#[utoipa::path(
    put,
    path = "/api/v1/content-items/{id}",
    params(("id" = String, Path, description = "Content item identifier")),
    request_body = ContentItemBody,
    responses(
        (status = 200, description = "Content item saved", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid content item", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "upsertContentItem"
)]
#[put("/content-items/{id}")]
pub async fn upsert_content_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ContentItemBody>,
) -> ApiResult<HttpResponse> {
    let draft = content_item_draft(path.into_inner(), payload.into_inner())?;
    let item = state.translations.upsert_content_item(draft).await?;
    Ok(Envelope::success(item).with_message("Content item saved").ok())
}

/// Upsert a batch of content items in one transaction.
#[utoipa::path(
    post,
    path = "/api/v1/content-items/bulk",
    request_body = BulkContentItemsBody,
    responses(
        (status = 200, description = "Content items saved", body = SuccessEnvelopeSchema),
        (status = 400, description = "An entry is invalid; details carry its index", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "bulkUpsertContentItems"
)]
#[post("/content-items/bulk")]
pub async fn bulk_upsert_content_items(
    state: web::Data<HttpState>,
    payload: web::Json<BulkContentItemsBody>,
) -> ApiResult<HttpResponse> {
    let drafts = payload
        .into_inner()
        .items
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            content_item_draft(entry.id, entry.item).map_err(|err| at_index(err, index))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let items = state.translations.bulk_upsert_content_items(drafts).await?;
    let message = format!("{} content items saved", items.len());
    Ok(Envelope::success(items).with_message(message).ok())
}

/// Delete a content item and, by cascade, its translations.
#[utoipa::path(
    delete,
    path = "/api/v1/content-items/{id}",
    params(("id" = String, Path, description = "Content item identifier")),
    responses(
        (status = 200, description = "Content item deleted", body = SuccessEnvelopeSchema),
        (status = 404, description = "Content item not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "deleteContentItem"
)]
#[delete("/content-items/{id}")]
pub async fn delete_content_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_item_id(path.into_inner())?;
    state.translations.delete_content_item(id).await?;
    Ok(Envelope::message_only("Content item deleted").ok())
}

/// Every translation grouped by content item id.
#[utoipa::path(
    get,
    path = "/api/v1/translations",
    responses(
        (status = 200, description = "Translations keyed by item id", body = SuccessEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "listTranslations"
)]
#[get("/translations")]
pub async fn list_translations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let grouped = state.translations_query.list_translations().await?;
    Ok(Envelope::success(grouped).ok())
}

#[utoipa::path(
    get,
    path = "/api/v1/pages/{page}/translations",
    params(("page" = String, Path, description = "Page name")),
    responses(
        (status = 200, description = "Translations of items on the page", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid page name", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "listPageTranslations"
)]
#[get("/pages/{page}/translations")]
pub async fn list_page_translations(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let page = parse_page_name(path.into_inner())?;
    let grouped = state.translations_query.list_page_translations(page).await?;
    Ok(Envelope::success(grouped).ok())
}

#[utoipa::path(
    get,
    path = "/api/v1/translations/{item_id}/{language}",
    params(
        ("item_id" = String, Path, description = "Content item identifier"),
        ("language" = String, Path, description = "`en` or `vi`")
    ),
    responses(
        (status = 200, description = "Translation", body = SuccessEnvelopeSchema),
        (status = 404, description = "Translation not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "getTranslation"
)]
#[get("/translations/{item_id}/{language}")]
pub async fn get_translation(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (item_id, language) = path.into_inner();
    let translation = state
        .translations_query
        .get_translation(parse_item_id(item_id)?, parse_language(&language)?)
        .await?;
    Ok(Envelope::success(translation).ok())
}

/// Create or replace one translation. The parent item must exist.
#[utoipa::path(
    put,
    path = "/api/v1/translations",
    request_body = TranslationBody,
    responses(
        (status = 200, description = "Translation saved", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid translation", body = ErrorEnvelopeSchema),
        (status = 404, description = "Content item does not exist", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "upsertTranslation"
)]
#[put("/translations")]
pub async fn upsert_translation(
    state: web::Data<HttpState>,
    payload: web::Json<TranslationBody>,
) -> ApiResult<HttpResponse> {
    let draft = translation_draft(payload.into_inner())?;
    let translation = state.translations.upsert_translation(draft).await?;
    Ok(Envelope::success(translation)
        .with_message("Translation saved")
        .ok())
}

/// Upsert a batch of translations, skipping entries without a parent item.
#[utoipa::path(
    post,
    path = "/api/v1/translations/bulk",
    request_body = BulkTranslationsBody,
    responses(
        (status = 200, description = "Applied count and skipped item ids", body = SuccessEnvelopeSchema),
        (status = 400, description = "An entry is invalid; details carry its index", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "bulkUpsertTranslations"
)]
#[post("/translations/bulk")]
pub async fn bulk_upsert_translations(
    state: web::Data<HttpState>,
    payload: web::Json<BulkTranslationsBody>,
) -> ApiResult<HttpResponse> {
    let drafts = payload
        .into_inner()
        .translations
        .into_iter()
        .enumerate()
        .map(|(index, entry)| translation_draft(entry).map_err(|err| at_index(err, index)))
        .collect::<Result<Vec<_>, _>>()?;
    let outcome = state.translations.bulk_upsert_translations(drafts).await?;
    let message = format!("{} translations saved", outcome.applied);
    Ok(Envelope::success(outcome).with_message(message).ok())
}

#[utoipa::path(
    delete,
    path = "/api/v1/translations/{item_id}/{language}",
    params(
        ("item_id" = String, Path, description = "Content item identifier"),
        ("language" = String, Path, description = "`en` or `vi`")
    ),
    responses(
        (status = 200, description = "Translation deleted", body = SuccessEnvelopeSchema),
        (status = 404, description = "Translation not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "deleteTranslation"
)]
#[delete("/translations/{item_id}/{language}")]
pub async fn delete_translation(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (item_id, language) = path.into_inner();
    state
        .translations
        .delete_translation(parse_item_id(item_id)?, parse_language(&language)?)
        .await?;
    Ok(Envelope::message_only("Translation deleted").ok())
}

/// Suggest a translation from the configured engine or the phrase
/// dictionary.
#[utoipa::path(
    post,
    path = "/api/v1/translations/suggest",
    request_body = SuggestBody,
    responses(
        (status = 200, description = "Suggestion with its source", body = SuccessEnvelopeSchema),
        (status = 400, description = "Blank text or identical languages", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "suggestTranslation"
)]
#[post("/translations/suggest")]
pub async fn suggest_translation(
    state: web::Data<HttpState>,
    payload: web::Json<SuggestBody>,
) -> ApiResult<HttpResponse> {
    let SuggestBody { text, from, to } = payload.into_inner();
    let suggestion = state
        .suggester
        .suggest(&text, parse_language(&from)?, parse_language(&to)?)
        .await?;
    Ok(Envelope::success(suggestion).ok())
}

#[utoipa::path(
    get,
    path = "/api/v1/static-translations",
    params(CategoryFilter),
    responses(
        (status = 200, description = "Static strings ordered by key", body = SuccessEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "listStaticTranslations"
)]
#[get("/static-translations")]
pub async fn list_static_translations(
    state: web::Data<HttpState>,
    query: web::Query<CategoryFilter>,
) -> ApiResult<HttpResponse> {
    let category = query
        .into_inner()
        .category
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());
    let entries = state
        .translations_query
        .list_static_translations(category)
        .await?;
    Ok(Envelope::success(entries).ok())
}

#[utoipa::path(
    put,
    path = "/api/v1/static-translations/{key}",
    params(("key" = String, Path, description = "Dotted key, e.g. `nav.home`")),
    request_body = StaticTranslationBody,
    responses(
        (status = 200, description = "Static string saved", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid key or category", body = ErrorEnvelopeSchema)
    ),
    tags = ["translations"],
    operation_id = "upsertStaticTranslation"
)]
#[put("/static-translations/{key}")]
pub async fn upsert_static_translation(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StaticTranslationBody>,
) -> ApiResult<HttpResponse> {
    let key = parse_static_key(path.into_inner())?;
    let StaticTranslationBody {
        en,
        vi,
        category,
        description,
    } = payload.into_inner();
    let draft = StaticTranslationDraft::new(key, en, vi, category, description)
        .map_err(|err| content_validation_error(&err))?;
    let entry = state.translations.upsert_static_translation(draft).await?;
    Ok(Envelope::success(entry)
        .with_message("Static translation saved")
        .ok())
}

/// Register every handler in this module on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_content_items)
        .service(bulk_upsert_content_items)
        .service(get_content_item)
        .service(upsert_content_item)
        .service(delete_content_item)
        .service(list_translations)
        .service(list_page_translations)
        .service(upsert_translation)
        .service(bulk_upsert_translations)
        .service(suggest_translation)
        .service(get_translation)
        .service(delete_translation)
        .service(list_static_translations)
        .service(upsert_static_translation);
}

#[cfg(test)]
#[path = "translations_tests.rs"]
mod tests;
