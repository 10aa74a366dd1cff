//! Page content HTTP handlers.
//!
//! ```text
//! GET   /api/v1/contents
//! GET   /api/v1/contents/{page}
//! PUT   /api/v1/contents/{page}
//! PATCH /api/v1/contents/{page}/sections/{section}/items/{item_id}
//! POST  /api/v1/contents/reset
//! POST  /api/v1/contents/{page}/reset
//! ```

use actix_web::{HttpResponse, get, patch, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::PatchPageItemRequest;
use crate::domain::{PageDefault, PageDocument, PageItem};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, SuccessEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_page_name;

/// Full page document: section names mapped to ordered item lists.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PageContentBody {
    #[schema(value_type = Object)]
    pub content: PageDocument,
}

/// Defaults that replace every stored page.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetAllBody {
    pub pages: Vec<PageDefault>,
}

/// Path of a single page item.
#[derive(Debug, Deserialize)]
pub struct PageItemPath {
    page: String,
    section: String,
    item_id: String,
}

/// List every page ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/contents",
    responses(
        (status = 200, description = "Pages", body = SuccessEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["contents"],
    operation_id = "listPages"
)]
#[get("/contents")]
pub async fn list_pages(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(Envelope::success(state.pages_query.list_pages().await?).ok())
}

#[utoipa::path(
    get,
    path = "/api/v1/contents/{page}",
    params(("page" = String, Path, description = "Page name")),
    responses(
        (status = 200, description = "Page", body = SuccessEnvelopeSchema),
        (status = 404, description = "Page not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["contents"],
    operation_id = "getPage"
)]
#[get("/contents/{page}")]
pub async fn get_page(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = parse_page_name(path.into_inner())?;
    Ok(Envelope::success(state.pages_query.get_page(name).await?).ok())
}

/// Create or fully replace a page. Answers 201 when the page is new.
#[utoipa::path(
    put,
    path = "/api/v1/contents/{page}",
    params(("page" = String, Path, description = "Page name")),
    request_body = PageContentBody,
    responses(
        (status = 200, description = "Page updated", body = SuccessEnvelopeSchema),
        (status = 201, description = "Page created", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid document", body = ErrorEnvelopeSchema)
    ),
    tags = ["contents"],
    operation_id = "savePage"
)]
#[put("/contents/{page}")]
pub async fn save_page(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PageContentBody>,
) -> ApiResult<HttpResponse> {
    let name = parse_page_name(path.into_inner())?;
    let saved = state
        .pages
        .save_page(name, payload.into_inner().content)
        .await?;
    Ok(if saved.created {
        Envelope::success(saved.page)
            .with_message("Page created")
            .created()
    } else {
        Envelope::success(saved.page)
            .with_message("Page updated")
            .ok()
    })
}

/// Replace one item inside a page section.
#[utoipa::path(
    patch,
    path = "/api/v1/contents/{page}/sections/{section}/items/{item_id}",
    params(
        ("page" = String, Path, description = "Page name"),
        ("section" = String, Path, description = "Section name"),
        ("item_id" = String, Path, description = "Item identifier within the section")
    ),
    request_body = PageItem,
    responses(
        (status = 200, description = "Page with the item replaced", body = SuccessEnvelopeSchema),
        (status = 400, description = "Replacement id differs from the path", body = ErrorEnvelopeSchema),
        (status = 404, description = "Page, section or item not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["contents"],
    operation_id = "patchPageItem"
)]
#[patch("/contents/{page}/sections/{section}/items/{item_id}")]
pub async fn patch_item(
    state: web::Data<HttpState>,
    path: web::Path<PageItemPath>,
    payload: web::Json<PageItem>,
) -> ApiResult<HttpResponse> {
    let PageItemPath {
        page,
        section,
        item_id,
    } = path.into_inner();
    let page = state
        .pages
        .patch_item(PatchPageItemRequest {
            page_name: parse_page_name(page)?,
            section,
            item_id,
            item: payload.into_inner(),
        })
        .await?;
    Ok(Envelope::success(page).ok())
}

/// Replace every stored page with the supplied defaults.
#[utoipa::path(
    post,
    path = "/api/v1/contents/reset",
    request_body = ResetAllBody,
    responses(
        (status = 200, description = "Pages reset", body = SuccessEnvelopeSchema),
        (status = 400, description = "Duplicate page names", body = ErrorEnvelopeSchema)
    ),
    tags = ["contents"],
    operation_id = "resetAllPages"
)]
#[post("/contents/reset")]
pub async fn reset_all(
    state: web::Data<HttpState>,
    payload: web::Json<ResetAllBody>,
) -> ApiResult<HttpResponse> {
    let pages = state.pages.reset_all(payload.into_inner().pages).await?;
    Ok(Envelope::success(pages)
        .with_message("All pages reset to defaults")
        .ok())
}

/// Replace one page with the supplied default.
#[utoipa::path(
    post,
    path = "/api/v1/contents/{page}/reset",
    params(("page" = String, Path, description = "Page name")),
    request_body = PageContentBody,
    responses(
        (status = 200, description = "Page reset", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid page name or document", body = ErrorEnvelopeSchema)
    ),
    tags = ["contents"],
    operation_id = "resetPage"
)]
#[post("/contents/{page}/reset")]
pub async fn reset_page(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PageContentBody>,
) -> ApiResult<HttpResponse> {
    let default = PageDefault {
        page_name: parse_page_name(path.into_inner())?,
        document: payload.into_inner().content,
    };
    let page = state.pages.reset_page(default).await?;
    Ok(Envelope::success(page).with_message("Page reset").ok())
}

/// Register every handler in this module on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_pages)
        .service(reset_all)
        .service(get_page)
        .service(save_page)
        .service(patch_item)
        .service(reset_page);
}

#[cfg(test)]
#[path = "contents_tests.rs"]
mod tests;
