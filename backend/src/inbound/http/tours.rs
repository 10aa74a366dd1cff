//! Tour, price and lookup HTTP handlers.
//!
//! ```text
//! GET    /api/v1/tours
//! GET    /api/v1/tours/{id}
//! POST   /api/v1/tours
//! PUT    /api/v1/tours/{id}
//! DELETE /api/v1/tours/{id}
//! GET    /api/v1/tours/{id}/price?registrationDate=YYYY-MM-DD&returningUniversity=bool
//! GET    /api/v1/cities            POST /api/v1/cities
//! GET    /api/v1/event-types       POST /api/v1/event-types
//! GET    /api/v1/package-items     POST /api/v1/package-items
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CityDraft, Error, LookupName, TourDraft, TourDraftInput, TourFields, TourId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, SuccessEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, tour_validation_error};

/// Full replacement payload for creating or updating a tour.
///
/// Omitted id lists clear the corresponding collection.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourRequestBody {
    #[serde(flatten)]
    pub fields: TourFields,
    #[serde(default)]
    pub city_ids: Vec<i32>,
    #[serde(default)]
    pub event_type_ids: Vec<i32>,
    #[serde(default)]
    pub package_item_ids: Vec<i32>,
    #[serde(default)]
    pub additional_images: Vec<String>,
}

impl TryFrom<TourRequestBody> for TourDraft {
    type Error = Error;

    fn try_from(body: TourRequestBody) -> Result<Self, Self::Error> {
        TourDraft::new(TourDraftInput {
            fields: body.fields,
            city_ids: body.city_ids,
            event_type_ids: body.event_type_ids,
            package_item_ids: body.package_item_ids,
            additional_images: body.additional_images,
        })
        .map_err(|err| tour_validation_error(&err))
    }
}

/// Query string of the price endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PriceQuery {
    /// Registration date, `YYYY-MM-DD`.
    pub registration_date: String,
    /// Whether the registrant is a returning-university participant.
    #[serde(default)]
    pub returning_university: bool,
}

/// Payload for creating a city.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityRequestBody {
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub wiki_url: Option<String>,
}

/// Payload for creating an event type or package item.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LookupRequestBody {
    pub name: String,
}

fn lookup_name(raw: String) -> Result<LookupName, Error> {
    LookupName::new(raw).map_err(|err| tour_validation_error(&err))
}

/// List every tour, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/tours",
    responses(
        (status = 200, description = "Tours", body = SuccessEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["tours"],
    operation_id = "listTours"
)]
#[get("/tours")]
pub async fn list_tours(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let tours = state.tours_query.list_tours().await?;
    Ok(Envelope::success(tours).ok())
}

/// Fetch one tour with its collections.
#[utoipa::path(
    get,
    path = "/api/v1/tours/{id}",
    params(("id" = i32, Path, description = "Tour identifier")),
    responses(
        (status = 200, description = "Tour", body = SuccessEnvelopeSchema),
        (status = 404, description = "Tour not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["tours"],
    operation_id = "getTour"
)]
#[get("/tours/{id}")]
pub async fn get_tour(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let tour = state
        .tours_query
        .get_tour(TourId::new(path.into_inner()))
        .await?;
    Ok(Envelope::success(tour).ok())
}

/// Create a tour together with its collections.
#[utoipa::path(
    post,
    path = "/api/v1/tours",
    request_body = TourRequestBody,
    responses(
        (status = 201, description = "Tour created", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid request or unknown lookup id", body = ErrorEnvelopeSchema)
    ),
    tags = ["tours"],
    operation_id = "createTour"
)]
#[post("/tours")]
pub async fn create_tour(
    state: web::Data<HttpState>,
    payload: web::Json<TourRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = TourDraft::try_from(payload.into_inner())?;
    let tour = state.tours.create_tour(draft).await?;
    Ok(Envelope::success(tour)
        .with_message("Tour created successfully")
        .created())
}

/// Replace a tour and all of its collections.
#[utoipa::path(
    put,
    path = "/api/v1/tours/{id}",
    params(("id" = i32, Path, description = "Tour identifier")),
    request_body = TourRequestBody,
    responses(
        (status = 200, description = "Tour updated", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid request or unknown lookup id", body = ErrorEnvelopeSchema),
        (status = 404, description = "Tour not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["tours"],
    operation_id = "updateTour"
)]
#[put("/tours/{id}")]
pub async fn update_tour(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<TourRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = TourDraft::try_from(payload.into_inner())?;
    let tour = state
        .tours
        .update_tour(TourId::new(path.into_inner()), draft)
        .await?;
    Ok(Envelope::success(tour)
        .with_message("Tour updated successfully")
        .ok())
}

/// Delete a tour and its collections.
#[utoipa::path(
    delete,
    path = "/api/v1/tours/{id}",
    params(("id" = i32, Path, description = "Tour identifier")),
    responses(
        (status = 200, description = "Tour deleted", body = SuccessEnvelopeSchema),
        (status = 404, description = "Tour not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["tours"],
    operation_id = "deleteTour"
)]
#[delete("/tours/{id}")]
pub async fn delete_tour(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.tours.delete_tour(TourId::new(path.into_inner())).await?;
    Ok(Envelope::message_only("Tour deleted successfully").ok())
}

/// Quote the price of one registration.
#[utoipa::path(
    get,
    path = "/api/v1/tours/{id}/price",
    params(("id" = i32, Path, description = "Tour identifier"), PriceQuery),
    responses(
        (status = 200, description = "Price quote", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid registration date", body = ErrorEnvelopeSchema),
        (status = 404, description = "Tour not found", body = ErrorEnvelopeSchema)
    ),
    tags = ["tours"],
    operation_id = "quoteTourPrice"
)]
#[get("/tours/{id}/price")]
pub async fn quote_price(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<PriceQuery>,
) -> ApiResult<HttpResponse> {
    let PriceQuery {
        registration_date,
        returning_university,
    } = query.into_inner();
    let date = parse_date(&registration_date, FieldName::new("registrationDate"))?;
    let price = state
        .tours_query
        .quote_price(TourId::new(path.into_inner()), date, returning_university)
        .await?;
    Ok(Envelope::success(price).ok())
}

#[utoipa::path(
    get,
    path = "/api/v1/cities",
    responses((status = 200, description = "Cities ordered by name", body = SuccessEnvelopeSchema)),
    tags = ["lookups"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(Envelope::success(state.tours_query.list_cities().await?).ok())
}

#[utoipa::path(
    post,
    path = "/api/v1/cities",
    request_body = CityRequestBody,
    responses(
        (status = 201, description = "City created", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid or duplicate name", body = ErrorEnvelopeSchema)
    ),
    tags = ["lookups"],
    operation_id = "createCity"
)]
#[post("/cities")]
pub async fn create_city(
    state: web::Data<HttpState>,
    payload: web::Json<CityRequestBody>,
) -> ApiResult<HttpResponse> {
    let CityRequestBody {
        name,
        image_url,
        wiki_url,
    } = payload.into_inner();
    let draft =
        CityDraft::new(name, image_url, wiki_url).map_err(|err| tour_validation_error(&err))?;
    let city = state.tours.create_city(draft).await?;
    Ok(Envelope::success(city).created())
}

#[utoipa::path(
    get,
    path = "/api/v1/event-types",
    responses((status = 200, description = "Event types ordered by name", body = SuccessEnvelopeSchema)),
    tags = ["lookups"],
    operation_id = "listEventTypes"
)]
#[get("/event-types")]
pub async fn list_event_types(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(Envelope::success(state.tours_query.list_event_types().await?).ok())
}

#[utoipa::path(
    post,
    path = "/api/v1/event-types",
    request_body = LookupRequestBody,
    responses(
        (status = 201, description = "Event type created", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid or duplicate name", body = ErrorEnvelopeSchema)
    ),
    tags = ["lookups"],
    operation_id = "createEventType"
)]
#[post("/event-types")]
pub async fn create_event_type(
    state: web::Data<HttpState>,
    payload: web::Json<LookupRequestBody>,
) -> ApiResult<HttpResponse> {
    let name = lookup_name(payload.into_inner().name)?;
    let event_type = state.tours.create_event_type(name).await?;
    Ok(Envelope::success(event_type).created())
}

#[utoipa::path(
    get,
    path = "/api/v1/package-items",
    responses((status = 200, description = "Package items ordered by name", body = SuccessEnvelopeSchema)),
    tags = ["lookups"],
    operation_id = "listPackageItems"
)]
#[get("/package-items")]
pub async fn list_package_items(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(Envelope::success(state.tours_query.list_package_items().await?).ok())
}

#[utoipa::path(
    post,
    path = "/api/v1/package-items",
    request_body = LookupRequestBody,
    responses(
        (status = 201, description = "Package item created", body = SuccessEnvelopeSchema),
        (status = 400, description = "Invalid or duplicate name", body = ErrorEnvelopeSchema)
    ),
    tags = ["lookups"],
    operation_id = "createPackageItem"
)]
#[post("/package-items")]
pub async fn create_package_item(
    state: web::Data<HttpState>,
    payload: web::Json<LookupRequestBody>,
) -> ApiResult<HttpResponse> {
    let name = lookup_name(payload.into_inner().name)?;
    let package_item = state.tours.create_package_item(name).await?;
    Ok(Envelope::success(package_item).created())
}

/// Register every handler in this module on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tours)
        .service(create_tour)
        .service(quote_price)
        .service(get_tour)
        .service(update_tour)
        .service(delete_tour)
        .service(list_cities)
        .service(create_city)
        .service(list_event_types)
        .service(create_event_type)
        .service(list_package_items)
        .service(create_package_item);
}

#[cfg(test)]
#[path = "tours_tests.rs"]
mod tests;
