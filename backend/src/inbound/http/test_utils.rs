//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::TranslationSuggester;

use super::error::{json_config, path_config, query_config};
use super::state::{HttpState, HttpStatePorts};

/// Build an app mounting every `/api/v1` handler over the given ports and
/// the dictionary-only suggester.
pub fn test_app(
    ports: HttpStatePorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(ports, Arc::new(TranslationSuggester::dictionary_only()));
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(web::scope("/api/v1").configure(super::configure))
}
