//! HTTP inbound adapter exposing the `/api/v1` REST endpoints.
//!
//! Every response body uses the [`envelope::Envelope`] shape; domain errors
//! are rendered by the `ResponseError` impl in [`error`].

pub mod contents;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tours;
pub mod translations;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler. Mount inside `web::scope("/api/v1")`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(tours::configure)
        .configure(contents::configure)
        .configure(translations::configure);
}
