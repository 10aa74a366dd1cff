//! OpenAPI schema definitions for the response envelope.
//!
//! The envelope and error payload are serialised by hand-written types in
//! [`super::envelope`] and [`super::error`]; these mirrors exist only so the
//! generated document describes them.

use utoipa::ToSchema;

use super::envelope::EnvelopeStatus;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation or references unknown data.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The database is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error details carried in `data` of a `fail` or `error` envelope.
#[derive(ToSchema)]
#[schema(as = ErrorData, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorDataSchema {
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3f2b8a8e-9d4c-4f7e-8f55-0c5b7b1d9a10")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// Envelope returned on failure.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    /// `fail` for 4xx, `error` for 5xx.
    status: EnvelopeStatus,
    #[schema(example = "tour 7 not found")]
    message: String,
    data: ErrorDataSchema,
}

/// Envelope returned on success; `data` holds the endpoint's payload.
#[derive(ToSchema)]
#[schema(as = SuccessEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SuccessEnvelopeSchema {
    status: EnvelopeStatus,
    data: Option<serde_json::Value>,
    message: Option<String>,
}
