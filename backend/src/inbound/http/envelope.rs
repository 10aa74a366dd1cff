//! JSON response envelope shared by every `/api/v1` endpoint.
//!
//! Successful responses carry `{"status": "success", "data": ...}`. Client
//! failures use `fail` and server failures use `error`; both put the error
//! code in `data` and a human-readable `message` alongside.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome class of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    /// The request was rejected (4xx).
    Fail,
    /// The server could not complete the request (5xx).
    Error,
}

impl EnvelopeStatus {
    /// Classify an error status code.
    pub fn for_error(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Error
        } else {
            Self::Fail
        }
    }
}

/// Response body wrapper.
///
/// # Examples
/// ```
/// use tourbook::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_value(Envelope::success(vec![1, 2])).expect("serialises");
/// assert_eq!(body["status"], "success");
/// assert_eq!(body["data"][1], 2);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// `200 OK` response carrying the envelope.
    pub fn ok(self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }

    /// `201 Created` response carrying the envelope.
    pub fn created(self) -> HttpResponse {
        HttpResponse::Created().json(self)
    }
}

impl Envelope<()> {
    /// Success without a payload, e.g. after a delete.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: None,
            message: Some(message.into()),
        }
    }
}
