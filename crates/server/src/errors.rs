use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use models::errors::ModelError;
use serde_json::json;
use service::errors::ServiceError;
use tracing::error;

fn status_for(e: &ServiceError) -> StatusCode {
    match e {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Model(ModelError::Validation(_)) => StatusCode::BAD_REQUEST,
        ServiceError::Db(_) | ServiceError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error shape of the listing API: the status plus a plain message body.
#[derive(Debug)]
pub struct ListingError {
    pub status: StatusCode,
    pub message: String,
}

impl ListingError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: msg.into() }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ServiceError> for ListingError {
    fn from(e: ServiceError) -> Self {
        let status = status_for(&e);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %e, "listing request failed");
        }
        Self { status, message: e.to_string() }
    }
}

/// Error shape of the trivia API: every failure is an envelope with
/// success=false, the numeric code and its canonical message.
#[derive(Debug)]
pub struct TriviaError {
    pub status: StatusCode,
}

impl TriviaError {
    pub fn bad_request() -> Self {
        Self { status: StatusCode::BAD_REQUEST }
    }

    pub fn message(&self) -> &'static str {
        match self.status.as_u16() {
            400 => "Bad request",
            404 => "Resource cannot be found",
            422 => "Unprocessable",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for TriviaError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.status.as_u16(),
            "message": self.message(),
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for TriviaError {
    fn from(e: ServiceError) -> Self {
        let status = status_for(&e);
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %e, "trivia request failed");
        }
        Self { status }
    }
}
