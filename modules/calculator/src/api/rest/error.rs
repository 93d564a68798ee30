//! Mapping of request and domain failures to HTTP responses.

use axum::Json;
use axum::response::{IntoResponse, Response};
use calculation::ErrorKind;
use http::StatusCode;

use crate::domain::ServiceError;

use super::dto::CalculationResponse;

pub const MSG_INVALID_REQUEST: &str = "Invalid request format";
pub const MSG_INVALID_EXPRESSION: &str = "Expression is not valid";
pub const MSG_SERVER_ERROR: &str = "Server Error";

/// Failure of a calculator REST call.
#[derive(Debug)]
pub enum ApiError {
    /// Body is not a valid `CalculateRequest`
    InvalidRequest(serde_json::Error),
    Service(ServiceError),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl ApiError {
    /// Status code and client-facing message. Internal details are logged,
    /// never returned.
    #[must_use]
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, MSG_INVALID_REQUEST),
            Self::Service(e) => match e.calc_kind() {
                Some(ErrorKind::InvalidExpression) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, MSG_INVALID_EXPRESSION)
                }
                Some(ErrorKind::DivideByZero) | None => {
                    (StatusCode::INTERNAL_SERVER_ERROR, MSG_SERVER_ERROR)
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            Self::InvalidRequest(e) => tracing::debug!(error = %e, "malformed request body"),
            Self::Service(e @ ServiceError::Internal(_)) => {
                tracing::error!(error = %e, "calculation failed unexpectedly");
            }
            Self::Service(e) => tracing::debug!(error = %e, "calculation rejected"),
        }
        (status, Json(CalculationResponse::error(message))).into_response()
    }
}
