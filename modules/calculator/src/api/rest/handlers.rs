//! REST handlers for calculator module

use std::sync::Arc;

use axum::body::Bytes;
use axum::{Extension, Json};
use http::StatusCode;

use crate::domain::Service;

use super::dto::{CalculateRequest, CalculationResponse};
use super::error::ApiError;

pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not accepted";

/// Handler for POST /api/v1/calculate
///
/// The body is decoded by hand so that decoding failures, whatever the
/// content type, share one response.
#[utoipa::path(
    post,
    path = "/api/v1/calculate",
    tag = "calculator",
    operation_id = "calculator.calculate",
    request_body(content = CalculateRequest, description = "Expression to evaluate"),
    responses(
        (status = 200, description = "Expression evaluated", body = CalculationResponse),
        (status = 405, description = "Method other than POST"),
        (status = 422, description = "Malformed body or invalid expression", body = CalculationResponse),
        (status = 500, description = "Division by zero or unexpected failure", body = CalculationResponse)
    )
)]
pub async fn calculate(
    Extension(service): Extension<Arc<Service>>,
    body: Bytes,
) -> Result<Json<CalculationResponse>, ApiError> {
    let req: CalculateRequest = serde_json::from_slice(&body).map_err(ApiError::InvalidRequest)?;

    let value = service.calculate(&req.expression)?;

    Ok(Json(CalculationResponse::result(value)))
}

/// Fallback for any method other than POST on the calculate route.
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED)
}
