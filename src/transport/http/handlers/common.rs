use crate::domain::error::InventoryError;
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value as JsonValue;

pub fn ok_response(data: JsonValue) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }),
    )
}

/// Maps the error taxonomy onto HTTP statuses: validation failures are bad
/// requests, correct-but-empty outcomes are 404, dangling references are
/// conflicts, and store failures are 503 (surfaced, never retried).
pub fn error_response(err: InventoryError) -> (StatusCode, Json<ApiResponse>) {
    let status = match &err {
        InventoryError::InvalidSortDirection(_)
        | InventoryError::UnknownColumn { .. }
        | InventoryError::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
        InventoryError::NoMatchingRecords | InventoryError::NotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        InventoryError::ReferentialViolation(_) => StatusCode::CONFLICT,
        InventoryError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if status == StatusCode::SERVICE_UNAVAILABLE {
        tracing::error!(error = %err, "record store failure");
    }
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(err.to_string()),
        }),
    )
}
