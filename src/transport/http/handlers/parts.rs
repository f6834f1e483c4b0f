//! Replacement-part CRUD.

use crate::domain::entity::NewPart;
use crate::transport::http::handlers::common::{error_response, ok_response};
use crate::transport::http::types::{ApiResponse, AppState, json_422};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/parts",
    request_body = NewPart,
    responses(
        (status = 200, description = "Part created", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    )
)]
pub async fn create_part_handler(
    State(state): State<AppState>,
    request: Result<Json<NewPart>, JsonRejection>,
) -> impl IntoResponse {
    let Json(new) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"name\", \"price\", ...}"),
    };
    match state.service.create_part(&new).await {
        Ok(part) => ok_response(json!({ "part": part })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/parts",
    responses(
        (status = 200, description = "All parts", body = ApiResponse)
    )
)]
pub async fn list_parts_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list_parts().await {
        Ok(parts) => ok_response(json!({ "parts": parts })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/parts/{id}",
    params(("id" = i32, Path, description = "Part id")),
    responses(
        (status = 200, description = "Part", body = ApiResponse),
        (status = 404, description = "Part not found", body = ApiResponse)
    )
)]
pub async fn get_part_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.service.get_part(id).await {
        Ok(part) => ok_response(json!({ "part": part })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/parts/{id}",
    params(("id" = i32, Path, description = "Part id")),
    request_body = NewPart,
    responses(
        (status = 200, description = "Part updated", body = ApiResponse),
        (status = 404, description = "Part not found", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    )
)]
pub async fn update_part_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Result<Json<NewPart>, JsonRejection>,
) -> impl IntoResponse {
    let Json(update) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"name\", \"price\", ...}"),
    };
    match state.service.update_part(id, &update).await {
        Ok(part) => ok_response(json!({ "part": part })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/parts/{id}",
    params(("id" = i32, Path, description = "Part id")),
    responses(
        (status = 200, description = "Part deleted", body = ApiResponse),
        (status = 404, description = "Part not found", body = ApiResponse),
        (status = 409, description = "Part still referenced by maintenance events", body = ApiResponse)
    )
)]
pub async fn delete_part_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.service.delete_part(id).await {
        Ok(()) => ok_response(json!({ "message": "Part deleted" })),
        Err(e) => error_response(e),
    }
}
