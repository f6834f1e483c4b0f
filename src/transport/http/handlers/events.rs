//! Maintenance-event CRUD.
//!
//! Writes here carry the referential constraints: the owning vehicle and
//! any part references must resolve at the store, otherwise the request
//! ends with 409.

use crate::domain::entity::{NewMaintenanceEvent, UpdateMaintenanceEvent};
use crate::transport::http::handlers::common::{error_response, ok_response};
use crate::transport::http::types::{ApiResponse, AppState, json_422};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/maintenance-events",
    request_body = NewMaintenanceEvent,
    responses(
        (status = 200, description = "Maintenance event created", body = ApiResponse),
        (status = 409, description = "Vehicle or part reference does not resolve", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    )
)]
pub async fn create_event_handler(
    State(state): State<AppState>,
    request: Result<Json<NewMaintenanceEvent>, JsonRejection>,
) -> impl IntoResponse {
    let Json(new) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"vehicle_id\", \"mechanic_name\", \"issue_date\", ...}"),
    };
    match state.service.create_event(&new).await {
        Ok(event) => ok_response(json!({ "maintenance_event": event })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/maintenance-events",
    responses(
        (status = 200, description = "All maintenance events", body = ApiResponse)
    )
)]
pub async fn list_events_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list_events().await {
        Ok(events) => ok_response(json!({ "maintenance_events": events })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/maintenance-events/{id}",
    params(("id" = i32, Path, description = "Maintenance event id")),
    responses(
        (status = 200, description = "Maintenance event", body = ApiResponse),
        (status = 404, description = "Maintenance event not found", body = ApiResponse)
    )
)]
pub async fn get_event_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.service.get_event(id).await {
        Ok(event) => ok_response(json!({ "maintenance_event": event })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/maintenance-events/{id}",
    params(("id" = i32, Path, description = "Maintenance event id")),
    request_body = UpdateMaintenanceEvent,
    responses(
        (status = 200, description = "Maintenance event updated", body = ApiResponse),
        (status = 404, description = "Maintenance event not found", body = ApiResponse),
        (status = 409, description = "Part reference does not resolve", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    )
)]
pub async fn update_event_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Result<Json<UpdateMaintenanceEvent>, JsonRejection>,
) -> impl IntoResponse {
    let Json(update) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"mechanic_name\", \"issue_date\", ...}"),
    };
    match state.service.update_event(id, &update).await {
        Ok(event) => ok_response(json!({ "maintenance_event": event })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/maintenance-events/{id}",
    params(("id" = i32, Path, description = "Maintenance event id")),
    responses(
        (status = 200, description = "Maintenance event deleted", body = ApiResponse),
        (status = 404, description = "Maintenance event not found", body = ApiResponse)
    )
)]
pub async fn delete_event_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.service.delete_event(id).await {
        Ok(()) => ok_response(json!({ "message": "Maintenance event deleted" })),
        Err(e) => error_response(e),
    }
}
