//! Vehicle CRUD plus the filtered/sorted/grouped query endpoints.
//!
//! Handlers run the validation layer on every stringly parameter before the
//! service is invoked; validation failures terminate the request with 400.

use crate::domain::entity::{EntityKind, NewVehicle, UpdateVehicle};
use crate::domain::query::VehicleFilter;
use crate::domain::validate::{self, ColumnRef, GroupOrdering, SortDirection};
use crate::transport::http::handlers::common::{error_response, ok_response};
use crate::transport::http::types::{
    ApiResponse, AppState, FilterVehiclesParams, GroupByBrandParams, PowerUpdateParams,
    SortVehiclesParams, VehiclePartsParams, json_422,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

#[utoipa::path(
    post,
    path = "/vehicles",
    request_body = NewVehicle,
    responses(
        (status = 200, description = "Vehicle created", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 503, description = "Record store failure", body = ApiResponse)
    )
)]
pub async fn create_vehicle_handler(
    State(state): State<AppState>,
    request: Result<Json<NewVehicle>, JsonRejection>,
) -> impl IntoResponse {
    let Json(new) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"owner\", \"brand\", \"created_at\", ...}"),
    };
    match state.service.create_vehicle(&new).await {
        Ok(vehicle) => ok_response(json!({ "vehicle": vehicle })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/vehicles",
    responses(
        (status = 200, description = "All vehicles", body = ApiResponse),
        (status = 503, description = "Record store failure", body = ApiResponse)
    )
)]
pub async fn list_vehicles_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list_vehicles().await {
        Ok(vehicles) => ok_response(json!({ "vehicles": vehicles })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle", body = ApiResponse),
        (status = 404, description = "Vehicle not found", body = ApiResponse)
    )
)]
pub async fn get_vehicle_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.service.get_vehicle(id).await {
        Ok(vehicle) => ok_response(json!({ "vehicle": vehicle })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    params(("id" = i32, Path, description = "Vehicle id")),
    request_body = UpdateVehicle,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse),
        (status = 404, description = "Vehicle not found", body = ApiResponse),
        (status = 422, description = "Invalid JSON body", body = ApiResponse)
    )
)]
pub async fn update_vehicle_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    request: Result<Json<UpdateVehicle>, JsonRejection>,
) -> impl IntoResponse {
    let Json(update) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"owner\", \"brand\", ...}"),
    };
    match state.service.update_vehicle(id, &update).await {
        Ok(vehicle) => ok_response(json!({ "vehicle": vehicle })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/vehicles/{id}",
    params(("id" = i32, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Vehicle deleted", body = ApiResponse),
        (status = 404, description = "Vehicle not found", body = ApiResponse),
        (status = 409, description = "Vehicle still referenced by maintenance events", body = ApiResponse)
    )
)]
pub async fn delete_vehicle_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.service.delete_vehicle(id).await {
        Ok(()) => ok_response(json!({ "message": "Vehicle deleted" })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/vehicles/filter",
    params(FilterVehiclesParams),
    responses(
        (status = 200, description = "Matching vehicles", body = ApiResponse),
        (status = 400, description = "Invalid date, column, or direction", body = ApiResponse),
        (status = 404, description = "No vehicles matched", body = ApiResponse)
    )
)]
pub async fn filter_vehicles_handler(
    State(state): State<AppState>,
    Query(params): Query<FilterVehiclesParams>,
) -> impl IntoResponse {
    let created_after = match validate::parse_date(&params.created_after) {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };
    let order = match ColumnRef::validate(EntityKind::Vehicle, &params.order_by) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let direction = match SortDirection::parse(&params.direction) {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };

    let filter = VehicleFilter {
        owner: &params.owner,
        brand: &params.brand,
        created_after,
    };
    match state.service.filter_vehicles(&filter, order, direction).await {
        Ok(vehicles) => ok_response(json!({ "vehicles": vehicles })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/vehicles/{id}/parts",
    params(
        ("id" = i32, Path, description = "Vehicle id"),
        VehiclePartsParams
    ),
    responses(
        (status = 200, description = "Parts installed on the vehicle (appearance changes)", body = ApiResponse),
        (status = 400, description = "Invalid column or direction", body = ApiResponse),
        (status = 404, description = "No parts found for this vehicle", body = ApiResponse)
    )
)]
pub async fn vehicle_parts_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(params): Query<VehiclePartsParams>,
) -> impl IntoResponse {
    let order = match ColumnRef::validate(EntityKind::Part, &params.order_by) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let direction = match SortDirection::parse(&params.direction) {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };
    match state.service.parts_for_vehicle(id, order, direction).await {
        Ok(parts) => ok_response(json!({ "parts": parts })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    put,
    path = "/vehicles/power-update",
    params(PowerUpdateParams),
    responses(
        (status = 200, description = "Bulk update applied (possibly to zero rows)", body = ApiResponse),
        (status = 400, description = "Invalid date", body = ApiResponse)
    )
)]
pub async fn power_update_handler(
    State(state): State<AppState>,
    Query(params): Query<PowerUpdateParams>,
) -> impl IntoResponse {
    let created_before = match validate::parse_date(&params.created_before) {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };
    match state.service.bump_power(&params.brand, created_before).await {
        Ok(updated) => ok_response(json!({
            "message": format!("{} vehicle(s) power updated successfully.", updated),
            "updated_count": updated
        })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/vehicles/by-brand",
    params(GroupByBrandParams),
    responses(
        (status = 200, description = "Vehicle counts per brand", body = ApiResponse),
        (status = 400, description = "Invalid column or direction", body = ApiResponse)
    )
)]
pub async fn group_by_brand_handler(
    State(state): State<AppState>,
    Query(params): Query<GroupByBrandParams>,
) -> impl IntoResponse {
    let order = match GroupOrdering::validate(&params.order_by) {
        Ok(o) => o,
        Err(e) => return error_response(e),
    };
    let direction = match SortDirection::parse(&params.direction) {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };
    match state.service.group_by_brand(order, direction).await {
        Ok(groups) => ok_response(json!({ "brands": groups })),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/vehicles/sort",
    params(SortVehiclesParams),
    responses(
        (status = 200, description = "All vehicles, ordered", body = ApiResponse),
        (status = 400, description = "Invalid column or direction", body = ApiResponse)
    )
)]
pub async fn sort_vehicles_handler(
    State(state): State<AppState>,
    Query(params): Query<SortVehiclesParams>,
) -> impl IntoResponse {
    let order = match ColumnRef::validate(EntityKind::Vehicle, &params.order_by) {
        Ok(c) => c,
        Err(e) => return error_response(e),
    };
    let direction = match SortDirection::parse(&params.direction) {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };
    match state.service.sort_vehicles(order, direction).await {
        Ok(vehicles) => ok_response(json!({ "vehicles": vehicles })),
        Err(e) => error_response(e),
    }
}
