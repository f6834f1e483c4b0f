use crate::app::inventory_service::InventoryService;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InventoryService>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn default_created_at() -> String {
    "created_at".to_string()
}

fn default_id() -> String {
    "id".to_string()
}

fn default_brand() -> String {
    "brand".to_string()
}

fn default_power() -> String {
    "power".to_string()
}

fn default_asc() -> String {
    "asc".to_string()
}

fn default_desc() -> String {
    "desc".to_string()
}

/// `GET /vehicles/filter` parameters. Absent `order_by`/`direction` take
/// the documented defaults; present-but-invalid values are rejected.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterVehiclesParams {
    pub owner: String,
    pub brand: String,
    /// `YYYY-MM-DD` lower bound on the creation date (exclusive).
    pub created_after: String,
    #[serde(default = "default_created_at")]
    pub order_by: String,
    #[serde(default = "default_desc")]
    pub direction: String,
}

/// `GET /vehicles/{id}/parts` parameters (ordering over part columns).
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VehiclePartsParams {
    #[serde(default = "default_id")]
    pub order_by: String,
    #[serde(default = "default_asc")]
    pub direction: String,
}

/// `PUT /vehicles/power-update` parameters.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PowerUpdateParams {
    pub brand: String,
    /// `YYYY-MM-DD` upper bound on the creation date (exclusive).
    pub created_before: String,
}

/// `GET /vehicles/by-brand` parameters; `order_by` is `brand` or
/// `vehicle_count`.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupByBrandParams {
    #[serde(default = "default_brand")]
    pub order_by: String,
    #[serde(default = "default_asc")]
    pub direction: String,
}

/// `GET /vehicles/sort` parameters.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortVehiclesParams {
    #[serde(default = "default_power")]
    pub order_by: String,
    #[serde(default = "default_desc")]
    pub direction: String,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
