use crate::domain::entity::{
    BrandCount, MaintenanceEvent, NewMaintenanceEvent, NewPart, NewVehicle, Part,
    UpdateMaintenanceEvent, UpdateVehicle, Vehicle,
};
use crate::transport::http::handlers::{events, health, parts, vehicles};
use crate::transport::http::types::ApiResponse;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        vehicles::create_vehicle_handler,
        vehicles::list_vehicles_handler,
        vehicles::get_vehicle_handler,
        vehicles::update_vehicle_handler,
        vehicles::delete_vehicle_handler,
        vehicles::filter_vehicles_handler,
        vehicles::vehicle_parts_handler,
        vehicles::power_update_handler,
        vehicles::group_by_brand_handler,
        vehicles::sort_vehicles_handler,
        parts::create_part_handler,
        parts::list_parts_handler,
        parts::get_part_handler,
        parts::update_part_handler,
        parts::delete_part_handler,
        events::create_event_handler,
        events::list_events_handler,
        events::get_event_handler,
        events::update_event_handler,
        events::delete_event_handler
    ),
    components(schemas(
        ApiResponse,
        Vehicle,
        NewVehicle,
        UpdateVehicle,
        Part,
        NewPart,
        MaintenanceEvent,
        NewMaintenanceEvent,
        UpdateMaintenanceEvent,
        BrandCount
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    // Static segments (filter/sort/by-brand/power-update) take precedence
    // over `/vehicles/:id` in axum's matcher.
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/vehicles",
            get(vehicles::list_vehicles_handler).post(vehicles::create_vehicle_handler),
        )
        .route("/vehicles/filter", get(vehicles::filter_vehicles_handler))
        .route("/vehicles/sort", get(vehicles::sort_vehicles_handler))
        .route("/vehicles/by-brand", get(vehicles::group_by_brand_handler))
        .route("/vehicles/power-update", put(vehicles::power_update_handler))
        .route(
            "/vehicles/:id",
            get(vehicles::get_vehicle_handler)
                .put(vehicles::update_vehicle_handler)
                .delete(vehicles::delete_vehicle_handler),
        )
        .route("/vehicles/:id/parts", get(vehicles::vehicle_parts_handler))
        .route(
            "/parts",
            get(parts::list_parts_handler).post(parts::create_part_handler),
        )
        .route(
            "/parts/:id",
            get(parts::get_part_handler)
                .put(parts::update_part_handler)
                .delete(parts::delete_part_handler),
        )
        .route(
            "/maintenance-events",
            get(events::list_events_handler).post(events::create_event_handler),
        )
        .route(
            "/maintenance-events/:id",
            get(events::get_event_handler)
                .put(events::update_event_handler)
                .delete(events::delete_event_handler),
        )
        .with_state(app_state)
}
