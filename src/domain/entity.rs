//! Row types for the three inventory tables, plus the payload shapes the
//! HTTP layer accepts for creates and updates.
//!
//! Identities are assigned by the store (`SERIAL`) and never change after
//! insertion. Update payloads deliberately omit the fields that must stay
//! immutable: a vehicle's `created_at` and a maintenance event's `vehicle_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The entity kinds the validation layer knows allow-lists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Vehicle,
    Part,
    MaintenanceEvent,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vehicle => write!(f, "vehicle"),
            EntityKind::Part => write!(f, "part"),
            EntityKind::MaintenanceEvent => write!(f, "maintenance event"),
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Vehicle {
    pub id: i32,
    pub owner: String,
    pub brand: String,
    pub appearance: Option<String>,
    pub power: Option<i32>,
    pub max_speed: Option<i32>,
    pub created_at: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewVehicle {
    pub owner: String,
    pub brand: String,
    pub appearance: Option<String>,
    pub power: Option<i32>,
    pub max_speed: Option<i32>,
    pub created_at: NaiveDate,
}

/// Vehicle update payload. `created_at` is immutable and not accepted here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVehicle {
    pub owner: String,
    pub brand: String,
    pub appearance: Option<String>,
    pub power: Option<i32>,
    pub max_speed: Option<i32>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Part {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub price: f64,
    pub guarantee_until: Option<NaiveDate>,
}

/// Part payload, used for both create and full update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewPart {
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub price: f64,
    pub guarantee_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct MaintenanceEvent {
    pub id: i32,
    pub vehicle_id: i32,
    pub mechanic_name: String,
    pub issue_date: NaiveDate,
    pub appearance_part_id: Option<i32>,
    pub max_speed_part_id: Option<i32>,
    pub power_part_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewMaintenanceEvent {
    pub vehicle_id: i32,
    pub mechanic_name: String,
    pub issue_date: NaiveDate,
    pub appearance_part_id: Option<i32>,
    pub max_speed_part_id: Option<i32>,
    pub power_part_id: Option<i32>,
}

/// Maintenance-event update payload. The owning `vehicle_id` is immutable
/// and not accepted here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMaintenanceEvent {
    pub mechanic_name: String,
    pub issue_date: NaiveDate,
    pub appearance_part_id: Option<i32>,
    pub max_speed_part_id: Option<i32>,
    pub power_part_id: Option<i32>,
}

/// One summary row of the group-by-brand aggregate.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct BrandCount {
    pub brand: String,
    pub vehicle_count: i64,
}
