//! The inventory service.
//!
//! This module is the only code that talks to PostgreSQL. It is responsible
//! for:
//! 1.  Creating the three inventory tables idempotently at startup.
//! 2.  The CRUD primitives for vehicles, parts, and maintenance events.
//! 3.  Executing the query composer's plans and applying the per-operation
//!     empty-result policy.
//!
//! Connections are acquired from the pool per call; nothing holds a session
//! across requests. The bulk power update is issued as one SQL statement, so
//! concurrent readers never observe a partially-updated set of rows.

use crate::domain::entity::{
    BrandCount, EntityKind, MaintenanceEvent, NewMaintenanceEvent, NewPart, NewVehicle, Part,
    UpdateMaintenanceEvent, UpdateVehicle, Vehicle,
};
use crate::domain::error::InventoryError;
use crate::domain::query::{self, VehicleFilter};
use crate::domain::validate::{ColumnRef, GroupOrdering, SortDirection};
use crate::infra::config;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub struct InventoryService {
    pool: PgPool,
}

impl InventoryService {
    /// Connects to the database from `DATABASE_URL` and ensures the schema
    /// exists.
    pub async fn connect() -> Result<Self, anyhow::Error> {
        dotenv::dotenv().ok();
        let database_url = config::database_url();

        let pool = PgPoolOptions::new()
            .max_connections(config::max_db_connections())
            .connect(&database_url)
            .await?;

        let service = Self::with_pool(pool).await?;
        Ok(service)
    }

    /// Wraps an existing pool (used by the integration tests) and ensures
    /// the schema exists.
    pub async fn with_pool(pool: PgPool) -> Result<Self, InventoryError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS vehicles (
                id SERIAL PRIMARY KEY,
                owner TEXT NOT NULL,
                brand TEXT NOT NULL,
                appearance TEXT,
                power INTEGER,
                max_speed INTEGER,
                created_at DATE NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS parts (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT,
                manufacturer TEXT,
                price DOUBLE PRECISION NOT NULL,
                guarantee_until DATE
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS maintenance_events (
                id SERIAL PRIMARY KEY,
                vehicle_id INTEGER NOT NULL REFERENCES vehicles(id),
                mechanic_name TEXT NOT NULL,
                issue_date DATE NOT NULL,
                appearance_part_id INTEGER REFERENCES parts(id),
                max_speed_part_id INTEGER REFERENCES parts(id),
                power_part_id INTEGER REFERENCES parts(id)
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ----- Vehicle CRUD -----

    pub async fn create_vehicle(&self, new: &NewVehicle) -> Result<Vehicle, InventoryError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (owner, brand, appearance, power, max_speed, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&new.owner)
        .bind(&new.brand)
        .bind(&new.appearance)
        .bind(new.power)
        .bind(new.max_speed)
        .bind(new.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(vehicle)
    }

    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, InventoryError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }

    pub async fn get_vehicle(&self, id: i32) -> Result<Vehicle, InventoryError> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound {
                entity: EntityKind::Vehicle,
                id,
            })
    }

    /// Full update of the mutable vehicle fields (`created_at` stays fixed).
    pub async fn update_vehicle(
        &self,
        id: i32,
        update: &UpdateVehicle,
    ) -> Result<Vehicle, InventoryError> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET owner = $1, brand = $2, appearance = $3, \
             power = $4, max_speed = $5 WHERE id = $6 RETURNING *",
        )
        .bind(&update.owner)
        .bind(&update.brand)
        .bind(&update.appearance)
        .bind(update.power)
        .bind(update.max_speed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            entity: EntityKind::Vehicle,
            id,
        })
    }

    pub async fn delete_vehicle(&self, id: i32) -> Result<(), InventoryError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(InventoryError::NotFound {
                entity: EntityKind::Vehicle,
                id,
            });
        }
        Ok(())
    }

    // ----- Part CRUD -----

    pub async fn create_part(&self, new: &NewPart) -> Result<Part, InventoryError> {
        let part = sqlx::query_as::<_, Part>(
            "INSERT INTO parts (name, category, manufacturer, price, guarantee_until) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(&new.manufacturer)
        .bind(new.price)
        .bind(new.guarantee_until)
        .fetch_one(&self.pool)
        .await?;
        Ok(part)
    }

    pub async fn list_parts(&self) -> Result<Vec<Part>, InventoryError> {
        let parts = sqlx::query_as::<_, Part>("SELECT * FROM parts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(parts)
    }

    pub async fn get_part(&self, id: i32) -> Result<Part, InventoryError> {
        sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound {
                entity: EntityKind::Part,
                id,
            })
    }

    pub async fn update_part(&self, id: i32, update: &NewPart) -> Result<Part, InventoryError> {
        sqlx::query_as::<_, Part>(
            "UPDATE parts SET name = $1, category = $2, manufacturer = $3, \
             price = $4, guarantee_until = $5 WHERE id = $6 RETURNING *",
        )
        .bind(&update.name)
        .bind(&update.category)
        .bind(&update.manufacturer)
        .bind(update.price)
        .bind(update.guarantee_until)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            entity: EntityKind::Part,
            id,
        })
    }

    pub async fn delete_part(&self, id: i32) -> Result<(), InventoryError> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(InventoryError::NotFound {
                entity: EntityKind::Part,
                id,
            });
        }
        Ok(())
    }

    // ----- Maintenance-event CRUD -----

    /// Inserts a maintenance event. The store enforces that `vehicle_id`
    /// and any part references resolve to existing rows; a dangling
    /// reference surfaces as `ReferentialViolation`.
    pub async fn create_event(
        &self,
        new: &NewMaintenanceEvent,
    ) -> Result<MaintenanceEvent, InventoryError> {
        let event = sqlx::query_as::<_, MaintenanceEvent>(
            "INSERT INTO maintenance_events \
             (vehicle_id, mechanic_name, issue_date, appearance_part_id, max_speed_part_id, power_part_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(new.vehicle_id)
        .bind(&new.mechanic_name)
        .bind(new.issue_date)
        .bind(new.appearance_part_id)
        .bind(new.max_speed_part_id)
        .bind(new.power_part_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    pub async fn list_events(&self) -> Result<Vec<MaintenanceEvent>, InventoryError> {
        let events =
            sqlx::query_as::<_, MaintenanceEvent>("SELECT * FROM maintenance_events ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(events)
    }

    pub async fn get_event(&self, id: i32) -> Result<MaintenanceEvent, InventoryError> {
        sqlx::query_as::<_, MaintenanceEvent>("SELECT * FROM maintenance_events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(InventoryError::NotFound {
                entity: EntityKind::MaintenanceEvent,
                id,
            })
    }

    /// Full update of the mutable event fields (`vehicle_id` stays fixed).
    pub async fn update_event(
        &self,
        id: i32,
        update: &UpdateMaintenanceEvent,
    ) -> Result<MaintenanceEvent, InventoryError> {
        sqlx::query_as::<_, MaintenanceEvent>(
            "UPDATE maintenance_events SET mechanic_name = $1, issue_date = $2, \
             appearance_part_id = $3, max_speed_part_id = $4, power_part_id = $5 \
             WHERE id = $6 RETURNING *",
        )
        .bind(&update.mechanic_name)
        .bind(update.issue_date)
        .bind(update.appearance_part_id)
        .bind(update.max_speed_part_id)
        .bind(update.power_part_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(InventoryError::NotFound {
            entity: EntityKind::MaintenanceEvent,
            id,
        })
    }

    pub async fn delete_event(&self, id: i32) -> Result<(), InventoryError> {
        let result = sqlx::query("DELETE FROM maintenance_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(InventoryError::NotFound {
                entity: EntityKind::MaintenanceEvent,
                id,
            });
        }
        Ok(())
    }

    // ----- Query surface -----

    /// Equality filter with a "created after" bound.
    ///
    /// Policy: an empty match is a reportable miss (`NoMatchingRecords`),
    /// unlike the listing queries below.
    pub async fn filter_vehicles(
        &self,
        filter: &VehicleFilter<'_>,
        order: ColumnRef,
        direction: SortDirection,
    ) -> Result<Vec<Vehicle>, InventoryError> {
        let mut plan = query::filter_vehicles(filter, order, direction);
        let vehicles = plan
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;
        if vehicles.is_empty() {
            return Err(InventoryError::NoMatchingRecords);
        }
        Ok(vehicles)
    }

    /// Parts associated with a vehicle through the appearance-change join.
    ///
    /// Policy: an empty match is a reportable miss (`NoMatchingRecords`).
    pub async fn parts_for_vehicle(
        &self,
        vehicle_id: i32,
        order: ColumnRef,
        direction: SortDirection,
    ) -> Result<Vec<Part>, InventoryError> {
        let mut plan = query::parts_for_vehicle(vehicle_id, order, direction);
        let parts = plan.build_query_as::<Part>().fetch_all(&self.pool).await?;
        if parts.is_empty() {
            return Err(InventoryError::NoMatchingRecords);
        }
        Ok(parts)
    }

    /// Bulk conditional power update; returns the number of rows affected.
    /// Zero affected rows is a successful no-op, not an error.
    pub async fn bump_power(
        &self,
        brand: &str,
        created_before: NaiveDate,
    ) -> Result<u64, InventoryError> {
        let mut plan = query::bump_power(brand, created_before);
        let result = plan.build().execute(&self.pool).await?;
        let updated = result.rows_affected();
        tracing::info!(brand, %created_before, updated, "bulk power update applied");
        Ok(updated)
    }

    /// Vehicle counts per brand. Policy: an empty store yields an empty
    /// sequence, never an error.
    pub async fn group_by_brand(
        &self,
        order: GroupOrdering,
        direction: SortDirection,
    ) -> Result<Vec<BrandCount>, InventoryError> {
        let mut plan = query::group_by_brand(order, direction);
        let groups = plan
            .build_query_as::<BrandCount>()
            .fetch_all(&self.pool)
            .await?;
        Ok(groups)
    }

    /// All vehicles under one validated ordering. Policy: empty is fine.
    pub async fn sort_vehicles(
        &self,
        order: ColumnRef,
        direction: SortDirection,
    ) -> Result<Vec<Vehicle>, InventoryError> {
        let mut plan = query::sort_vehicles(order, direction);
        let vehicles = plan
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;
        Ok(vehicles)
    }
}
