//! Query composer: turns validated inputs into executable `QueryBuilder`
//! plans against the record store.
//!
//! Column names reaching SQL text here come exclusively from [`ColumnRef`]
//! and [`GroupOrdering`] (static strings from the allow-lists); every value
//! is a bound parameter.

use crate::domain::entity::EntityKind;
use crate::domain::validate::{ColumnRef, GroupOrdering, SortDirection};
use chrono::NaiveDate;
use sqlx::{Postgres, QueryBuilder};

/// Equality predicates for the vehicle filter query, plus the
/// "created after" lower bound.
#[derive(Debug)]
pub struct VehicleFilter<'a> {
    pub owner: &'a str,
    pub brand: &'a str,
    pub created_after: NaiveDate,
}

/// `SELECT * FROM vehicles WHERE owner = $1 AND brand = $2 AND
/// created_at > $3 ORDER BY <column> <direction>`
pub fn filter_vehicles<'a>(
    filter: &VehicleFilter<'a>,
    order: ColumnRef,
    direction: SortDirection,
) -> QueryBuilder<'a, Postgres> {
    debug_assert_eq!(order.entity(), EntityKind::Vehicle);

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM vehicles WHERE owner = ");
    qb.push_bind(filter.owner);
    qb.push(" AND brand = ");
    qb.push_bind(filter.brand);
    qb.push(" AND created_at > ");
    qb.push_bind(filter.created_after);
    qb.push(" ORDER BY ");
    qb.push(order.name());
    qb.push(" ");
    qb.push(direction.as_sql());
    qb
}

/// Parts joined to maintenance events through the appearance-change
/// reference, filtered by the owning vehicle:
///
/// `SELECT parts.* FROM parts JOIN maintenance_events ON
/// parts.id = maintenance_events.appearance_part_id WHERE
/// maintenance_events.vehicle_id = $1 ORDER BY parts.<column> <direction>`
pub fn parts_for_vehicle(
    vehicle_id: i32,
    order: ColumnRef,
    direction: SortDirection,
) -> QueryBuilder<'static, Postgres> {
    debug_assert_eq!(order.entity(), EntityKind::Part);

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT parts.* FROM parts \
         JOIN maintenance_events ON parts.id = maintenance_events.appearance_part_id \
         WHERE maintenance_events.vehicle_id = ",
    );
    qb.push_bind(vehicle_id);
    qb.push(" ORDER BY parts.");
    qb.push(order.name());
    qb.push(" ");
    qb.push(direction.as_sql());
    qb
}

/// Bulk conditional update, one atomic statement:
///
/// `UPDATE vehicles SET power = (power * 12) / 10 WHERE brand = $1 AND
/// created_at < $2`
///
/// The `* 1.2` transform is written in integer arithmetic so the result
/// truncates like the integer column it is stored in (a numeric-to-integer
/// assignment cast would round instead).
pub fn bump_power(brand: &str, created_before: NaiveDate) -> QueryBuilder<'_, Postgres> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("UPDATE vehicles SET power = (power * 12) / 10 WHERE brand = ");
    qb.push_bind(brand);
    qb.push(" AND created_at < ");
    qb.push_bind(created_before);
    qb
}

/// `SELECT brand, COUNT(*) AS vehicle_count FROM vehicles GROUP BY brand
/// ORDER BY <brand|vehicle_count> <direction>`
pub fn group_by_brand(
    order: GroupOrdering,
    direction: SortDirection,
) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT brand, COUNT(*) AS vehicle_count FROM vehicles GROUP BY brand ORDER BY ",
    );
    qb.push(order.as_sql());
    qb.push(" ");
    qb.push(direction.as_sql());
    qb
}

/// `SELECT * FROM vehicles ORDER BY <column> <direction>`
pub fn sort_vehicles(
    order: ColumnRef,
    direction: SortDirection,
) -> QueryBuilder<'static, Postgres> {
    debug_assert_eq!(order.entity(), EntityKind::Vehicle);

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM vehicles ORDER BY ");
    qb.push(order.name());
    qb.push(" ");
    qb.push(direction.as_sql());
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle_col(name: &str) -> ColumnRef {
        ColumnRef::validate(EntityKind::Vehicle, name).unwrap()
    }

    fn part_col(name: &str) -> ColumnRef {
        ColumnRef::validate(EntityKind::Part, name).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn filter_plan_binds_values_and_inlines_validated_column() {
        let filter = VehicleFilter {
            owner: "John",
            brand: "Toyota",
            created_after: date("2020-01-01"),
        };
        let qb = filter_vehicles(&filter, vehicle_col("created_at"), SortDirection::Descending);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM vehicles WHERE owner = $1 AND brand = $2 \
             AND created_at > $3 ORDER BY created_at DESC"
        );
    }

    #[test]
    fn join_plan_goes_through_the_appearance_reference() {
        let qb = parts_for_vehicle(7, part_col("price"), SortDirection::Ascending);
        assert_eq!(
            qb.sql(),
            "SELECT parts.* FROM parts \
             JOIN maintenance_events ON parts.id = maintenance_events.appearance_part_id \
             WHERE maintenance_events.vehicle_id = $1 ORDER BY parts.price ASC"
        );
    }

    #[test]
    fn bump_power_is_a_single_statement_with_integer_arithmetic() {
        let qb = bump_power("BMW", date("2020-01-01"));
        assert_eq!(
            qb.sql(),
            "UPDATE vehicles SET power = (power * 12) / 10 WHERE brand = $1 AND created_at < $2"
        );
    }

    #[test]
    fn group_plan_orders_by_count_or_key() {
        let by_count = group_by_brand(GroupOrdering::VehicleCount, SortDirection::Descending);
        assert_eq!(
            by_count.sql(),
            "SELECT brand, COUNT(*) AS vehicle_count FROM vehicles GROUP BY brand \
             ORDER BY vehicle_count DESC"
        );
        let by_brand = group_by_brand(GroupOrdering::Brand, SortDirection::Ascending);
        assert_eq!(
            by_brand.sql(),
            "SELECT brand, COUNT(*) AS vehicle_count FROM vehicles GROUP BY brand \
             ORDER BY brand ASC"
        );
    }

    #[test]
    fn sort_plan_has_no_filter() {
        let qb = sort_vehicles(vehicle_col("power"), SortDirection::Descending);
        assert_eq!(qb.sql(), "SELECT * FROM vehicles ORDER BY power DESC");
    }
}
