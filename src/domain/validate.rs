//! Validation layer: everything stringly-typed coming from the request
//! surface is checked here before the query composer ever sees it.
//!
//! Sort columns are resolved against static per-entity allow-lists. A
//! successful lookup returns a [`ColumnRef`] carrying the `&'static str`
//! from the list itself, so user-supplied text never becomes SQL text.

use crate::domain::entity::EntityKind;
use crate::domain::error::InventoryError;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Accepts exactly `"asc"` or `"desc"` (case-sensitive). Anything else
    /// is rejected, never defaulted.
    pub fn parse(token: &str) -> Result<Self, InventoryError> {
        match token {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(InventoryError::InvalidSortDirection(other.to_string())),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

pub const VEHICLE_COLUMNS: &[&str] = &[
    "id",
    "owner",
    "brand",
    "appearance",
    "power",
    "max_speed",
    "created_at",
];

pub const PART_COLUMNS: &[&str] = &[
    "id",
    "name",
    "category",
    "manufacturer",
    "price",
    "guarantee_until",
];

pub const EVENT_COLUMNS: &[&str] = &[
    "id",
    "vehicle_id",
    "mechanic_name",
    "issue_date",
    "appearance_part_id",
    "max_speed_part_id",
    "power_part_id",
];

/// A column name that has passed the allow-list for its entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    entity: EntityKind,
    name: &'static str,
}

impl ColumnRef {
    pub fn validate(entity: EntityKind, name: &str) -> Result<Self, InventoryError> {
        let allowed = match entity {
            EntityKind::Vehicle => VEHICLE_COLUMNS,
            EntityKind::Part => PART_COLUMNS,
            EntityKind::MaintenanceEvent => EVENT_COLUMNS,
        };
        match allowed.iter().find(|candidate| **candidate == name) {
            Some(column) => Ok(ColumnRef { entity, name: column }),
            None => Err(InventoryError::UnknownColumn {
                entity,
                column: name.to_string(),
            }),
        }
    }

    pub fn entity(self) -> EntityKind {
        self.entity
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// Sort target for the group-by-brand aggregate: the group key or the
/// computed count. A grouped query cannot order by any other vehicle
/// column (not valid SQL), so everything else is an unknown column here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrdering {
    Brand,
    VehicleCount,
}

impl GroupOrdering {
    pub fn validate(name: &str) -> Result<Self, InventoryError> {
        match name {
            "brand" => Ok(GroupOrdering::Brand),
            "vehicle_count" => Ok(GroupOrdering::VehicleCount),
            other => Err(InventoryError::UnknownColumn {
                entity: EntityKind::Vehicle,
                column: other.to_string(),
            }),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            GroupOrdering::Brand => "brand",
            GroupOrdering::VehicleCount => "vehicle_count",
        }
    }
}

/// Strict `YYYY-MM-DD` parsing. The shape check rejects variants chrono
/// would otherwise accept (e.g. `2020-1-1`), so only the canonical ISO
/// form passes.
pub fn parse_date(text: &str) -> Result<NaiveDate, InventoryError> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(InventoryError::InvalidDateFormat(text.to_string()));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| InventoryError::InvalidDateFormat(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_accepts_exact_tokens_only() {
        assert_eq!(SortDirection::parse("asc").unwrap(), SortDirection::Ascending);
        assert_eq!(SortDirection::parse("desc").unwrap(), SortDirection::Descending);
        for bad in ["ASC", "Desc", "ascending", "", "up"] {
            assert!(matches!(
                SortDirection::parse(bad),
                Err(InventoryError::InvalidSortDirection(_))
            ));
        }
    }

    #[test]
    fn every_allow_listed_column_validates() {
        for (kind, columns) in [
            (EntityKind::Vehicle, VEHICLE_COLUMNS),
            (EntityKind::Part, PART_COLUMNS),
            (EntityKind::MaintenanceEvent, EVENT_COLUMNS),
        ] {
            for column in columns {
                let col = ColumnRef::validate(kind, column).unwrap();
                assert_eq!(col.name(), *column);
                assert_eq!(col.entity(), kind);
            }
        }
    }

    #[test]
    fn unknown_columns_are_rejected() {
        for bad in ["__class__", "password", "owner; DROP TABLE vehicles", "Power"] {
            assert!(matches!(
                ColumnRef::validate(EntityKind::Vehicle, bad),
                Err(InventoryError::UnknownColumn { .. })
            ));
        }
        // Columns of one entity are not valid for another.
        assert!(ColumnRef::validate(EntityKind::Part, "owner").is_err());
        assert!(ColumnRef::validate(EntityKind::Vehicle, "price").is_err());
    }

    #[test]
    fn group_ordering_is_key_or_count_only() {
        assert_eq!(GroupOrdering::validate("brand").unwrap(), GroupOrdering::Brand);
        assert_eq!(
            GroupOrdering::validate("vehicle_count").unwrap(),
            GroupOrdering::VehicleCount
        );
        assert!(GroupOrdering::validate("power").is_err());
    }

    #[test]
    fn parse_date_accepts_canonical_iso_only() {
        assert_eq!(
            parse_date("2020-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        for bad in [
            "2020-1-1",
            "01-01-2020",
            "2020/01/01",
            "2020-01-01T00:00:00",
            "2020-13-01",
            "2021-02-29",
            "yesterday",
            "",
        ] {
            assert!(
                matches!(parse_date(bad), Err(InventoryError::InvalidDateFormat(_))),
                "expected rejection for {bad:?}"
            );
        }
    }
}
