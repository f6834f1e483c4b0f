//! Error taxonomy for the inventory service.
//!
//! Validation failures (`InvalidSortDirection`, `UnknownColumn`,
//! `InvalidDateFormat`) are detected before any query reaches the store.
//! `NoMatchingRecords` and `NotFound` are correct-but-empty outcomes that
//! specific operations treat as a client-visible miss. Store failures split
//! into `ReferentialViolation` (Postgres foreign-key error 23503) and
//! `StoreUnavailable` (everything else; surfaced as-is, no retry).

use crate::domain::entity::EntityKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("invalid sort direction '{0}': use 'asc' or 'desc'")]
    InvalidSortDirection(String),

    #[error("unknown column '{column}' for {entity}")]
    UnknownColumn { entity: EntityKind, column: String },

    #[error("invalid date '{0}': use 'YYYY-MM-DD'")]
    InvalidDateFormat(String),

    #[error("no records matched the given criteria")]
    NoMatchingRecords,

    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i32 },

    #[error("write references a row that does not exist: {0}")]
    ReferentialViolation(String),

    #[error("record store failure: {0}")]
    StoreUnavailable(#[source] sqlx::Error),
}

// Foreign-key violations get their own variant; everything else from the
// store is treated as the store failing the operation.
impl From<sqlx::Error> for InventoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23503") {
                return InventoryError::ReferentialViolation(db_err.message().to_string());
            }
        }
        InventoryError::StoreUnavailable(err)
    }
}
