pub mod app;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::inventory_service::InventoryService;
pub use domain::entity::EntityKind;
pub use domain::error::InventoryError;
pub use domain::validate::{ColumnRef, GroupOrdering, SortDirection};
