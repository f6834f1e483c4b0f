pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod events;
    pub mod health;
    pub mod parts;
    pub mod vehicles;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
