//! HTTP API for the dismantling panel

pub mod models;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use models::{error_codes, ApiError};
pub use routes::build_router;
