//! HTTP adapter for admin operations, mounted at `/api/admin`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AdminAppState;
pub use routes::admin_routes;
