//! HTTP adapter for progression endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::ProgressionAppState;
pub use routes::progression_router;
