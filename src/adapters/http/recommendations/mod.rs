//! HTTP adapter for recommendation endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::RecommendationsAppState;
pub use routes::recommendations_router;
