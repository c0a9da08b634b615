//! HTTP adapters - JSON API over the engine's handlers.
//!
//! Each context has its own router, handlers, and DTOs. The API is a
//! thin boundary: request parsing, handler dispatch, error mapping.

pub mod progression;
pub mod recommendations;

mod error;

pub use error::ApiError;
pub use progression::{progression_router, ProgressionAppState};
pub use recommendations::{recommendations_router, RecommendationsAppState};
