//! REST API module for the stay engine
//!
//! Provides HTTP endpoints for room types, availability queries,
//! stay pricing quotes and capacity matching.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod validated_json;

pub use handlers::AppState;
pub use router::create_api_router;
