//! # Stay Pricing & Availability Engine
//!
//! Read-side engine for hotel inventory: prices stays night by night,
//! counts free rooms over half-open date ranges and matches party sizes
//! against the room inventory.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, calendar math and repository traits
//! - **application**: Pricing, availability and capacity-matching services
//! - **infrastructure**: In-memory storage and property snapshot loading
//! - **api**: REST API with Swagger documentation
//! - **shared**: Error taxonomy and graceful shutdown plumbing

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig, Config};

// Re-export storage types for easy access
pub use infrastructure::storage::InMemoryRepositoryProvider;

// Re-export API router
pub use api::{create_api_router, AppState};

pub use shared::errors::{EngineError, EngineResult};
