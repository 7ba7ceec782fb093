//! REST API handlers

pub mod availability;
pub mod capacity;
pub mod health;
pub mod pricing;
pub mod room_types;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::dto::{ApiResponse, EmptyData};
use crate::application::{AvailabilityService, CapacityMatcher, RateResolver};
use crate::domain::RepositoryProvider;
use crate::shared::EngineError;

/// Shared state for all engine routes
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub resolver: Arc<RateResolver>,
    pub availability: Arc<AvailabilityService>,
    pub matcher: Arc<CapacityMatcher>,
}

/// Map engine errors to HTTP responses.
///
/// Structural errors are the caller's to fix (400/404); only storage
/// failures surface as 500.
pub fn engine_error_response(err: EngineError) -> Response {
    let status = match &err {
        EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
        EngineError::InvalidRange { .. }
        | EngineError::NoAssignment { .. }
        | EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::<EmptyData>::error(err.to_string()))).into_response()
}

// ── Tests ──────────────────────────────────────────────────────
