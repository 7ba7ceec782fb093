//! Availability REST handlers

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{engine_error_response, AppState};
use crate::domain::AvailabilitySummary;

/// Date range for an availability query, `[check_in, check_out)`
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Arrival date (first occupied night)
    pub check_in: NaiveDate,
    /// Departure date (not occupied)
    pub check_out: NaiveDate,
}

/// Free-room count for one room type
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub room_type_id: Uuid,
    pub room_type_name: String,
    pub max_occupancy: u32,
    pub available_rooms: u32,
}

impl From<AvailabilitySummary> for AvailabilityDto {
    fn from(s: AvailabilitySummary) -> Self {
        Self {
            room_type_id: s.room_type_id,
            room_type_name: s.room_type_name,
            max_occupancy: s.max_occupancy,
            available_rooms: s.available_rooms,
        }
    }
}

/// Free rooms per visible room type for a date range
#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability per visible room type", body = ApiResponse<Vec<AvailabilityDto>>),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn list_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Response {
    match state
        .availability
        .summaries(query.check_in, query.check_out)
        .await
    {
        Ok(summaries) => {
            let items: Vec<AvailabilityDto> = summaries.into_iter().map(Into::into).collect();
            Json(ApiResponse::success(items)).into_response()
        }
        Err(err) => engine_error_response(err),
    }
}

/// Free-room count for a single room type
#[utoipa::path(
    get,
    path = "/api/v1/availability/{room_type_id}",
    tag = "Availability",
    params(
        ("room_type_id" = Uuid, Path, description = "Room type id"),
        AvailabilityQuery
    ),
    responses(
        (status = 200, description = "Free rooms for the room type", body = ApiResponse<u32>),
        (status = 400, description = "Invalid date range"),
        (status = 404, description = "Unknown room type")
    )
)]
pub async fn room_type_availability(
    State(state): State<AppState>,
    Path(room_type_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Response {
    match state
        .availability
        .rooms_available(room_type_id, query.check_in, query.check_out)
        .await
    {
        Ok(available) => Json(ApiResponse::success(available)).into_response(),
        Err(err) => engine_error_response(err),
    }
}
