//! Capacity matching REST handlers

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::handlers::availability::AvailabilityDto;
use crate::api::handlers::pricing::QuoteResponse;
use crate::api::handlers::{engine_error_response, AppState};
use crate::api::validated_json::ValidatedJson;
use crate::domain::{MatchResult, OccupancyRequest};

/// One requested room with its occupancy
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct OccupancyDto {
    #[validate(range(max = 32, message = "at most 32 adults per room"))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 32, message = "at most 32 children per room"))]
    pub children: u32,
}

impl From<&OccupancyDto> for OccupancyRequest {
    fn from(dto: &OccupancyDto) -> Self {
        Self {
            adults: dto.adults,
            children: dto.children,
        }
    }
}

/// Request to match a party against the inventory
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MatchRequest {
    /// One entry per requested room
    #[validate(
        length(max = 50, message = "at most 50 rooms per request"),
        nested
    )]
    pub occupancies: Vec<OccupancyDto>,
    /// Arrival date (first occupied night)
    pub check_in: NaiveDate,
    /// Departure date (not occupied)
    pub check_out: NaiveDate,
}

/// Outcome of a capacity match
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResponse {
    /// One room type covers every requested room
    Direct {
        room_type_id: Uuid,
        room_type_name: String,
        rooms_needed: u32,
        available_rooms: u32,
        pricing: Option<QuoteResponse>,
    },
    /// A combination of types can cover the total guest count
    Fallback {
        total_guests: u32,
        total_capacity: u32,
        options: Vec<AvailabilityDto>,
    },
    /// The property cannot host this many guests in the range
    Infeasible {
        total_guests: u32,
        total_capacity: u32,
        shortfall: u32,
    },
}

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        match result {
            MatchResult::Direct {
                room_type_id,
                room_type_name,
                rooms_needed,
                available_rooms,
                pricing,
            } => Self::Direct {
                room_type_id,
                room_type_name,
                rooms_needed,
                available_rooms,
                pricing: pricing.map(Into::into),
            },
            MatchResult::Fallback {
                total_guests,
                total_capacity,
                options,
            } => Self::Fallback {
                total_guests,
                total_capacity,
                options: options.into_iter().map(Into::into).collect(),
            },
            MatchResult::Infeasible {
                total_guests,
                total_capacity,
                shortfall,
            } => Self::Infeasible {
                total_guests,
                total_capacity,
                shortfall,
            },
        }
    }
}

/// Match a party against the room inventory
///
/// Tries a single room type first; falls back to a multi-type capacity
/// check, and reports the shortfall when even that cannot host the party.
#[utoipa::path(
    post,
    path = "/api/v1/capacity/match",
    tag = "Capacity",
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Match outcome", body = ApiResponse<MatchResponse>),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn match_capacity(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<MatchRequest>,
) -> Response {
    let requested: Vec<OccupancyRequest> = req.occupancies.iter().map(Into::into).collect();

    match state
        .matcher
        .match_capacity(&requested, req.check_in, req.check_out)
        .await
    {
        Ok(result) => Json(ApiResponse::success(MatchResponse::from(result))).into_response(),
        Err(err) => engine_error_response(err),
    }
}
