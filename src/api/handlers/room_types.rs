//! Room type REST handlers

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{engine_error_response, AppState};
use crate::domain::RoomType;

/// Sellable room category as exposed to clients
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomTypeDto {
    pub id: Uuid,
    pub name: String,
    pub max_occupancy: u32,
    /// Default nightly rate in minor currency units
    pub base_price_cents: i64,
}

impl From<RoomType> for RoomTypeDto {
    fn from(rt: RoomType) -> Self {
        Self {
            id: rt.id,
            name: rt.name,
            max_occupancy: rt.max_occupancy,
            base_price_cents: rt.base_price_cents,
        }
    }
}

/// List the visible room types
#[utoipa::path(
    get,
    path = "/api/v1/room-types",
    tag = "RoomTypes",
    responses(
        (status = 200, description = "Visible room types, sorted by name", body = ApiResponse<Vec<RoomTypeDto>>)
    )
)]
pub async fn list_room_types(State(state): State<AppState>) -> Response {
    match state.repos.rooms().list_visible_room_types().await {
        Ok(room_types) => {
            let items: Vec<RoomTypeDto> = room_types.into_iter().map(Into::into).collect();
            Json(ApiResponse::success(items)).into_response()
        }
        Err(err) => engine_error_response(err),
    }
}
