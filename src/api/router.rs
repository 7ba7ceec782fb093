//! API Router with Swagger UI

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{ApiResponse, EmptyData};
use crate::api::handlers::{availability, capacity, health, pricing, room_types, AppState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Room types
        room_types::list_room_types,
        // Availability
        availability::list_availability,
        availability::room_type_availability,
        // Pricing
        pricing::quote_stay,
        // Capacity
        capacity::match_capacity,
    ),
    components(
        schemas(
            // Common
            ApiResponse<EmptyData>,
            // Room types
            room_types::RoomTypeDto,
            // Availability
            availability::AvailabilityDto,
            // Pricing
            pricing::QuoteRequest,
            pricing::QuoteResponse,
            pricing::NightDto,
            // Capacity
            capacity::MatchRequest,
            capacity::OccupancyDto,
            capacity::MatchResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server liveness probe for uptime monitoring."),
        (name = "RoomTypes", description = "Sellable room categories. Hidden types are excluded from every listing and from capacity matching."),
        (name = "Availability", description = "Free-room counts for a half-open date range `[check_in, check_out)`. Maintenance rooms never count; Cancelled and NoShow reservations never block."),
        (name = "Pricing", description = "Night-by-night stay pricing under a rate plan, with season overrides applied per night. Prices are in minor currency units (cents). A quote always includes the list of violated restrictions; empty means bookable."),
        (name = "Capacity", description = "Match a multi-room party against the inventory: a single cheapest room type when one fits, a multi-type fallback when capacity suffices, or the shortfall when it does not."),
    ),
    info(
        title = "Stay Pricing & Availability Engine API",
        version = "1.0.0",
        description = "REST API for querying room availability, pricing stays and matching \
party sizes against a property's room inventory.

## Conventions

Date ranges are half-open: `check_in` is the first occupied night, `check_out` is not occupied.
Monetary amounts are integers in minor currency units.

All responses are wrapped in a standard envelope:
```json
{\"success\": true, \"data\": {...}}
```

On error:
```json
{\"success\": false, \"error\": \"description\"}
```",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/room-types", get(room_types::list_room_types))
        .route("/availability", get(availability::list_availability))
        .route(
            "/availability/{room_type_id}",
            get(availability::room_type_availability),
        )
        .route("/pricing/quote", post(pricing::quote_stay))
        .route("/capacity/match", post(capacity::match_capacity))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────────────
