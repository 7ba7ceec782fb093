//! Stay pricing REST handlers

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::handlers::{engine_error_response, AppState};
use crate::api::validated_json::ValidatedJson;
use crate::domain::{NightBreakdown, PricingResult};

/// Request for a stay quote
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    /// Room type to price
    pub room_type_id: Uuid,
    /// Rate plan to price under
    pub rate_plan_id: Uuid,
    /// Arrival date (first occupied night)
    pub check_in: NaiveDate,
    /// Departure date (not occupied)
    pub check_out: NaiveDate,
}

/// One priced night
#[derive(Debug, Serialize, ToSchema)]
pub struct NightDto {
    pub day: NaiveDate,
    /// Nightly rate in minor currency units
    pub rate_cents: i64,
    /// Night is fully blocked by a closed date
    pub closed: bool,
    /// Closed to arrival applies on this night
    pub cta: bool,
    /// Closed to departure applies on this night
    pub ctd: bool,
    /// Minimum stay constraint active on this night
    pub min_stay: Option<u32>,
    /// Maximum stay constraint active on this night
    pub max_stay: Option<u32>,
}

impl From<NightBreakdown> for NightDto {
    fn from(n: NightBreakdown) -> Self {
        Self {
            day: n.day,
            rate_cents: n.rate_cents,
            closed: n.closed,
            cta: n.cta,
            ctd: n.ctd,
            min_stay: n.min_stay,
            max_stay: n.max_stay,
        }
    }
}

/// Priced stay with its restriction verdict
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub items: Vec<NightDto>,
    /// Pre-tax total in minor currency units
    pub total_cents: i64,
    /// Flat tax amount in minor currency units
    pub tax_cents: i64,
    /// Total including tax
    pub grand_total_cents: i64,
    /// Currency code (ISO 4217)
    pub currency: String,
    /// Pre-tax total formatted for display, e.g. `550.00 EUR`
    pub total_formatted: String,
    /// Why the stay cannot be booked; empty when bookable
    pub violations: Vec<String>,
    /// Convenience flag: violations is empty
    pub bookable: bool,
}

impl From<PricingResult> for QuoteResponse {
    fn from(result: PricingResult) -> Self {
        let total_formatted = result.format_total();
        let bookable = result.is_bookable();
        Self {
            items: result.items.into_iter().map(Into::into).collect(),
            total_cents: result.total_cents,
            tax_cents: result.tax_cents,
            grand_total_cents: result.grand_total_cents,
            currency: result.currency,
            total_formatted,
            violations: result.violations,
            bookable,
        }
    }
}

/// Price a stay night-by-night
///
/// Always returns the full breakdown plus the list of violated
/// restrictions; an empty list means the stay can be confirmed.
#[utoipa::path(
    post,
    path = "/api/v1/pricing/quote",
    tag = "Pricing",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Priced breakdown", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Invalid date range or unpriceable pairing"),
        (status = 404, description = "Unknown room type or rate plan")
    )
)]
pub async fn quote_stay(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Response {
    match state
        .resolver
        .price_stay(req.room_type_id, req.rate_plan_id, req.check_in, req.check_out)
        .await
    {
        Ok(result) => {
            Json(ApiResponse::success(QuoteResponse::from(result))).into_response()
        }
        Err(err) => engine_error_response(err),
    }
}
