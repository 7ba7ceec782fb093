//! Capacity matcher: direct and multi-room-type matching
//!
//! Given one occupancy entry per requested room, find a single room type
//! that covers the whole request, or expose the multi-room feasibility
//! boundary so a downstream selector (human or greedy) can combine types.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{
    AvailabilitySummary, MatchResult, OccupancyRequest, PricingResult, RepositoryProvider,
    StayRange,
};
use crate::shared::EngineResult;

use super::availability::AvailabilityService;
use super::rate_resolver::RateResolver;

/// Per-type facts gathered while scanning for a direct match
struct Candidate {
    summary: AvailabilitySummary,
    base_price_cents: i64,
    pricing: Option<PricingResult>,
}

/// Service matching a requested occupancy against the room inventory
pub struct CapacityMatcher {
    repos: Arc<dyn RepositoryProvider>,
    availability: Arc<AvailabilityService>,
    resolver: Arc<RateResolver>,
}

impl CapacityMatcher {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        availability: Arc<AvailabilityService>,
        resolver: Arc<RateResolver>,
    ) -> Self {
        Self {
            repos,
            availability,
            resolver,
        }
    }

    /// Match one occupancy entry per requested room against the inventory.
    ///
    /// Direct path: a visible room type qualifies when it has enough free
    /// rooms for the whole request, every room's guest count fits its
    /// occupancy, and its priced stay (via the primary rate plan) is
    /// restriction-clean. The cheapest qualifying type wins, name breaking
    /// ties. A type with no primary rate plan cannot be priced and is
    /// skipped here but still counts toward fallback capacity.
    ///
    /// Fallback path: feasible iff the summed `available × max_occupancy`
    /// over all visible types covers the total guest count; otherwise
    /// infeasible with the shortfall.
    pub async fn match_capacity(
        &self,
        requested: &[OccupancyRequest],
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> EngineResult<MatchResult> {
        StayRange::new(check_in, check_out)?;

        let rooms_needed = requested.len().max(1) as u32;
        let total_guests = requested
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.guests()));
        let largest_room: u32 = requested.iter().map(|r| r.guests()).max().unwrap_or(0);

        let summaries = self.availability.summaries(check_in, check_out).await?;

        let mut candidates = Vec::new();
        for summary in &summaries {
            if summary.available_rooms < rooms_needed || summary.max_occupancy < largest_room {
                continue;
            }
            let Some(assignment) = self
                .repos
                .rate_plans()
                .find_primary_assignment(summary.room_type_id)
                .await?
            else {
                continue;
            };
            let pricing = self
                .resolver
                .price_stay(
                    summary.room_type_id,
                    assignment.rate_plan_id,
                    check_in,
                    check_out,
                )
                .await?;
            if !pricing.is_bookable() {
                continue;
            }
            candidates.push(Candidate {
                summary: summary.clone(),
                base_price_cents: assignment.base_price_cents,
                pricing: Some(pricing),
            });
        }

        // Zero guests: any visible type with a free room is a trivial
        // match; skip the pricing requirement so a bare inventory works
        if total_guests == 0 {
            if let Some(summary) = summaries.iter().find(|s| s.available_rooms > 0) {
                return Ok(MatchResult::Direct {
                    room_type_id: summary.room_type_id,
                    room_type_name: summary.room_type_name.clone(),
                    rooms_needed,
                    available_rooms: summary.available_rooms,
                    pricing: None,
                });
            }
        }

        if let Some(winner) = candidates.into_iter().min_by(|a, b| {
            a.base_price_cents
                .cmp(&b.base_price_cents)
                .then_with(|| a.summary.room_type_name.cmp(&b.summary.room_type_name))
        }) {
            debug!(
                room_type = %winner.summary.room_type_name,
                rooms_needed,
                total_guests,
                "Direct capacity match"
            );
            return Ok(MatchResult::Direct {
                room_type_id: winner.summary.room_type_id,
                room_type_name: winner.summary.room_type_name,
                rooms_needed,
                available_rooms: winner.summary.available_rooms,
                pricing: winner.pricing,
            });
        }

        // Fallback: every visible type with a free room contributes, even
        // those too small for any single requested room
        let options: Vec<AvailabilitySummary> = summaries
            .into_iter()
            .filter(|s| s.available_rooms > 0)
            .collect();
        let total_capacity = options
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.capacity()));

        if total_capacity < total_guests {
            let shortfall = total_guests - total_capacity;
            debug!(total_guests, total_capacity, shortfall, "Capacity infeasible");
            return Ok(MatchResult::Infeasible {
                total_guests,
                total_capacity,
                shortfall,
            });
        }

        debug!(total_guests, total_capacity, options = options.len(), "Fallback capacity match");
        Ok(MatchResult::Fallback {
            total_guests,
            total_capacity,
            options,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
