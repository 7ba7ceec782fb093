//! Core business entities, types and repository traits

pub mod calendar;
pub mod capacity;
pub mod pricing;
pub mod rate_plan;
pub mod reservation;
pub mod room;
pub mod season;

// Re-export commonly used types
pub use calendar::StayRange;
pub use capacity::{
    AvailabilitySummary, MatchResult, OccupancyRequest, RoomSelection, SelectionError,
    SelectionEvent,
};
pub use pricing::{format_cents, NightBreakdown, PricingResult};
pub use rate_plan::{RatePlan, RatePlanAssignment, RatePlanRepository};
pub use reservation::{Reservation, ReservationRepository, ReservationStatus};
pub use room::{Room, RoomRepository, RoomStatus, RoomType};
pub use season::{SeasonOverride, SeasonRepository};

pub use crate::shared::{EngineError, EngineResult};

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides read-only access to all domain repositories.
///
/// The engine is a pure function of the snapshot behind these accessors;
/// consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let rt = repos.rooms().find_room_type(id).await?;
///     let seasons = repos.seasons().list_for_pair(plan_id, rt.id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn RoomRepository;
    fn rate_plans(&self) -> &dyn RatePlanRepository;
    fn seasons(&self) -> &dyn SeasonRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
