//! Seasonal override rules
//!
//! A season override is a date-bounded rule set, scoped to one
//! (rate plan, room type) pair, that can change the nightly price and add
//! stay restrictions. Overlapping overrides for the same pair are legal at
//! write time; resolution is last-write-wins (see [`SeasonOverride::winning`]).

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Date-bounded price/restriction override for one (rate plan, room type) pair.
///
/// `start_date..=end_date` is inclusive on both ends, unlike stay ranges.
/// Optional fields use `None` for "absent"; a zero price override is a real
/// price of zero, not absence.
#[derive(Debug, Clone)]
pub struct SeasonOverride {
    pub id: Uuid,
    pub rate_plan_id: Uuid,
    pub room_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Replaces the base nightly rate inside the window, minor units
    pub price_override_cents: Option<i64>,
    /// Minimum stay length in nights, enforced against the whole stay
    pub min_stay: Option<u32>,
    /// Maximum stay length in nights, enforced against the whole stay
    pub max_stay: Option<u32>,
    /// Guests may not check in on nights inside the window
    pub closed_to_arrival: bool,
    /// Guests may not check out on the morning after the last night
    pub closed_to_departure: bool,
    /// Individual dates inside the window that are fully blocked,
    /// regardless of CTA/CTD
    pub closed_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl SeasonOverride {
    pub fn new(
        rate_plan_id: Uuid,
        room_type_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            rate_plan_id,
            room_type_id,
            start_date,
            end_date: end_date.max(start_date),
            price_override_cents: None,
            min_stay: None,
            max_stay: None,
            closed_to_arrival: false,
            closed_to_departure: false,
            closed_dates: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether `day` falls inside the inclusive override window
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Whether `day` is individually blocked by this override
    pub fn is_closed_on(&self, day: NaiveDate) -> bool {
        self.contains(day) && self.closed_dates.contains(&day)
    }

    /// Pick the override that wins for `day` among `candidates`.
    ///
    /// Overlapping overrides carry no explicit precedence in the data, so
    /// resolution is last-write-wins: greatest `(created_at, id)` among the
    /// overrides whose window contains `day`. The `id` tie-breaker makes
    /// the ordering total even for identical timestamps.
    pub fn winning<'a>(
        candidates: &'a [SeasonOverride],
        day: NaiveDate,
    ) -> Option<&'a SeasonOverride> {
        candidates
            .iter()
            .filter(|o| o.contains(day))
            .max_by_key(|o| (o.created_at, o.id))
    }
}

// ── Tests ──────────────────────────────────────────────────────
