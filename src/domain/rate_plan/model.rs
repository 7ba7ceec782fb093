//! Rate plan domain entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A sellable pricing scheme ("Flexible", "Non-refundable", ...)
#[derive(Debug, Clone)]
pub struct RatePlan {
    pub id: Uuid,
    pub name: String,
    /// Fallback nightly rate in minor units when a room type has no
    /// assignment for this plan. `None` means there is no fallback and
    /// unassigned room types cannot be priced under this plan.
    pub default_price_cents: Option<i64>,
    /// Currency code (ISO 4217)
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl RatePlan {
    pub fn new(name: impl Into<String>, default_price_cents: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            default_price_cents,
            currency: "EUR".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Links one room type to one rate plan with a price override.
///
/// Exactly one assignment per room type may be primary at steady state;
/// that is enforced by the assignment editing flow, not by this engine.
#[derive(Debug, Clone)]
pub struct RatePlanAssignment {
    pub id: Uuid,
    pub room_type_id: Uuid,
    pub rate_plan_id: Uuid,
    /// Nightly rate for this (room type, rate plan) pairing, minor units
    pub base_price_cents: i64,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl RatePlanAssignment {
    pub fn new(room_type_id: Uuid, rate_plan_id: Uuid, base_price_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_type_id,
            rate_plan_id,
            base_price_cents,
            is_primary: false,
            created_at: Utc::now(),
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_defaults_to_non_primary() {
        let a = RatePlanAssignment::new(Uuid::new_v4(), Uuid::new_v4(), 9_500);
        assert!(!a.is_primary);
        assert!(a.primary().is_primary);
    }

    #[test]
    fn plan_without_default_price_has_no_fallback() {
        let plan = RatePlan::new("Corporate", None);
        assert!(plan.default_price_cents.is_none());
    }
}
