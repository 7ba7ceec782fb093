//! Rate resolver: per-night pricing and restriction evaluation
//!
//! For one (room type, rate plan, stay range) the resolver produces a
//! night-by-night price breakdown and the list of violated restrictions.
//! It never rejects a structurally valid stay: even a fully closed range
//! comes back priced, so callers can show guests exactly why the dates
//! are blocked.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    format_cents, NightBreakdown, PricingResult, RepositoryProvider, SeasonOverride, StayRange,
};
use crate::shared::{EngineError, EngineResult};

/// Service resolving nightly rates and stay restrictions
pub struct RateResolver {
    repos: Arc<dyn RepositoryProvider>,
    /// Flat tax percentage applied on top of the nightly sum, in basis
    /// points (725 = 7.25%). Zero disables the tax line.
    tax_basis_points: i64,
}

impl RateResolver {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            tax_basis_points: 0,
        }
    }

    pub fn with_tax_percent(mut self, tax_percent: f64) -> Self {
        self.tax_basis_points = (tax_percent * 100.0).round() as i64;
        self
    }

    /// Price a stay night-by-night.
    ///
    /// Per night in `[check_in, check_out)`:
    /// - base rate: the (room type, rate plan) assignment price, else the
    ///   plan's default price; neither present → `NoAssignment`
    /// - the last-write-wins season override may replace the rate and
    ///   carries the night's min/max stay constraint
    /// - closed dates, CTA on the first night and CTD on the last night
    ///   are flagged if ANY override matching the night sets them
    ///
    /// Violations are ordered: closed nights (chronological), CTA, CTD,
    /// min stay, max stay.
    pub async fn price_stay(
        &self,
        room_type_id: Uuid,
        rate_plan_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> EngineResult<PricingResult> {
        let range = StayRange::new(check_in, check_out)?;

        let room_type = self
            .repos
            .rooms()
            .find_room_type(room_type_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "RoomType",
                field: "id",
                value: room_type_id.to_string(),
            })?;

        let plan = self
            .repos
            .rate_plans()
            .find_rate_plan(rate_plan_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "RatePlan",
                field: "id",
                value: rate_plan_id.to_string(),
            })?;

        let assignment = self
            .repos
            .rate_plans()
            .find_assignment(room_type_id, rate_plan_id)
            .await?;

        let base_rate = assignment
            .map(|a| a.base_price_cents)
            .or(plan.default_price_cents)
            .ok_or(EngineError::NoAssignment {
                room_type_id: room_type_id.to_string(),
                rate_plan_id: rate_plan_id.to_string(),
            })?;

        let seasons = self
            .repos
            .seasons()
            .list_for_pair(rate_plan_id, room_type_id)
            .await?;

        let total_nights = range.nights();
        let last_night = range.last_night();

        let mut items = Vec::with_capacity(total_nights as usize);
        let mut closed_violations = Vec::new();
        let mut cta_violation = None;
        let mut ctd_violation = None;
        // Identical breached constraint values are reported once, not
        // once per night; BTreeSet keeps the report order stable.
        let mut breached_min_stays: BTreeSet<u32> = BTreeSet::new();
        let mut breached_max_stays: BTreeSet<u32> = BTreeSet::new();

        for day in range.iter_nights() {
            let winner = SeasonOverride::winning(&seasons, day);
            let matching: Vec<&SeasonOverride> =
                seasons.iter().filter(|o| o.contains(day)).collect();

            let rate_cents = winner
                .and_then(|o| o.price_override_cents)
                .unwrap_or(base_rate);

            let closed = matching.iter().any(|o| o.is_closed_on(day));
            if closed {
                closed_violations.push(format!("closed on {day}"));
            }

            let cta = day == check_in && matching.iter().any(|o| o.closed_to_arrival);
            if cta {
                cta_violation = Some(format!("closed to arrival on {check_in}"));
            }

            let ctd = day == last_night && matching.iter().any(|o| o.closed_to_departure);
            if ctd {
                ctd_violation = Some(format!("closed to departure on {check_out}"));
            }

            let min_stay = winner.and_then(|o| o.min_stay);
            let max_stay = winner.and_then(|o| o.max_stay);
            // Night-scoped constraints are enforced against the whole
            // stay length, not the sub-range inside the override window
            if let Some(min) = min_stay {
                if total_nights < min {
                    breached_min_stays.insert(min);
                }
            }
            if let Some(max) = max_stay {
                if total_nights > max {
                    breached_max_stays.insert(max);
                }
            }

            items.push(NightBreakdown {
                day,
                rate_cents,
                closed,
                cta,
                ctd,
                min_stay,
                max_stay,
            });
        }

        let mut violations = closed_violations;
        violations.extend(cta_violation);
        violations.extend(ctd_violation);
        for min in breached_min_stays {
            violations.push(format!(
                "minimum stay of {min} nights required, stay is {total_nights}"
            ));
        }
        for max in breached_max_stays {
            violations.push(format!(
                "maximum stay of {max} nights exceeded, stay is {total_nights}"
            ));
        }

        // Closed nights still accumulate their would-be rate for display;
        // the violation list alone blocks the booking
        let total_cents: i64 = items.iter().map(|n| n.rate_cents).sum();
        let tax_cents = (total_cents * self.tax_basis_points + 5_000) / 10_000;

        let result = PricingResult {
            items,
            total_cents,
            tax_cents,
            grand_total_cents: total_cents + tax_cents,
            currency: plan.currency.clone(),
            violations,
        };

        debug!(
            room_type = %room_type.name,
            rate_plan = %plan.name,
            %check_in,
            %check_out,
            total = %format_cents(result.total_cents, &result.currency),
            violations = result.violations.len(),
            "Stay priced"
        );

        Ok(result)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::domain::{RatePlan, RatePlanAssignment, RoomType};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    struct Fixture {
        store: Arc<InMemoryRepositoryProvider>,
        deluxe: RoomType,
        plan: RatePlan,
    }

    /// Deluxe (occ 2, base 100.00) linked to a "Standard" rate plan at the
    /// same 100.00 nightly rate
    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryRepositoryProvider::new());
        let deluxe = RoomType::new("Deluxe", 2, 10_000);
        let plan = RatePlan::new("Standard", Some(10_000));
        store.insert_room_type(deluxe.clone());
        store.insert_rate_plan(plan.clone());
        store.insert_assignment(RatePlanAssignment::new(deluxe.id, plan.id, 10_000).primary());
        Fixture {
            store,
            deluxe,
            plan,
        }
    }

    fn resolver(fx: &Fixture) -> RateResolver {
        RateResolver::new(fx.store.clone())
    }

    #[tokio::test]
    async fn christmas_override_scenario() {
        // Dec 24-26 priced at 150.00 and closed to arrival; stay Dec 24-27
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 12, 24), d(2024, 12, 26));
        season.price_override_cents = Some(15_000);
        season.closed_to_arrival = true;
        fx.store.insert_season(season);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 12, 24), d(2024, 12, 27))
            .await
            .unwrap();

        let rates: Vec<i64> = result.items.iter().map(|n| n.rate_cents).collect();
        assert_eq!(rates, vec![15_000, 15_000, 15_000]);
        assert_eq!(result.total_cents, 45_000);
        assert!(result.items[0].cta);
        assert!(!result.items[1].cta);
        assert_eq!(
            result.violations,
            vec!["closed to arrival on 2024-12-24".to_string()]
        );
        assert!(!result.is_bookable());
    }

    #[tokio::test]
    async fn night_past_the_override_window_uses_base_rate() {
        // Stay Dec 24-28: three override nights at 150.00, Dec 27 at base
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 12, 24), d(2024, 12, 26));
        season.price_override_cents = Some(15_000);
        fx.store.insert_season(season);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 12, 24), d(2024, 12, 28))
            .await
            .unwrap();

        let rates: Vec<i64> = result.items.iter().map(|n| n.rate_cents).collect();
        assert_eq!(rates, vec![15_000, 15_000, 15_000, 10_000]);
        assert_eq!(result.total_cents, 55_000);
        assert!(result.is_bookable());
        assert_eq!(result.format_total(), "550.00 EUR");
    }

    #[tokio::test]
    async fn nights_between_matches_item_count() {
        let fx = fixture();
        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 6, 1), d(2024, 6, 8))
            .await
            .unwrap();
        assert_eq!(result.items.len() as u32, 7);
        assert_eq!(result.nights(), 7);
    }

    #[tokio::test]
    async fn zero_night_stay_fails_fast() {
        let fx = fixture();
        let err = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 6, 1), d(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn unknown_room_type_and_rate_plan() {
        let fx = fixture();
        let err = resolver(&fx)
            .price_stay(Uuid::new_v4(), fx.plan.id, d(2024, 6, 1), d(2024, 6, 2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::NotFound {
                entity: "RoomType",
                ..
            }
        ));

        let err = resolver(&fx)
            .price_stay(fx.deluxe.id, Uuid::new_v4(), d(2024, 6, 1), d(2024, 6, 2))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::NotFound {
                entity: "RatePlan",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn falls_back_to_plan_default_price_without_assignment() {
        let fx = fixture();
        let standalone = RoomType::new("Suite", 4, 30_000);
        fx.store.insert_room_type(standalone.clone());
        // No assignment for Suite: the plan default of 100.00 applies

        let result = resolver(&fx)
            .price_stay(standalone.id, fx.plan.id, d(2024, 6, 1), d(2024, 6, 3))
            .await
            .unwrap();
        assert_eq!(result.total_cents, 20_000);
    }

    #[tokio::test]
    async fn no_assignment_and_no_default_price_is_an_error() {
        let fx = fixture();
        let corporate = RatePlan::new("Corporate", None);
        fx.store.insert_rate_plan(corporate.clone());

        let err = resolver(&fx)
            .price_stay(fx.deluxe.id, corporate.id, d(2024, 6, 1), d(2024, 6, 3))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NoAssignment { .. }));
    }

    #[tokio::test]
    async fn closed_date_always_violates_regardless_of_flags() {
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 7, 1), d(2024, 7, 31));
        season.closed_dates.push(d(2024, 7, 14));
        fx.store.insert_season(season);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 7, 13), d(2024, 7, 16))
            .await
            .unwrap();

        assert!(result.items[1].closed);
        assert_eq!(result.violations, vec!["closed on 2024-07-14".to_string()]);
        // The closed night still carries its would-be rate in the total
        assert_eq!(result.total_cents, 30_000);
    }

    #[tokio::test]
    async fn ctd_flags_last_night_only() {
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 7, 1), d(2024, 7, 31));
        season.closed_to_departure = true;
        fx.store.insert_season(season);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 7, 10), d(2024, 7, 13))
            .await
            .unwrap();

        assert!(!result.items[0].ctd);
        assert!(!result.items[1].ctd);
        assert!(result.items[2].ctd);
        assert_eq!(
            result.violations,
            vec!["closed to departure on 2024-07-13".to_string()]
        );
    }

    #[tokio::test]
    async fn cta_outside_first_night_does_not_violate() {
        // Override covers the middle of the stay only: CTA is an arrival
        // rule, pass-through nights are fine
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 7, 12), d(2024, 7, 13));
        season.closed_to_arrival = true;
        fx.store.insert_season(season);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 7, 10), d(2024, 7, 15))
            .await
            .unwrap();
        assert!(result.is_bookable());
        assert!(result.items.iter().all(|n| !n.cta));
    }

    #[tokio::test]
    async fn min_stay_enforced_against_whole_stay_length() {
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 8, 1), d(2024, 8, 31));
        season.min_stay = Some(3);
        fx.store.insert_season(season);

        let short = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 8, 10), d(2024, 8, 12))
            .await
            .unwrap();
        assert_eq!(
            short.violations,
            vec!["minimum stay of 3 nights required, stay is 2".to_string()]
        );

        let long_enough = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 8, 10), d(2024, 8, 13))
            .await
            .unwrap();
        assert!(long_enough.is_bookable());
    }

    #[tokio::test]
    async fn min_stay_counts_total_nights_not_override_nights() {
        // Only the last night falls inside a min-stay window; the stay as
        // a whole is long enough, so no violation
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 8, 14), d(2024, 8, 31));
        season.min_stay = Some(4);
        fx.store.insert_season(season);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 8, 10), d(2024, 8, 15))
            .await
            .unwrap();
        assert_eq!(result.nights(), 5);
        assert!(result.is_bookable());
        assert_eq!(result.items[4].min_stay, Some(4));
    }

    #[tokio::test]
    async fn max_stay_breach_reported_once() {
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 8, 1), d(2024, 8, 31));
        season.max_stay = Some(2);
        fx.store.insert_season(season);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 8, 10), d(2024, 8, 15))
            .await
            .unwrap();
        assert_eq!(
            result.violations,
            vec!["maximum stay of 2 nights exceeded, stay is 5".to_string()]
        );
    }

    #[tokio::test]
    async fn newest_override_wins_for_overlapping_windows() {
        let fx = fixture();
        let mut older =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 8, 1), d(2024, 8, 31));
        older.price_override_cents = Some(8_000);
        older.created_at = Utc::now() - Duration::days(7);
        let mut newer =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 8, 10), d(2024, 8, 20));
        newer.price_override_cents = Some(12_000);
        fx.store.insert_season(older);
        fx.store.insert_season(newer);

        let result = resolver(&fx)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 8, 9), d(2024, 8, 11))
            .await
            .unwrap();
        let rates: Vec<i64> = result.items.iter().map(|n| n.rate_cents).collect();
        assert_eq!(rates, vec![8_000, 12_000]);
    }

    #[tokio::test]
    async fn pricing_is_a_pure_function_of_the_snapshot() {
        let fx = fixture();
        let mut season =
            SeasonOverride::new(fx.plan.id, fx.deluxe.id, d(2024, 12, 24), d(2024, 12, 26));
        season.closed_to_arrival = true;
        fx.store.insert_season(season);

        let r = resolver(&fx);
        let first = r
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 12, 24), d(2024, 12, 27))
            .await
            .unwrap();
        let second = r
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 12, 24), d(2024, 12, 27))
            .await
            .unwrap();
        assert_eq!(first.total_cents, second.total_cents);
        assert_eq!(first.violations, second.violations);
    }

    #[tokio::test]
    async fn flat_tax_is_added_on_top() {
        let fx = fixture();
        let result = RateResolver::new(fx.store.clone())
            .with_tax_percent(10.0)
            .price_stay(fx.deluxe.id, fx.plan.id, d(2024, 6, 1), d(2024, 6, 3))
            .await
            .unwrap();
        assert_eq!(result.total_cents, 20_000);
        assert_eq!(result.tax_cents, 2_000);
        assert_eq!(result.grand_total_cents, 22_000);
    }

    #[tokio::test]
    async fn tax_rounds_half_up_to_the_nearest_cent() {
        let fx = fixture();
        let suite = RoomType::new("Odd", 2, 3_333);
        fx.store.insert_room_type(suite.clone());
        fx.store
            .insert_assignment(RatePlanAssignment::new(suite.id, fx.plan.id, 3_333));

        let result = RateResolver::new(fx.store.clone())
            .with_tax_percent(7.25)
            .price_stay(suite.id, fx.plan.id, d(2024, 6, 1), d(2024, 6, 2))
            .await
            .unwrap();
        // 33.33 * 7.25% = 2.416... → 2.42
        assert_eq!(result.tax_cents, 242);
    }
}
