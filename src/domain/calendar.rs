//! Half-open date-range arithmetic
//!
//! All stay intervals are `[check_in, check_out)`: the check-in night is
//! occupied, the check-out day is free for new arrivals. Dates are compared
//! at calendar-day granularity; callers normalize timestamps before calling.

use chrono::{Days, NaiveDate};

use crate::shared::{EngineError, EngineResult};

/// Two half-open ranges overlap iff each starts before the other ends.
/// A reservation checking out the day another checks in does NOT overlap.
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Number of nights in `[start, end)`.
///
/// Fails with `InvalidRange` if `end <= start`; a valid stay is always
/// at least one night.
pub fn nights_between(start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
    if end <= start {
        return Err(EngineError::InvalidRange {
            check_in: start,
            check_out: end,
        });
    }
    Ok((end - start).num_days() as u32)
}

/// A validated half-open stay interval.
///
/// Constructing a `StayRange` proves `check_in < check_out`, so everything
/// downstream can iterate nights without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> EngineResult<Self> {
        if check_out <= check_in {
            return Err(EngineError::InvalidRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    /// The last occupied night (`check_out - 1 day`).
    pub fn last_night(&self) -> NaiveDate {
        self.check_out
            .checked_sub_days(Days::new(1))
            .unwrap_or(self.check_in)
    }

    /// Iterate the occupied nights `[check_in, check_out)` in order.
    pub fn iter_nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.check_in;
        (0..self.nights() as u64).filter_map(move |n| start.checked_add_days(Days::new(n)))
    }

    pub fn overlaps(&self, other_start: NaiveDate, other_end: NaiveDate) -> bool {
        overlaps(self.check_in, self.check_out, other_start, other_end)
    }

    /// Whether `day` is one of the occupied nights.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn overlapping_ranges_overlap() {
        assert!(overlaps(d(2024, 6, 1), d(2024, 6, 5), d(2024, 6, 4), d(2024, 6, 8)));
        assert!(overlaps(d(2024, 6, 4), d(2024, 6, 8), d(2024, 6, 1), d(2024, 6, 5)));
    }

    #[test]
    fn contained_range_overlaps() {
        assert!(overlaps(d(2024, 6, 1), d(2024, 6, 10), d(2024, 6, 3), d(2024, 6, 4)));
    }

    #[test]
    fn boundary_touching_ranges_do_not_overlap() {
        // A checks out the day B checks in: checkout day is free
        assert!(!overlaps(d(2024, 6, 1), d(2024, 6, 5), d(2024, 6, 5), d(2024, 6, 9)));
        assert!(!overlaps(d(2024, 6, 5), d(2024, 6, 9), d(2024, 6, 1), d(2024, 6, 5)));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!overlaps(d(2024, 6, 1), d(2024, 6, 3), d(2024, 6, 10), d(2024, 6, 12)));
    }

    #[test]
    fn nights_between_counts_days() {
        assert_eq!(nights_between(d(2024, 12, 24), d(2024, 12, 27)).unwrap(), 3);
        assert_eq!(nights_between(d(2024, 6, 1), d(2024, 6, 2)).unwrap(), 1);
    }

    #[test]
    fn nights_between_rejects_zero_or_negative() {
        assert!(matches!(
            nights_between(d(2024, 6, 1), d(2024, 6, 1)),
            Err(EngineError::InvalidRange { .. })
        ));
        assert!(matches!(
            nights_between(d(2024, 6, 5), d(2024, 6, 1)),
            Err(EngineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn stay_range_rejects_invalid() {
        assert!(StayRange::new(d(2024, 6, 1), d(2024, 6, 1)).is_err());
        assert!(StayRange::new(d(2024, 6, 5), d(2024, 6, 1)).is_err());
    }

    #[test]
    fn stay_range_iterates_occupied_nights_only() {
        let range = StayRange::new(d(2024, 12, 24), d(2024, 12, 27)).unwrap();
        let nights: Vec<_> = range.iter_nights().collect();
        assert_eq!(nights, vec![d(2024, 12, 24), d(2024, 12, 25), d(2024, 12, 26)]);
        assert_eq!(range.nights(), 3);
        assert_eq!(range.last_night(), d(2024, 12, 26));
    }

    #[test]
    fn stay_range_contains_nights_not_checkout() {
        let range = StayRange::new(d(2024, 6, 1), d(2024, 6, 3)).unwrap();
        assert!(range.contains(d(2024, 6, 1)));
        assert!(range.contains(d(2024, 6, 2)));
        assert!(!range.contains(d(2024, 6, 3)));
        assert!(!range.contains(d(2024, 5, 31)));
    }

    #[test]
    fn single_night_stay() {
        let range = StayRange::new(d(2024, 6, 1), d(2024, 6, 2)).unwrap();
        assert_eq!(range.nights(), 1);
        assert_eq!(range.last_night(), d(2024, 6, 1));
        assert_eq!(range.iter_nights().count(), 1);
    }

    #[test]
    fn iterates_across_month_boundary() {
        let range = StayRange::new(d(2024, 1, 30), d(2024, 2, 2)).unwrap();
        let nights: Vec<_> = range.iter_nights().collect();
        assert_eq!(nights, vec![d(2024, 1, 30), d(2024, 1, 31), d(2024, 2, 1)]);
    }
}
