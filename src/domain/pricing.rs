//! Pricing result types
//!
//! Derived, never persisted. All amounts are integer minor currency units
//! (cents), so multi-night totals are exact.

use chrono::NaiveDate;
use serde::Serialize;

/// One night of a priced stay
#[derive(Debug, Clone, Serialize)]
pub struct NightBreakdown {
    pub day: NaiveDate,
    /// Nightly rate in minor units. Closed nights keep their would-be
    /// rate so the caller can still display a full breakdown.
    pub rate_cents: i64,
    /// Night is individually blocked by a closed date
    pub closed: bool,
    /// Closed-to-arrival applies (only ever set on the first night)
    pub cta: bool,
    /// Closed-to-departure applies (only ever set on the last night)
    pub ctd: bool,
    /// Minimum stay constraint active on this night, if any
    pub min_stay: Option<u32>,
    /// Maximum stay constraint active on this night, if any
    pub max_stay: Option<u32>,
}

/// Full priced breakdown of a stay plus every violated restriction.
///
/// The resolver never rejects a structurally valid query: callers get the
/// price and the reasons the stay is blocked, and must refuse to confirm a
/// booking while `violations` is non-empty.
#[derive(Debug, Clone, Serialize)]
pub struct PricingResult {
    pub items: Vec<NightBreakdown>,
    /// Pre-tax sum of all nightly rates, minor units
    pub total_cents: i64,
    /// Flat-percentage tax on the total, minor units
    pub tax_cents: i64,
    /// `total_cents + tax_cents`
    pub grand_total_cents: i64,
    /// Currency code (ISO 4217)
    pub currency: String,
    /// Human-readable reasons the stay cannot be booked, in rule order:
    /// closed nights, CTA, CTD, min stay, max stay
    pub violations: Vec<String>,
}

impl PricingResult {
    /// Whether the stay can be confirmed as-is
    pub fn is_bookable(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn nights(&self) -> u32 {
        self.items.len() as u32
    }

    /// Format the pre-tax total as a human-readable amount
    pub fn format_total(&self) -> String {
        format_cents(self.total_cents, &self.currency)
    }
}

/// Format minor units as "units.cc CUR"
pub fn format_cents(amount_cents: i64, currency: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.abs();
    format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, currency)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_cents_zero_pads_minor_units() {
        assert_eq!(format_cents(12_345, "EUR"), "123.45 EUR");
        assert_eq!(format_cents(5, "EUR"), "0.05 EUR");
        assert_eq!(format_cents(0, "USD"), "0.00 USD");
        assert_eq!(format_cents(-250, "EUR"), "-2.50 EUR");
    }

    #[test]
    fn bookable_only_without_violations() {
        let mut result = PricingResult {
            items: vec![],
            total_cents: 0,
            tax_cents: 0,
            grand_total_cents: 0,
            currency: "EUR".into(),
            violations: vec![],
        };
        assert!(result.is_bookable());
        result.violations.push("closed on 2024-12-25".into());
        assert!(!result.is_bookable());
    }
}
