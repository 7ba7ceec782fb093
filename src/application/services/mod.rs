//! Engine services

pub mod availability;
pub mod capacity_matcher;
pub mod rate_resolver;

pub use availability::AvailabilityService;
pub use capacity_matcher::CapacityMatcher;
pub use rate_resolver::RateResolver;
