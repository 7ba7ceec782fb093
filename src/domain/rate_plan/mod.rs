//! Rate plan aggregate: plans and per-room-type assignments

pub mod model;
pub mod repository;

pub use model::{RatePlan, RatePlanAssignment};
pub use repository::RatePlanRepository;
