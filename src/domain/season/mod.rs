//! Season aggregate: date-bounded price and restriction overrides

pub mod model;
pub mod repository;

pub use model::SeasonOverride;
pub use repository::SeasonRepository;
