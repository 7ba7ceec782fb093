use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid range: check-out {check_out} must be after check-in {check_in}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("No rate available: room type {room_type_id} has no assignment for rate plan {rate_plan_id} and the plan has no default price")]
    NoAssignment {
        room_type_id: String,
        rate_plan_id: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl EngineError {
    /// Whether the caller can retry without changing the request.
    /// Structural errors (bad range, unknown ids) always need correction.
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Storage(_))
    }
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

// ── Tests ──────────────────────────────────────────────────────
