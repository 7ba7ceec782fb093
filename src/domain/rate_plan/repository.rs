//! Rate plan repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{RatePlan, RatePlanAssignment};
use crate::shared::EngineResult;

#[async_trait]
pub trait RatePlanRepository: Send + Sync {
    /// Find a rate plan by ID
    async fn find_rate_plan(&self, id: Uuid) -> EngineResult<Option<RatePlan>>;

    /// Find the assignment linking a room type to a rate plan, if any
    async fn find_assignment(
        &self,
        room_type_id: Uuid,
        rate_plan_id: Uuid,
    ) -> EngineResult<Option<RatePlanAssignment>>;

    /// Find the primary assignment for a room type, if any.
    /// Used by capacity matching, which carries no explicit rate plan.
    async fn find_primary_assignment(
        &self,
        room_type_id: Uuid,
    ) -> EngineResult<Option<RatePlanAssignment>>;
}
