//! Season override repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::SeasonOverride;
use crate::shared::EngineResult;

#[async_trait]
pub trait SeasonRepository: Send + Sync {
    /// All overrides scoped to one (rate plan, room type) pair, including
    /// their closed dates. Order is not significant; resolution happens in
    /// the rate resolver.
    async fn list_for_pair(
        &self,
        rate_plan_id: Uuid,
        room_type_id: Uuid,
    ) -> EngineResult<Vec<SeasonOverride>>;
}
