//! Reservation repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Reservation;
use crate::shared::EngineResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// All reservations whose room belongs to the given room type,
    /// any status. Status and overlap filtering happen in the engine so
    /// the occupancy semantics live in one place.
    async fn list_for_room_type(&self, room_type_id: Uuid) -> EngineResult<Vec<Reservation>>;

    /// All reservations booked into one physical room, any status
    async fn list_for_room(&self, room_id: Uuid) -> EngineResult<Vec<Reservation>>;
}
