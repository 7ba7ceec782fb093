//! Room repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Room, RoomType};
use crate::shared::EngineResult;

/// Read-only access to room types and physical rooms.
///
/// The engine never writes through this trait; administrative edit flows
/// live outside the pricing core.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find a room type by ID
    async fn find_room_type(&self, id: Uuid) -> EngineResult<Option<RoomType>>;

    /// All room types visible to guests
    async fn list_visible_room_types(&self) -> EngineResult<Vec<RoomType>>;

    /// All physical rooms of a room type, any status
    async fn list_rooms_for_type(&self, room_type_id: Uuid) -> EngineResult<Vec<Room>>;

    /// Find a physical room by ID
    async fn find_room(&self, id: Uuid) -> EngineResult<Option<Room>>;
}
