//! In-memory repository provider
//!
//! DashMap-backed store that implements every read-only repository trait.
//! Serves as the snapshot store for the HTTP service and as the fixture
//! for engine tests. Insert methods are not part of the repository traits;
//! the engine itself never writes.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::{
    RatePlan, RatePlanAssignment, RatePlanRepository, RepositoryProvider, Reservation,
    ReservationRepository, Room, RoomRepository, RoomType, SeasonOverride, SeasonRepository,
};
use crate::shared::EngineResult;

/// In-memory property snapshot
#[derive(Debug, Default)]
pub struct InMemoryRepositoryProvider {
    room_types: DashMap<Uuid, RoomType>,
    rooms: DashMap<Uuid, Room>,
    rate_plans: DashMap<Uuid, RatePlan>,
    assignments: DashMap<Uuid, RatePlanAssignment>,
    seasons: DashMap<Uuid, SeasonOverride>,
    reservations: DashMap<Uuid, Reservation>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_room_type(&self, room_type: RoomType) {
        self.room_types.insert(room_type.id, room_type);
    }

    pub fn insert_room(&self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    pub fn insert_rate_plan(&self, plan: RatePlan) {
        self.rate_plans.insert(plan.id, plan);
    }

    pub fn insert_assignment(&self, assignment: RatePlanAssignment) {
        self.assignments.insert(assignment.id, assignment);
    }

    pub fn insert_season(&self, season: SeasonOverride) {
        self.seasons.insert(season.id, season);
    }

    pub fn insert_reservation(&self, reservation: Reservation) {
        self.reservations.insert(reservation.id, reservation);
    }

    /// Room ids belonging to one room type
    fn room_ids_for_type(&self, room_type_id: Uuid) -> Vec<Uuid> {
        self.rooms
            .iter()
            .filter(|r| r.room_type_id == room_type_id)
            .map(|r| r.id)
            .collect()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRepositoryProvider {
    async fn find_room_type(&self, id: Uuid) -> EngineResult<Option<RoomType>> {
        Ok(self.room_types.get(&id).map(|rt| rt.clone()))
    }

    async fn list_visible_room_types(&self) -> EngineResult<Vec<RoomType>> {
        let mut types: Vec<RoomType> = self
            .room_types
            .iter()
            .filter(|rt| rt.is_visible)
            .map(|rt| rt.clone())
            .collect();
        // DashMap iteration order is arbitrary; keep results stable
        types.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(types)
    }

    async fn list_rooms_for_type(&self, room_type_id: Uuid) -> EngineResult<Vec<Room>> {
        Ok(self
            .rooms
            .iter()
            .filter(|r| r.room_type_id == room_type_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn find_room(&self, id: Uuid) -> EngineResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.clone()))
    }
}

#[async_trait]
impl RatePlanRepository for InMemoryRepositoryProvider {
    async fn find_rate_plan(&self, id: Uuid) -> EngineResult<Option<RatePlan>> {
        Ok(self.rate_plans.get(&id).map(|p| p.clone()))
    }

    async fn find_assignment(
        &self,
        room_type_id: Uuid,
        rate_plan_id: Uuid,
    ) -> EngineResult<Option<RatePlanAssignment>> {
        Ok(self
            .assignments
            .iter()
            .find(|a| a.room_type_id == room_type_id && a.rate_plan_id == rate_plan_id)
            .map(|a| a.clone()))
    }

    async fn find_primary_assignment(
        &self,
        room_type_id: Uuid,
    ) -> EngineResult<Option<RatePlanAssignment>> {
        Ok(self
            .assignments
            .iter()
            .find(|a| a.room_type_id == room_type_id && a.is_primary)
            .map(|a| a.clone()))
    }
}

#[async_trait]
impl SeasonRepository for InMemoryRepositoryProvider {
    async fn list_for_pair(
        &self,
        rate_plan_id: Uuid,
        room_type_id: Uuid,
    ) -> EngineResult<Vec<SeasonOverride>> {
        Ok(self
            .seasons
            .iter()
            .filter(|s| s.rate_plan_id == rate_plan_id && s.room_type_id == room_type_id)
            .map(|s| s.clone())
            .collect())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRepositoryProvider {
    async fn list_for_room_type(&self, room_type_id: Uuid) -> EngineResult<Vec<Reservation>> {
        let room_ids = self.room_ids_for_type(room_type_id);
        Ok(self
            .reservations
            .iter()
            .filter(|r| room_ids.contains(&r.room_id))
            .map(|r| r.clone())
            .collect())
    }

    async fn list_for_room(&self, room_id: Uuid) -> EngineResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.room_id == room_id)
            .map(|r| r.clone())
            .collect())
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn rate_plans(&self) -> &dyn RatePlanRepository {
        self
    }

    fn seasons(&self) -> &dyn SeasonRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────
