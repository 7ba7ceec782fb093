//! Availability calculator: free-room counts per room type
//!
//! Pure reads over the reservation/room snapshot; safe to call repeatedly
//! and concurrently. Whether the count is still accurate when the booking
//! is finally written is the write path's problem (see
//! [`AvailabilityService::room_has_conflict`]).

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{AvailabilitySummary, RepositoryProvider, StayRange};
use crate::shared::{EngineError, EngineResult};

/// Service computing free-room counts over a date range
pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Count free rooms of a room type for `[check_in, check_out)`.
    ///
    /// Maintenance rooms are out of the sellable pool for every range.
    /// A room is occupied if any reservation holding it (status other than
    /// Cancelled/NoShow) overlaps the range; multiple overlapping rows for
    /// one physical room count it once.
    pub async fn rooms_available(
        &self,
        room_type_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> EngineResult<u32> {
        let range = StayRange::new(check_in, check_out)?;

        let room_type = self
            .repos
            .rooms()
            .find_room_type(room_type_id)
            .await?
            .ok_or(EngineError::NotFound {
                entity: "RoomType",
                field: "id",
                value: room_type_id.to_string(),
            })?;

        let rooms = self.repos.rooms().list_rooms_for_type(room_type_id).await?;
        let sellable: HashSet<Uuid> = rooms
            .iter()
            .filter(|r| r.is_sellable())
            .map(|r| r.id)
            .collect();

        let reservations = self
            .repos
            .reservations()
            .list_for_room_type(room_type_id)
            .await?;

        let occupied: HashSet<Uuid> = reservations
            .iter()
            .filter(|r| r.blocks(range.check_in(), range.check_out()))
            .map(|r| r.room_id)
            .filter(|room_id| sellable.contains(room_id))
            .collect();

        let available = (sellable.len() - occupied.len()) as u32;

        debug!(
            room_type = %room_type.name,
            %check_in,
            %check_out,
            sellable = sellable.len(),
            occupied = occupied.len(),
            available,
            "Availability computed"
        );

        Ok(available)
    }

    /// Free-room counts for every visible room type
    pub async fn summaries(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> EngineResult<Vec<AvailabilitySummary>> {
        // Validate once up front so an empty hotel still rejects bad ranges
        StayRange::new(check_in, check_out)?;

        let mut summaries = Vec::new();
        for room_type in self.repos.rooms().list_visible_room_types().await? {
            let available = self
                .rooms_available(room_type.id, check_in, check_out)
                .await?;
            summaries.push(AvailabilitySummary {
                room_type_id: room_type.id,
                room_type_name: room_type.name,
                max_occupancy: room_type.max_occupancy,
                available_rooms: available,
            });
        }
        Ok(summaries)
    }

    /// Whether a physical room already holds an overlapping reservation.
    ///
    /// The engine computes availability against a snapshot and cannot
    /// guarantee at-most-one booking per room; reservation creation must
    /// re-run this check right before inserting.
    pub async fn room_has_conflict(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> EngineResult<bool> {
        let range = StayRange::new(check_in, check_out)?;
        let reservations = self.repos.reservations().list_for_room(room_id).await?;
        Ok(reservations
            .iter()
            .any(|r| r.blocks(range.check_in(), range.check_out())))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::{Reservation, ReservationStatus, Room, RoomStatus, RoomType};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    struct Fixture {
        store: Arc<InMemoryRepositoryProvider>,
        deluxe: RoomType,
        rooms: Vec<Room>,
    }

    /// Deluxe room type with three physical rooms
    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryRepositoryProvider::new());
        let deluxe = RoomType::new("Deluxe", 2, 10_000);
        store.insert_room_type(deluxe.clone());
        let rooms: Vec<Room> = ["101", "102", "103"]
            .iter()
            .map(|n| Room::new(deluxe.id, *n))
            .collect();
        for room in &rooms {
            store.insert_room(room.clone());
        }
        Fixture {
            store,
            deluxe,
            rooms,
        }
    }

    fn service(fx: &Fixture) -> AvailabilityService {
        AvailabilityService::new(fx.store.clone())
    }

    fn reserve(fx: &Fixture, room_idx: usize, status: ReservationStatus) {
        let mut r = Reservation::new(
            fx.rooms[room_idx].id,
            "Guest",
            d(2024, 6, 10),
            d(2024, 6, 15),
        );
        r.status = status;
        fx.store.insert_reservation(r);
    }

    #[tokio::test]
    async fn cancelled_reservations_do_not_occupy() {
        // 3 rooms, 2 confirmed overlapping + 1 cancelled → 1 available
        let fx = fixture();
        reserve(&fx, 0, ReservationStatus::Confirmed);
        reserve(&fx, 1, ReservationStatus::Confirmed);
        reserve(&fx, 2, ReservationStatus::Cancelled);

        let available = service(&fx)
            .rooms_available(fx.deluxe.id, d(2024, 6, 12), d(2024, 6, 14))
            .await
            .unwrap();
        assert_eq!(available, 1);
    }

    #[tokio::test]
    async fn availability_is_monotone_in_reservations() {
        let fx = fixture();
        let svc = service(&fx);
        let mut last = svc
            .rooms_available(fx.deluxe.id, d(2024, 6, 12), d(2024, 6, 14))
            .await
            .unwrap();
        assert_eq!(last, 3);

        for idx in 0..3 {
            reserve(&fx, idx, ReservationStatus::Confirmed);
            let current = svc
                .rooms_available(fx.deluxe.id, d(2024, 6, 12), d(2024, 6, 14))
                .await
                .unwrap();
            assert!(current <= last);
            last = current;
        }
        assert_eq!(last, 0);
    }

    #[tokio::test]
    async fn double_booked_room_counts_once() {
        // Data-integrity glitch: two overlapping rows on the same room
        let fx = fixture();
        reserve(&fx, 0, ReservationStatus::Confirmed);
        reserve(&fx, 0, ReservationStatus::Tentative);

        let available = service(&fx)
            .rooms_available(fx.deluxe.id, d(2024, 6, 12), d(2024, 6, 14))
            .await
            .unwrap();
        assert_eq!(available, 2);
    }

    #[tokio::test]
    async fn maintenance_rooms_leave_the_sellable_pool() {
        let fx = fixture();
        let mut broken = fx.rooms[2].clone();
        broken.status = RoomStatus::Maintenance;
        fx.store.insert_room(broken);

        let available = service(&fx)
            .rooms_available(fx.deluxe.id, d(2030, 1, 1), d(2030, 1, 5))
            .await
            .unwrap();
        // Out of the pool for any range, not just booked dates
        assert_eq!(available, 2);
    }

    #[tokio::test]
    async fn back_to_back_stays_do_not_collide() {
        let fx = fixture();
        for idx in 0..3 {
            reserve(&fx, idx, ReservationStatus::Confirmed); // Jun 10-15
        }

        let available = service(&fx)
            .rooms_available(fx.deluxe.id, d(2024, 6, 15), d(2024, 6, 18))
            .await
            .unwrap();
        assert_eq!(available, 3);
    }

    #[tokio::test]
    async fn unknown_room_type_is_an_error() {
        let fx = fixture();
        let err = service(&fx)
            .rooms_available(Uuid::new_v4(), d(2024, 6, 1), d(2024, 6, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn invalid_range_is_rejected() {
        let fx = fixture();
        let err = service(&fx)
            .rooms_available(fx.deluxe.id, d(2024, 6, 2), d(2024, 6, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn summaries_cover_visible_types_only() {
        let fx = fixture();
        let mut hidden = RoomType::new("Staff", 1, 0);
        hidden.is_visible = false;
        fx.store.insert_room_type(hidden);

        let summaries = service(&fx)
            .summaries(d(2024, 6, 1), d(2024, 6, 3))
            .await
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].room_type_name, "Deluxe");
        assert_eq!(summaries[0].available_rooms, 3);
        assert_eq!(summaries[0].capacity(), 6);
    }

    #[tokio::test]
    async fn conflict_check_sees_held_rooms() {
        let fx = fixture();
        reserve(&fx, 0, ReservationStatus::Tentative); // Jun 10-15

        let svc = service(&fx);
        assert!(svc
            .room_has_conflict(fx.rooms[0].id, d(2024, 6, 14), d(2024, 6, 16))
            .await
            .unwrap());
        // Checkout day is free for the next arrival
        assert!(!svc
            .room_has_conflict(fx.rooms[0].id, d(2024, 6, 15), d(2024, 6, 17))
            .await
            .unwrap());
        assert!(!svc
            .room_has_conflict(fx.rooms[1].id, d(2024, 6, 14), d(2024, 6, 16))
            .await
            .unwrap());
    }
}
