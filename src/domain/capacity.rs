//! Capacity matching types and the multi-room selection reducer

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::pricing::PricingResult;

/// Guests requested for one room
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct OccupancyRequest {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

impl OccupancyRequest {
    /// Saturates rather than wrapping on absurd counts.
    pub fn guests(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }
}

/// Free-room count for one room type over a date range
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilitySummary {
    pub room_type_id: Uuid,
    pub room_type_name: String,
    pub max_occupancy: u32,
    pub available_rooms: u32,
}

impl AvailabilitySummary {
    /// Guests this room type can absorb over the range (saturating).
    pub fn capacity(&self) -> u32 {
        self.available_rooms.saturating_mul(self.max_occupancy)
    }
}

/// Outcome of a capacity match
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    /// One room type covers every requested room
    Direct {
        room_type_id: Uuid,
        room_type_name: String,
        rooms_needed: u32,
        available_rooms: u32,
        /// Priced via the room type's primary rate plan; absent when the
        /// type has no primary assignment
        pricing: Option<PricingResult>,
    },
    /// No single type suffices, but a combination of types can cover the
    /// total guest count. The caller picks the combination; `options`
    /// exposes the per-type boundary it must respect.
    Fallback {
        total_guests: u32,
        total_capacity: u32,
        options: Vec<AvailabilitySummary>,
    },
    /// The property cannot host this many guests in the range
    Infeasible {
        total_guests: u32,
        total_capacity: u32,
        shortfall: u32,
    },
}

/// Rejected selection transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Selected capacity already covers {total_guests} guests; adding more rooms would over-book")]
    AlreadyCovered { total_guests: u32 },

    #[error("Room type {0} has no more rooms available in this range")]
    NoAvailability(Uuid),

    #[error("Room type {0} is not part of the offered options")]
    UnknownRoomType(Uuid),

    #[error("Room type {0} is not currently selected")]
    NotSelected(Uuid),
}

/// Incremental adjustment to a multi-room selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Add one room of the given type
    Add(Uuid),
    /// Remove one room of the given type
    Remove(Uuid),
}

/// Quantities chosen per room type during the multi-room fallback.
///
/// A pure value: `apply` returns a new selection and never touches shared
/// state, so the booking UI can drive it from events and tests can drive
/// it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSelection {
    quantities: BTreeMap<Uuid, u32>,
}

impl RoomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, room_type_id: Uuid) -> u32 {
        self.quantities.get(&room_type_id).copied().unwrap_or(0)
    }

    pub fn total_rooms(&self) -> u32 {
        self.quantities.values().sum()
    }

    /// Guests the current selection can absorb, given the offered options
    pub fn total_capacity(&self, options: &[AvailabilitySummary]) -> u32 {
        self.quantities
            .iter()
            .map(|(id, qty)| {
                options
                    .iter()
                    .find(|o| o.room_type_id == *id)
                    .map(|o| o.max_occupancy * qty)
                    .unwrap_or(0)
            })
            .sum()
    }

    /// Whether the selection covers the whole party
    pub fn covers(&self, options: &[AvailabilitySummary], total_guests: u32) -> bool {
        self.total_capacity(options) >= total_guests
    }

    /// Apply one selection event, re-validating capacity coverage.
    ///
    /// `Add` is rejected once the selection already covers `total_guests`
    /// (over-booking guard) or when the room type has no rooms left;
    /// `Remove` is rejected for types that are not selected.
    pub fn apply(
        &self,
        event: SelectionEvent,
        options: &[AvailabilitySummary],
        total_guests: u32,
    ) -> Result<RoomSelection, SelectionError> {
        match event {
            SelectionEvent::Add(room_type_id) => {
                let option = options
                    .iter()
                    .find(|o| o.room_type_id == room_type_id)
                    .ok_or(SelectionError::UnknownRoomType(room_type_id))?;

                if self.covers(options, total_guests) && total_guests > 0 {
                    return Err(SelectionError::AlreadyCovered { total_guests });
                }
                let current = self.quantity(room_type_id);
                if current >= option.available_rooms {
                    return Err(SelectionError::NoAvailability(room_type_id));
                }

                let mut next = self.clone();
                next.quantities.insert(room_type_id, current + 1);
                Ok(next)
            }
            SelectionEvent::Remove(room_type_id) => {
                let current = self.quantity(room_type_id);
                if current == 0 {
                    return Err(SelectionError::NotSelected(room_type_id));
                }

                let mut next = self.clone();
                if current == 1 {
                    next.quantities.remove(&room_type_id);
                } else {
                    next.quantities.insert(room_type_id, current - 1);
                }
                Ok(next)
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
