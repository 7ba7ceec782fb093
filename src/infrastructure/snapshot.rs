//! Property snapshot loading
//!
//! The service is persistence-free: it serves from an in-memory snapshot
//! of the property (room types, rooms, rate plans, seasons, reservations)
//! loaded from a JSON file at startup. Entities reference each other by
//! name/number so snapshot files stay hand-editable; ids are minted at
//! load time.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{
    RatePlan, RatePlanAssignment, Reservation, ReservationStatus, Room, RoomStatus, RoomType,
    SeasonOverride,
};
use crate::infrastructure::storage::InMemoryRepositoryProvider;
use crate::shared::{EngineError, EngineResult};

#[derive(Debug, Deserialize)]
pub struct PropertySnapshot {
    #[serde(default)]
    pub room_types: Vec<RoomTypeEntry>,
    #[serde(default)]
    pub rate_plans: Vec<RatePlanEntry>,
    #[serde(default)]
    pub assignments: Vec<AssignmentEntry>,
    #[serde(default)]
    pub seasons: Vec<SeasonEntry>,
    #[serde(default)]
    pub reservations: Vec<ReservationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RoomTypeEntry {
    pub name: String,
    pub max_occupancy: u32,
    pub base_price_cents: i64,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// Door numbers of the physical rooms of this type
    #[serde(default)]
    pub rooms: Vec<RoomEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RoomEntry {
    pub number: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RatePlanEntry {
    pub name: String,
    #[serde(default)]
    pub default_price_cents: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignmentEntry {
    pub room_type: String,
    pub rate_plan: String,
    pub base_price_cents: i64,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Deserialize)]
pub struct SeasonEntry {
    pub room_type: String,
    pub rate_plan: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub price_override_cents: Option<i64>,
    #[serde(default)]
    pub min_stay: Option<u32>,
    #[serde(default)]
    pub max_stay: Option<u32>,
    #[serde(default)]
    pub closed_to_arrival: bool,
    #[serde(default)]
    pub closed_to_departure: bool,
    #[serde(default)]
    pub closed_dates: Vec<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ReservationEntry {
    /// Door number, unique across the property
    pub room: String,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: Option<String>,
}

fn default_true() -> bool {
    true
}

impl PropertySnapshot {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::Validation(format!("Invalid snapshot: {e}")))
    }

    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Storage(format!("Cannot read snapshot {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Materialize the snapshot into an in-memory store.
    ///
    /// Fails on dangling name references; a snapshot that loads is
    /// internally consistent.
    pub fn into_store(self) -> EngineResult<InMemoryRepositoryProvider> {
        let store = InMemoryRepositoryProvider::new();
        let mut type_ids: HashMap<String, Uuid> = HashMap::new();
        let mut plan_ids: HashMap<String, Uuid> = HashMap::new();
        let mut room_ids: HashMap<String, Uuid> = HashMap::new();

        for entry in self.room_types {
            let mut room_type =
                RoomType::new(entry.name.clone(), entry.max_occupancy, entry.base_price_cents);
            room_type.is_visible = entry.is_visible;
            type_ids.insert(entry.name.clone(), room_type.id);

            for room_entry in entry.rooms {
                let mut room = Room::new(room_type.id, room_entry.number.clone());
                if let Some(status) = &room_entry.status {
                    room.status = RoomStatus::from_str(status);
                }
                if room_ids.insert(room_entry.number.clone(), room.id).is_some() {
                    return Err(EngineError::Validation(format!(
                        "Duplicate room number {}",
                        room_entry.number
                    )));
                }
                store.insert_room(room);
            }
            store.insert_room_type(room_type);
        }

        for entry in self.rate_plans {
            let mut plan = RatePlan::new(entry.name.clone(), entry.default_price_cents);
            if let Some(currency) = entry.currency {
                plan.currency = currency;
            }
            plan_ids.insert(entry.name.clone(), plan.id);
            store.insert_rate_plan(plan);
        }

        for entry in self.assignments {
            let room_type_id = resolve(&type_ids, &entry.room_type, "room type")?;
            let rate_plan_id = resolve(&plan_ids, &entry.rate_plan, "rate plan")?;
            let mut assignment =
                RatePlanAssignment::new(room_type_id, rate_plan_id, entry.base_price_cents);
            assignment.is_primary = entry.is_primary;
            store.insert_assignment(assignment);
        }

        for entry in self.seasons {
            let room_type_id = resolve(&type_ids, &entry.room_type, "room type")?;
            let rate_plan_id = resolve(&plan_ids, &entry.rate_plan, "rate plan")?;
            let mut season =
                SeasonOverride::new(rate_plan_id, room_type_id, entry.start_date, entry.end_date);
            season.price_override_cents = entry.price_override_cents;
            season.min_stay = entry.min_stay;
            season.max_stay = entry.max_stay;
            season.closed_to_arrival = entry.closed_to_arrival;
            season.closed_to_departure = entry.closed_to_departure;
            season.closed_dates = entry.closed_dates;
            store.insert_season(season);
        }

        for entry in self.reservations {
            let room_id = resolve(&room_ids, &entry.room, "room")?;
            let mut reservation =
                Reservation::new(room_id, entry.guest_name, entry.check_in, entry.check_out);
            if let Some(status) = &entry.status {
                reservation.status = ReservationStatus::from_str(status);
            }
            store.insert_reservation(reservation);
        }

        Ok(store)
    }
}

fn resolve(ids: &HashMap<String, Uuid>, name: &str, kind: &str) -> EngineResult<Uuid> {
    ids.get(name).copied().ok_or_else(|| {
        EngineError::Validation(format!("Snapshot references unknown {kind} \"{name}\""))
    })
}

// ── Tests ──────────────────────────────────────────────────────
