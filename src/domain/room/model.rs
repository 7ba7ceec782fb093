//! Room and room-type domain entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Physical room status
///
/// Maintenance removes a room from the sellable pool entirely, for every
/// date range, until the status changes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    /// Room can be sold
    Active,
    /// Room is out of the sellable pool
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Maintenance" => Self::Maintenance,
            _ => Self::Active,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sellable category of rooms (e.g. "Standard", "Deluxe")
#[derive(Debug, Clone)]
pub struct RoomType {
    pub id: Uuid,
    pub name: String,
    /// Maximum guests per room, always >= 1
    pub max_occupancy: u32,
    /// Default nightly rate in minor currency units (e.g. cents)
    pub base_price_cents: i64,
    /// Hidden room types are excluded from search and capacity matching
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

impl RoomType {
    pub fn new(
        name: impl Into<String>,
        max_occupancy: u32,
        base_price_cents: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            max_occupancy: max_occupancy.max(1),
            base_price_cents: base_price_cents.max(0),
            is_visible: true,
            created_at: Utc::now(),
        }
    }
}

/// A single physical room belonging to one room type
#[derive(Debug, Clone)]
pub struct Room {
    pub id: Uuid,
    pub room_type_id: Uuid,
    /// Door number as printed on the key card
    pub number: String,
    pub status: RoomStatus,
}

impl Room {
    pub fn new(room_type_id: Uuid, number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_type_id,
            number: number.into(),
            status: RoomStatus::Active,
        }
    }

    /// Whether this room counts toward the sellable pool
    pub fn is_sellable(&self) -> bool {
        self.status == RoomStatus::Active
    }
}

// ── Tests ──────────────────────────────────────────────────────
