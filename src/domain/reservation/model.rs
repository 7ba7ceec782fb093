//! Reservation domain entity
//!
//! Only the fields the pricing/availability core consumes; guest profile,
//! payment and channel data live with the booking collaborator.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::calendar;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Held but not yet confirmed; still blocks the room
    Tentative,
    /// Waitlisted; still blocks the room
    Standby,
    /// Confirmed booking
    Confirmed,
    /// Guest is in the room
    CheckedIn,
    /// Guest has left
    CheckedOut,
    /// Cancelled before arrival
    Cancelled,
    /// Guest never arrived
    NoShow,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tentative => "Tentative",
            Self::Standby => "Standby",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "CheckedIn",
            Self::CheckedOut => "CheckedOut",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "NoShow",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Tentative" => Self::Tentative,
            "Standby" => Self::Standby,
            "CheckedIn" => Self::CheckedIn,
            "CheckedOut" => Self::CheckedOut,
            "Cancelled" => Self::Cancelled,
            "NoShow" => Self::NoShow,
            _ => Self::Confirmed,
        }
    }

    /// Whether a reservation in this status holds its room.
    /// Every status except Cancelled and NoShow occupies, including
    /// tentative and standby holds.
    pub fn occupies_room(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stay booked into one physical room, occupying `[check_in, check_out)`
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: Uuid,
    pub room_id: Uuid,
    pub guest_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(
        room_id: Uuid,
        guest_name: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            guest_name: guest_name.into(),
            check_in,
            check_out,
            status: ReservationStatus::Confirmed,
        }
    }

    /// Whether this reservation blocks its room for the given query range
    pub fn blocks(&self, query_start: NaiveDate, query_end: NaiveDate) -> bool {
        self.status.occupies_room()
            && calendar::overlaps(self.check_in, self.check_out, query_start, query_end)
    }
}

// ── Tests ──────────────────────────────────────────────────────
