//! Room aggregate: room types and physical rooms

pub mod model;
pub mod repository;

pub use model::{Room, RoomStatus, RoomType};
pub use repository::RoomRepository;
