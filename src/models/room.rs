//! Room DTOs for create and replace operations.

use serde::{Deserialize, Serialize};

use super::de;

/// Room category offered by the hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

impl RoomType {
    /// All room types in display order.
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Suite];

    /// Get the display name (also the wire value).
    pub fn name(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Suite => "Suite",
        }
    }
}

/// Editable room fields, sent as the body of create and replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFields {
    pub room_type: RoomType,
    pub description: String,
    pub charges: f64,
    pub capacity: u32,
}

/// Room record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_type: RoomType,
    pub description: String,
    #[serde(deserialize_with = "de::f64_or_string")]
    pub charges: f64,
    #[serde(deserialize_with = "de::u32_or_string")]
    pub capacity: u32,
}

impl Room {
    /// Build a record from submitted fields and a known id.
    pub fn from_fields(id: i64, fields: RoomFields) -> Self {
        Self {
            id,
            room_type: fields.room_type,
            description: fields.description,
            charges: fields.charges,
            capacity: fields.capacity,
        }
    }

    /// Editable fields of this record.
    pub fn fields(&self) -> RoomFields {
        RoomFields {
            room_type: self.room_type,
            description: self.description.clone(),
            charges: self.charges,
            capacity: self.capacity,
        }
    }
}

/// Request envelope: `{"room": {...}}`.
#[derive(Debug, Serialize)]
pub struct RoomRequest<'a> {
    pub room: &'a RoomFields,
}
