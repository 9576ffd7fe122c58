//! Data models for rooms, user accounts, and staff details.

pub mod de;
pub mod room;
pub mod staff;

pub use room::{Room, RoomFields, RoomType};
pub use staff::{CreatedUser, Gender, NewUser, UserDetail, UserDetailFields, UserDetailPayload};
