//! Room endpoints.

use reqwest::Method;
use serde_json::Value;

use super::envelope::{self, ApiOutcome};
use super::ApiClient;
use crate::error::Result;
use crate::models::room::{Room, RoomFields, RoomRequest};

impl ApiClient {
    /// `POST /rooms`
    pub async fn create_room(&self, fields: &RoomFields) -> Result<ApiOutcome<Room>> {
        let body = serde_json::to_value(RoomRequest { room: fields })?;
        let response = self.execute(Method::POST, "/rooms".to_string(), Some(body)).await?;
        envelope::classify(response)?.try_map(envelope::decode_record::<Room>)
    }

    /// `PUT /rooms/:id`
    ///
    /// A success body that is not a room record still counts as accepted;
    /// the record is rebuilt from the submitted fields.
    pub async fn update_room(&self, id: i64, fields: &RoomFields) -> Result<ApiOutcome<Room>> {
        let body = serde_json::to_value(RoomRequest { room: fields })?;
        let response = self.execute(Method::PUT, format!("/rooms/{id}"), Some(body)).await?;
        Ok(envelope::classify(response)?.map(|body| record_or_submitted(body, id, fields)))
    }
}

fn record_or_submitted(body: Value, id: i64, fields: &RoomFields) -> Room {
    envelope::decode_record::<Room>(body).unwrap_or_else(|e| {
        tracing::debug!("Room {id} update returned no record ({e}), using submitted fields");
        Room::from_fields(id, fields.clone())
    })
}
