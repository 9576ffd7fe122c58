//! Staff DTOs: login credentials and the user-detail record that references them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role marker the backend uses for staff users.
pub const STAFF_ROLE_ID: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Login credentials for a new staff user.
#[derive(Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Request envelope: `{"user": {...}}`.
#[derive(Debug, Serialize)]
pub struct UserRequest<'a> {
    pub user: &'a NewUser,
}

/// Credential record returned after creating a user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedUser {
    pub id: i64,
    #[serde(default)]
    pub email: String,
}

/// Personal fields of a staff member, shared by create and replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetailFields {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone_no: String,
}

/// Body of a user-detail create or replace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetailPayload {
    #[serde(flatten)]
    pub fields: UserDetailFields,
    pub user_id: i64,
    pub role_id: i64,
}

impl UserDetailPayload {
    /// Payload for a staff member owned by `user_id`.
    pub fn staff(fields: UserDetailFields, user_id: i64) -> Self {
        Self {
            fields,
            user_id,
            role_id: STAFF_ROLE_ID,
        }
    }
}

/// Request envelope: `{"user_detail": {...}}`.
#[derive(Debug, Serialize)]
pub struct UserDetailRequest<'a> {
    pub user_detail: &'a UserDetailPayload,
}

/// User-detail record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone_no: String,
    pub user_id: i64,
    #[serde(default = "default_role_id")]
    pub role_id: i64,
}

fn default_role_id() -> i64 {
    STAFF_ROLE_ID
}

impl UserDetail {
    /// Build a record from a submitted payload.
    pub fn from_payload(id: Option<i64>, payload: UserDetailPayload) -> Self {
        let UserDetailPayload {
            fields,
            user_id,
            role_id,
        } = payload;
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            date_of_birth: fields.date_of_birth,
            gender: fields.gender,
            phone_no: fields.phone_no,
            user_id,
            role_id,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> UserDetailFields {
        UserDetailFields {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            gender: Gender::Female,
            phone_no: "5551234567".to_string(),
        }
    }

    #[test]
    fn test_detail_request_shape() {
        let payload = UserDetailPayload::staff(fields(), 42);
        let body = serde_json::to_value(UserDetailRequest { user_detail: &payload }).unwrap();
        assert_eq!(
            body,
            json!({"user_detail": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "date_of_birth": "1990-12-10",
                "gender": "female",
                "phone_no": "5551234567",
                "user_id": 42,
                "role_id": 2
            }})
        );
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let user = NewUser {
            email: "ada@hotel.test".to_string(),
            password: "secret123".to_string(),
        };
        let debug = format!("{user:?}");
        assert!(debug.contains("ada@hotel.test"));
        assert!(!debug.contains("secret123"));
    }

    #[test]
    fn test_record_without_role_defaults_to_staff() {
        let detail: UserDetail = serde_json::from_value(json!({
            "id": 3,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "date_of_birth": "1990-12-10",
            "gender": "female",
            "phone_no": "5551234567",
            "user_id": 42
        }))
        .unwrap();
        assert_eq!(detail.role_id, STAFF_ROLE_ID);
        assert_eq!(detail.full_name(), "Ada Lovelace");
    }
}
