//! User credential and user-detail endpoints.

use reqwest::Method;
use serde_json::Value;

use super::envelope::{self, ApiOutcome};
use super::ApiClient;
use crate::error::Result;
use crate::models::staff::{CreatedUser, NewUser, UserDetail, UserDetailPayload, UserDetailRequest, UserRequest};

impl ApiClient {
    /// `POST /users`
    ///
    /// An accepted response without a user id is an invalid response, so
    /// callers never see an accepted credential they cannot reference.
    pub async fn create_user(&self, user: &NewUser) -> Result<ApiOutcome<CreatedUser>> {
        let body = serde_json::to_value(UserRequest { user })?;
        let response = self.execute(Method::POST, "/users".to_string(), Some(body)).await?;
        envelope::classify(response)?.try_map(envelope::decode_record::<CreatedUser>)
    }

    /// `DELETE /users/:id`
    pub async fn delete_user(&self, id: i64) -> Result<ApiOutcome<()>> {
        let response = self.execute(Method::DELETE, format!("/users/{id}"), None).await?;
        Ok(envelope::classify(response)?.map(|_| ()))
    }

    /// `POST /user_details`
    pub async fn create_user_detail(&self, payload: &UserDetailPayload) -> Result<ApiOutcome<UserDetail>> {
        let body = serde_json::to_value(UserDetailRequest { user_detail: payload })?;
        let response = self
            .execute(Method::POST, "/user_details".to_string(), Some(body))
            .await?;
        Ok(envelope::classify(response)?.map(|body| record_or_submitted(body, payload)))
    }

    /// `PUT /user_details/:user_id`
    pub async fn update_user_detail(&self, user_id: i64, payload: &UserDetailPayload) -> Result<ApiOutcome<UserDetail>> {
        let body = serde_json::to_value(UserDetailRequest { user_detail: payload })?;
        let response = self
            .execute(Method::PUT, format!("/user_details/{user_id}"), Some(body))
            .await?;
        Ok(envelope::classify(response)?.map(|body| record_or_submitted(body, payload)))
    }
}

fn record_or_submitted(body: Value, payload: &UserDetailPayload) -> UserDetail {
    envelope::decode_record::<UserDetail>(body).unwrap_or_else(|e| {
        tracing::debug!(
            "User detail for user {} returned no record ({e}), using submitted fields",
            payload.user_id
        );
        UserDetail::from_payload(None, payload.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{ScriptedTransport, client};
    use crate::error::AppError;
    use crate::models::staff::{Gender, UserDetailFields};
    use chrono::NaiveDate;
    use serde_json::json;

    fn payload(user_id: i64) -> UserDetailPayload {
        UserDetailPayload::staff(
            UserDetailFields {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1985, 12, 9).unwrap(),
                gender: Gender::Female,
                phone_no: "5550001111".to_string(),
            },
            user_id,
        )
    }

    #[tokio::test]
    async fn test_create_user_reads_wrapped_id() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            json!({"status": {"message": "Signed up", "data": {"id": 42, "email": "g@hotel.test"}, "errors": []}}),
        );

        let user = NewUser {
            email: "g@hotel.test".to_string(),
            password: "secret1".to_string(),
        };
        let outcome = client(&transport).create_user(&user).await.unwrap();
        assert_eq!(
            outcome,
            ApiOutcome::Accepted(CreatedUser {
                id: 42,
                email: "g@hotel.test".to_string()
            })
        );
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"user": {"email": "g@hotel.test", "password": "secret1"}}))
        );
    }

    #[tokio::test]
    async fn test_create_user_without_id_is_invalid() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!({"status": {"message": "?", "errors": []}}));

        let user = NewUser {
            email: "g@hotel.test".to_string(),
            password: "secret1".to_string(),
        };
        let result = client(&transport).create_user(&user).await;
        assert!(matches!(result, Err(AppError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_update_user_detail_path() {
        let transport = ScriptedTransport::new();
        transport.respond(200, json!({"message": "updated"}));

        let outcome = client(&transport).update_user_detail(42, &payload(42)).await.unwrap();
        assert_eq!(outcome, ApiOutcome::Accepted(UserDetail::from_payload(None, payload(42))));

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/user_details/42");
        assert!(request.body.as_ref().unwrap()["user_detail"].get("email").is_none());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let transport = ScriptedTransport::new();
        transport.respond(204, Value::Null);

        let outcome = client(&transport).delete_user(42).await.unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(transport.requests()[0].path, "/users/42");
    }
}
