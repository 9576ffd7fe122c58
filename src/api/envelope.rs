//! Response envelope handling.
//!
//! The backend reports business errors inside the body as
//! `{"status": {"errors": [...]}}` and returns records either bare or
//! wrapped as `{"status": {"data": {...}}}`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiResponse;
use crate::error::{AppError, Result};

/// Result of a call the backend understood.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// Request accepted; carries the resulting record.
    Accepted(T),
    /// Backend refused the request with one or more messages.
    Rejected(Vec<String>),
}

impl<T> ApiOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Accepted(value) => ApiOutcome::Accepted(f(value)),
            ApiOutcome::Rejected(errors) => ApiOutcome::Rejected(errors),
        }
    }

    /// Like `map`, for conversions that can fail.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<ApiOutcome<U>> {
        Ok(match self {
            ApiOutcome::Accepted(value) => ApiOutcome::Accepted(f(value)?),
            ApiOutcome::Rejected(errors) => ApiOutcome::Rejected(errors),
        })
    }

    #[cfg(test)]
    pub fn is_accepted(&self) -> bool {
        matches!(self, ApiOutcome::Accepted(_))
    }
}

/// Classify a raw response.
///
/// An error list wins over the status code. A non-success status without
/// an error list is a transport-level failure.
pub fn classify(response: ApiResponse) -> Result<ApiOutcome<Value>> {
    let errors = error_messages(&response.body);
    if !errors.is_empty() {
        return Ok(ApiOutcome::Rejected(errors));
    }

    if !response.is_success() {
        return Err(AppError::Status {
            status: response.status,
            body: response.body.to_string(),
        });
    }

    Ok(ApiOutcome::Accepted(response.body))
}

/// Collect error messages from `status.errors` or a top-level `errors`.
pub fn error_messages(body: &Value) -> Vec<String> {
    let errors = body
        .pointer("/status/errors")
        .filter(|v| !v.is_null())
        .or_else(|| body.get("errors"));

    match errors {
        Some(Value::Array(items)) => items.iter().filter_map(message_text).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        // Rails-style `{"field": ["is invalid"]}`
        Some(Value::Object(fields)) => fields
            .iter()
            .flat_map(|(field, value)| match value {
                Value::Array(items) => items
                    .iter()
                    .filter_map(message_text)
                    .map(|m| format!("{field} {m}"))
                    .collect::<Vec<_>>(),
                other => message_text(other).map(|m| format!("{field} {m}")).into_iter().collect(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Decode a record from `status.data`, or from the body itself.
pub fn decode_record<T: DeserializeOwned>(body: Value) -> Result<T> {
    if let Some(data) = body.pointer("/status/data").filter(|v| !v.is_null())
        && let Ok(record) = T::deserialize(data)
    {
        return Ok(record);
    }

    T::deserialize(&body).map_err(|e| AppError::invalid_response(format!("unexpected record shape: {e}")))
}
