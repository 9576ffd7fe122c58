//! Submission flows behind the room and staff dialogs.
//!
//! Every flow resolves to a [`Submitted`] value: the dialog closes on
//! `Saved` and stays open on `Failed`. Transport failures are logged and
//! turned into a single error notice, so callers handle one shape.

use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiOutcome};
use crate::error::AppError;
use crate::forms::{RoomSubmission, StaffSubmission};
use crate::models::room::Room;
use crate::models::staff::{NewUser, UserDetail, UserDetailFields, UserDetailPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Final state of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted<T> {
    /// Record saved; report it upward and close the dialog.
    Saved { record: T, notices: Vec<Notice> },
    /// Nothing usable was saved; keep the dialog open.
    Failed { notices: Vec<Notice> },
}

impl<T> Submitted<T> {
    pub fn notices(&self) -> &[Notice] {
        match self {
            Submitted::Saved { notices, .. } | Submitted::Failed { notices } => notices,
        }
    }

    fn saved(record: T, message: &str) -> Self {
        Submitted::Saved {
            record,
            notices: vec![Notice::success(message)],
        }
    }

    fn rejected(errors: Vec<String>) -> Self {
        Submitted::Failed {
            notices: errors.into_iter().map(Notice::error).collect(),
        }
    }

    fn unreachable(action: &str, err: &AppError) -> Self {
        error!("Error {action}: {err}");
        Submitted::Failed {
            notices: vec![Notice::error(format!("Error {action}: {err}"))],
        }
    }
}

/// Runs submissions against the backend.
#[derive(Clone)]
pub struct EnrollService {
    client: ApiClient,
}

impl EnrollService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create or replace a room.
    pub async fn submit_room(&self, submission: RoomSubmission) -> Submitted<Room> {
        match submission {
            RoomSubmission::Create(fields) => match self.client.create_room(&fields).await {
                Ok(ApiOutcome::Accepted(room)) => {
                    info!("Room {} added", room.id);
                    Submitted::saved(room, "Room added successfully!")
                }
                Ok(ApiOutcome::Rejected(errors)) => {
                    warn!("Room add rejected: {}", errors.join("; "));
                    Submitted::rejected(errors)
                }
                Err(e) => Submitted::unreachable("adding room", &e),
            },
            RoomSubmission::Update { id, fields } => match self.client.update_room(id, &fields).await {
                Ok(ApiOutcome::Accepted(room)) => {
                    info!("Room {id} updated");
                    Submitted::saved(room, "Room updated successfully!")
                }
                Ok(ApiOutcome::Rejected(errors)) => {
                    warn!("Room {id} update rejected: {}", errors.join("; "));
                    Submitted::rejected(errors)
                }
                Err(e) => Submitted::unreachable("updating room", &e),
            },
        }
    }

    /// Enroll a new staff member or replace an existing one's details.
    pub async fn submit_staff(&self, submission: StaffSubmission) -> Submitted<UserDetail> {
        match submission {
            StaffSubmission::Enroll { credentials, details } => self.enroll_staff(credentials, details).await,
            StaffSubmission::Update { user_id, details } => {
                let payload = UserDetailPayload::staff(details, user_id);
                match self.client.update_user_detail(user_id, &payload).await {
                    Ok(ApiOutcome::Accepted(detail)) => {
                        info!("Staff details for user {user_id} updated");
                        Submitted::saved(detail, "Staff updated successfully!")
                    }
                    Ok(ApiOutcome::Rejected(errors)) => {
                        warn!("Staff update for user {user_id} rejected: {}", errors.join("; "));
                        Submitted::rejected(errors)
                    }
                    Err(e) => Submitted::unreachable("updating staff", &e),
                }
            }
        }
    }

    /// Two-phase enrollment: credentials first, then the detail record
    /// referencing the new user id. The detail call is only issued after
    /// the credential was accepted; if it then fails, the credential is
    /// deleted again.
    async fn enroll_staff(&self, credentials: NewUser, details: UserDetailFields) -> Submitted<UserDetail> {
        let user = match self.client.create_user(&credentials).await {
            Ok(ApiOutcome::Accepted(user)) => user,
            Ok(ApiOutcome::Rejected(errors)) => {
                warn!("User creation for {} rejected: {}", credentials.email, errors.join("; "));
                return Submitted::rejected(errors);
            }
            Err(e) => return Submitted::unreachable("adding staff", &e),
        };
        info!("User {} created for {}", user.id, credentials.email);

        let payload = UserDetailPayload::staff(details, user.id);
        let mut failed = match self.client.create_user_detail(&payload).await {
            Ok(ApiOutcome::Accepted(detail)) => {
                info!("Staff details created for user {}", user.id);
                return Submitted::saved(detail, "Staff added successfully!");
            }
            Ok(ApiOutcome::Rejected(errors)) => {
                warn!("Staff details for user {} rejected: {}", user.id, errors.join("; "));
                errors.into_iter().map(Notice::error).collect::<Vec<_>>()
            }
            Err(e) => {
                error!("Error adding staff details for user {}: {e}", user.id);
                vec![Notice::error(format!("Error adding staff: {e}"))]
            }
        };

        if let Some(notice) = self.remove_orphaned_user(user.id).await {
            failed.push(notice);
        }
        Submitted::Failed { notices: failed }
    }

    /// Delete a credential whose detail record could not be created.
    /// Returns a notice when the credential is left behind.
    async fn remove_orphaned_user(&self, user_id: i64) -> Option<Notice> {
        let reason = match self.client.delete_user(user_id).await {
            Ok(ApiOutcome::Accepted(())) => {
                info!("Removed user {user_id} after failed staff details");
                return None;
            }
            Ok(ApiOutcome::Rejected(errors)) => errors.join("; "),
            Err(e) => e.to_string(),
        };

        error!("User {user_id} left without staff details, removal failed: {reason}");
        Some(Notice::error(format!(
            "User account {user_id} was created but could not be removed: {reason}"
        )))
    }
}
