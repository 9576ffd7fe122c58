//! Staff enrollment form.
//!
//! Email and password are only collected when adding; editing changes the
//! personal details of an existing user and never touches credentials.

use validator::ValidateEmail;

use super::{FieldErrors, FormMode, Ticket, Touched, parse_flexible_date};
use crate::models::staff::{Gender, NewUser, UserDetail, UserDetailFields};

pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const DATE_OF_BIRTH: &str = "date_of_birth";
pub const GENDER: &str = "gender";
pub const PHONE_NO: &str = "phone_no";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

const MIN_PASSWORD_LEN: usize = 6;

/// Validated request produced by a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum StaffSubmission {
    /// Create credentials, then the detail record that references them.
    Enroll {
        credentials: NewUser,
        details: UserDetailFields,
    },
    Update {
        user_id: i64,
        details: UserDetailFields,
    },
}

/// Form state for the staff dialog.
#[derive(Debug, Clone, Default)]
pub struct StaffForm {
    /// Owner of the record being edited; `None` when adding.
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// Raw date input, `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub gender: Option<Gender>,
    pub phone_no: String,
    pub email: String,
    pub password: String,
    pub touched: Touched,
    pub is_open: bool,
    /// Outstanding submission; further submits are refused while set.
    pub pending: Option<Ticket>,
}

impl StaffForm {
    /// Open an empty form for a new staff member.
    pub fn add() -> Self {
        Self {
            is_open: true,
            ..Default::default()
        }
    }

    /// Open a form pre-filled from an existing record. Credentials stay blank.
    pub fn edit(detail: &UserDetail) -> Self {
        Self {
            user_id: Some(detail.user_id),
            first_name: detail.first_name.clone(),
            last_name: detail.last_name.clone(),
            date_of_birth: detail.date_of_birth.format("%Y-%m-%d").to_string(),
            gender: Some(detail.gender),
            phone_no: detail.phone_no.clone(),
            is_open: true,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.user_id.is_some() { FormMode::Edit } else { FormMode::Add }
    }

    /// Reset the form to default values (closes it).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<StaffSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            errors.add(FIRST_NAME, "First name is required");
        }
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            errors.add(LAST_NAME, "Last name is required");
        }

        let date_of_birth = if self.date_of_birth.trim().is_empty() {
            errors.add(DATE_OF_BIRTH, "Date of birth is required");
            None
        } else {
            let parsed = parse_flexible_date(&self.date_of_birth);
            if parsed.is_none() {
                errors.add(DATE_OF_BIRTH, "Date of birth must be a valid date");
            }
            parsed
        };

        if self.gender.is_none() {
            errors.add(GENDER, "Gender is required");
        }

        let phone_no = self.phone_no.trim();
        if phone_no.is_empty() {
            errors.add(PHONE_NO, "Phone number is required");
        } else if !is_phone_number(phone_no) {
            errors.add(PHONE_NO, "Phone number must be 10 digits");
        }

        if self.mode() == FormMode::Add {
            let email = self.email.trim();
            if email.is_empty() {
                errors.add(EMAIL, "Email is required");
            } else if !email.to_string().validate_email() {
                errors.add(EMAIL, "Invalid email address");
            }

            if self.password.is_empty() {
                errors.add(PASSWORD, "Password is required");
            } else if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.add(PASSWORD, "Password must be at least 6 characters");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let (Some(date_of_birth), Some(gender)) = (date_of_birth, self.gender) else {
            return Err(errors);
        };

        let details = UserDetailFields {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth,
            gender,
            phone_no: phone_no.to_string(),
        };

        Ok(match self.user_id {
            Some(user_id) => StaffSubmission::Update { user_id, details },
            None => StaffSubmission::Enroll {
                credentials: NewUser {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                },
                details,
            },
        })
    }

    /// Message to show under `field`, once the user has edited it.
    pub fn visible_error(&self, field: &str) -> Option<String> {
        if !self.touched.contains(field) {
            return None;
        }
        self.validate().err().and_then(|e| e.get(field).map(str::to_string))
    }

    pub fn can_submit(&self) -> bool {
        self.pending.is_none() && self.validate().is_ok()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a submission. Returns `None` while another one is outstanding
    /// or when validation fails.
    pub fn begin_submit(&mut self) -> Option<(Ticket, StaffSubmission)> {
        if self.pending.is_some() {
            return None;
        }
        let submission = self.validate().ok()?;
        let ticket = Ticket::next();
        self.pending = Some(ticket);
        Some((ticket, submission))
    }

    /// Mark the submission behind `ticket` as finished. Returns `false` when
    /// it was not started by this form, which is then left untouched.
    pub fn finish_submit(&mut self, ticket: Ticket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        true
    }
}

fn is_phone_number(input: &str) -> bool {
    input.len() == 10 && input.bytes().all(|b| b.is_ascii_digit())
}
