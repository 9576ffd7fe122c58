//! Form state and client-side validation for the enrollment dialogs.
//!
//! Forms hold raw text input exactly as typed; `validate` turns it into a
//! typed payload or a set of per-field messages.

pub mod room;
pub mod staff;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;

pub use room::{RoomForm, RoomSubmission};
pub use staff::{StaffForm, StaffSubmission};

/// Whether a dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Add,
    Edit,
}

impl FormMode {
    /// Verb used in dialog titles.
    pub fn verb(&self) -> &'static str {
        match self {
            FormMode::Add => "Add",
            FormMode::Edit => "Update",
        }
    }
}

/// Identifies one submission, so a late result can be matched to the form
/// that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Ticket(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Validation messages keyed by field name. Only the first failing rule of
/// each field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Convert to `Err` when any message was recorded.
    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// Fields the user has edited. Messages are only shown for these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Touched(BTreeSet<&'static str>);

impl Touched {
    pub fn touch(&mut self, field: &'static str) {
        self.0.insert(field);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }
}

/// Parse date input flexibly, accepting multiple formats.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.add("capacity", "Capacity is required");
        errors.add("capacity", "Capacity must be at least 1");
        errors.add("description", "Description is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("capacity"), Some("Capacity is required"));
        assert_eq!(errors.get("charges"), None);
    }

    #[test]
    fn test_parse_flexible_date() {
        let expected = NaiveDate::from_ymd_opt(1990, 5, 1);
        assert_eq!(parse_flexible_date("1990-05-01"), expected);
        assert_eq!(parse_flexible_date(" 1990/05/01 "), expected);
        assert_eq!(parse_flexible_date("1990.05.01"), expected);
        assert_eq!(parse_flexible_date("1990-02-30"), None);
        assert_eq!(parse_flexible_date(""), None);
    }
}
