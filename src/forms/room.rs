//! Room enrollment form.

use super::{FieldErrors, FormMode, Ticket, Touched};
use crate::models::room::{Room, RoomFields, RoomType};

pub const ROOM_TYPE: &str = "room_type";
pub const DESCRIPTION: &str = "description";
pub const CHARGES: &str = "charges";
pub const CAPACITY: &str = "capacity";

/// Validated request produced by a submit.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomSubmission {
    Create(RoomFields),
    Update { id: i64, fields: RoomFields },
}

/// Form state for the room dialog.
#[derive(Debug, Clone, Default)]
pub struct RoomForm {
    /// Record being edited; `None` when adding.
    pub id: Option<i64>,
    pub room_type: Option<RoomType>,
    pub description: String,
    pub charges: String,
    pub capacity: String,
    pub touched: Touched,
    pub is_open: bool,
    /// Outstanding submission; further submits are refused while set.
    pub pending: Option<Ticket>,
}

impl RoomForm {
    /// Open an empty form for a new room.
    pub fn add() -> Self {
        Self {
            charges: "0".to_string(),
            is_open: true,
            ..Default::default()
        }
    }

    /// Open a form pre-filled from an existing room.
    pub fn edit(room: &Room) -> Self {
        Self {
            id: Some(room.id),
            room_type: Some(room.room_type),
            description: room.description.clone(),
            charges: room.charges.to_string(),
            capacity: room.capacity.to_string(),
            touched: Touched::default(),
            is_open: true,
            pending: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.id.is_some() { FormMode::Edit } else { FormMode::Add }
    }

    /// Reset the form to default values (closes it).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<RoomFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.room_type.is_none() {
            errors.add(ROOM_TYPE, "Room type is required");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.add(DESCRIPTION, "Description is required");
        }

        let charges = parse_charges(&self.charges).unwrap_or_else(|message| {
            errors.add(CHARGES, message);
            0.0
        });

        let capacity = parse_capacity(&self.capacity).unwrap_or_else(|message| {
            errors.add(CAPACITY, message);
            0
        });

        errors.into_result(|| RoomFields {
            room_type: self.room_type.unwrap_or(RoomType::Single),
            description: description.to_string(),
            charges,
            capacity,
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
    pub fn begin_submit(&mut self) -> Option<(Ticket, RoomSubmission)> {
        if self.pending.is_some() {
            return None;
        }
        let fields = self.validate().ok()?;
        let ticket = Ticket::next();
        self.pending = Some(ticket);

        let submission = match self.id {
            Some(id) => RoomSubmission::Update { id, fields },
            None => RoomSubmission::Create(fields),
        };
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

fn parse_charges(input: &str) -> Result<f64, &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Charges are required");
    }
    let value: f64 = input.parse().map_err(|_| "Charges must be a number")?;
    if !value.is_finite() {
        return Err("Charges must be a number");
    }
    if value < 0.0 {
        return Err("Charges must be at least 0");
    }
    Ok(value)
}

fn parse_capacity(input: &str) -> Result<u32, &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Capacity is required");
    }
    let value: i64 = match input.parse() {
        Ok(value) => value,
        // Overflowing whole numbers are out of range
        Err(_) => {
            let (negative, digits) = match input.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, input.strip_prefix('+').unwrap_or(input)),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err("Capacity must be a whole number");
            }
            if negative { i64::MIN } else { i64::MAX }
        }
    };
    if value < 1 {
        return Err("Capacity must be at least 1");
    }
    if value > 100 {
        return Err("Capacity cannot exceed 100");
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RoomForm {
        RoomForm {
            room_type: Some(RoomType::Suite),
            description: "Top floor".to_string(),
            charges: "300".to_string(),
            capacity: "4".to_string(),
            ..RoomForm::add()
        }
    }

    fn error_for(form: &RoomForm, field: &str) -> Option<String> {
        form.validate().err().and_then(|e| e.get(field).map(str::to_string))
    }

    #[test]
    fn test_valid_form_enables_submit() {
        let form = valid_form();
        assert!(form.can_submit());
        assert_eq!(
            form.validate().unwrap(),
            RoomFields {
                room_type: RoomType::Suite,
                description: "Top floor".to_string(),
                charges: 300.0,
                capacity: 4,
            }
        );
    }

    #[test]
    fn test_capacity_bounds() {
        let mut form = valid_form();

        form.capacity = "0".to_string();
        assert_eq!(error_for(&form, CAPACITY).as_deref(), Some("Capacity must be at least 1"));
        assert!(!form.can_submit());

        form.capacity = "150".to_string();
        assert_eq!(error_for(&form, CAPACITY).as_deref(), Some("Capacity cannot exceed 100"));

        form.capacity = "2.5".to_string();
        assert_eq!(error_for(&form, CAPACITY).as_deref(), Some("Capacity must be a whole number"));

        form.capacity = String::new();
        assert_eq!(error_for(&form, CAPACITY).as_deref(), Some("Capacity is required"));

        for edge in ["1", "100"] {
            form.capacity = edge.to_string();
            assert!(form.can_submit(), "capacity {edge} should be valid");
        }
    }

    #[test]
    fn test_huge_capacity_is_out_of_range() {
        let mut form = valid_form();

        form.capacity = "99999999999999999999".to_string();
        assert_eq!(error_for(&form, CAPACITY).as_deref(), Some("Capacity cannot exceed 100"));

        form.capacity = "-99999999999999999999".to_string();
        assert_eq!(error_for(&form, CAPACITY).as_deref(), Some("Capacity must be at least 1"));

        form.capacity = "9999999999999999999x".to_string();
        assert_eq!(error_for(&form, CAPACITY).as_deref(), Some("Capacity must be a whole number"));
    }

    #[test]
    fn test_charges_rules() {
        let mut form = valid_form();

        form.charges = "-1".to_string();
        assert_eq!(error_for(&form, CHARGES).as_deref(), Some("Charges must be at least 0"));

        form.charges = "abc".to_string();
        assert_eq!(error_for(&form, CHARGES).as_deref(), Some("Charges must be a number"));

        form.charges = " ".to_string();
        assert_eq!(error_for(&form, CHARGES).as_deref(), Some("Charges are required"));

        form.charges = "0".to_string();
        assert!(form.can_submit());
    }

    #[test]
    fn test_required_type_and_description() {
        let mut form = valid_form();
        form.room_type = None;
        form.description = "   ".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(ROOM_TYPE), Some("Room type is required"));
        assert_eq!(errors.get(DESCRIPTION), Some("Description is required"));
    }

    #[test]
    fn test_errors_visible_only_when_touched() {
        let mut form = RoomForm::add();
        assert_eq!(form.visible_error(CAPACITY), None);

        form.touched.touch(CAPACITY);
        assert_eq!(form.visible_error(CAPACITY).as_deref(), Some("Capacity is required"));
    }

    #[test]
    fn test_edit_prefills_and_submits_update() {
        let room = Room {
            id: 9,
            room_type: RoomType::Double,
            description: "Garden".to_string(),
            charges: 99.5,
            capacity: 2,
        };
        let mut form = RoomForm::edit(&room);
        assert_eq!(form.mode(), FormMode::Edit);
        assert!(form.is_open);

        assert_eq!(
            form.begin_submit().map(|(_, submission)| submission),
            Some(RoomSubmission::Update {
                id: 9,
                fields: room.fields()
            })
        );
    }

    #[test]
    fn test_second_submit_refused_while_in_flight() {
        let mut form = valid_form();
        let (ticket, submission) = form.begin_submit().unwrap();
        assert!(matches!(submission, RoomSubmission::Create(_)));
        assert!(form.begin_submit().is_none());
        assert!(!form.can_submit());

        assert!(form.finish_submit(ticket));
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_finish_ignores_ticket_from_earlier_form() {
        let mut form = valid_form();
        let (stale, _) = form.begin_submit().unwrap();

        form.reset();
        form = valid_form();
        let (current, _) = form.begin_submit().unwrap();
        assert_ne!(stale, current);

        assert!(!form.finish_submit(stale));
        assert!(form.is_submitting());
        assert!(form.finish_submit(current));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_invalid_form_does_not_start_submit() {
        let mut form = RoomForm::add();
        assert!(form.begin_submit().is_none());
        assert!(!form.is_submitting());
    }
}
