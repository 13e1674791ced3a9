//! Field registry — the static description of every field on the circular form.
//!
//! Declaration order is display order. Select fields carry their options in
//! the order they are offered; the reserved empty value means "nothing chosen
//! yet" and is never one of the options.

use super::error::{FormError, FormResult};

pub const SUBJECT: &str = "subject";
pub const AGENDA: &str = "agenda";
pub const AUDIENCE: &str = "audience";
pub const DEPARTMENT: &str = "department";
pub const URGENCY: &str = "urgency";
pub const VENUE: &str = "venue";
pub const EVENT_DATETIME: &str = "event_datetime";
pub const ADDITIONAL_INFO: &str = "additional_info";
pub const RECIPIENT_EMAIL: &str = "recipient_email";
pub const DATE: &str = "date";

/// Maximum characters accepted in the description text area.
pub const INFO_MAX_LENGTH: usize = 400;

/// Reserved select value: no option chosen.
pub const UNSELECTED: &str = "";

pub const DEPARTMENTS: &[&str] = &[
    "Computer Science and Engineering",
    "Information Science and Engineering",
    "Electronics and Communication Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Electrical and Electronics Engineering",
];

pub const URGENCY_LEVELS: &[&str] = &["Immediate", "Urgent", "Medium", "Low", "Routine"];

/// How a field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Select,
    TextArea,
    /// Filled only by the date picker; not typed into.
    DateReadOnly,
}

/// Immutable description of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    /// Icon class used by markup front-ends.
    pub icon: &'static str,
    pub kind: FieldKind,
    pub options: Option<&'static [&'static str]>,
    pub max_length: Option<usize>,
    pub required: bool,
}

const fn text(name: &'static str, label: &'static str, icon: &'static str, required: bool) -> FieldDefinition {
    FieldDefinition {
        name,
        label,
        icon,
        kind: FieldKind::Text,
        options: None,
        max_length: None,
        required,
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    icon: &'static str,
    options: &'static [&'static str],
) -> FieldDefinition {
    FieldDefinition {
        name,
        label,
        icon,
        kind: FieldKind::Select,
        options: Some(options),
        max_length: None,
        required: true,
    }
}

static FIELDS: [FieldDefinition; 10] = [
    text(SUBJECT, "Subject", "fas fa-heading", true),
    text(AGENDA, "Agenda", "fas fa-bullseye", true),
    text(AUDIENCE, "Target Audience", "fas fa-users", true),
    select(DEPARTMENT, "Department", "fas fa-building", DEPARTMENTS),
    select(URGENCY, "Urgency Level", "fas fa-exclamation-circle", URGENCY_LEVELS),
    text(VENUE, "Venue", "fas fa-map-marker-alt", true),
    text(EVENT_DATETIME, "Event Date & Time", "fas fa-calendar-alt", true),
    FieldDefinition {
        name: ADDITIONAL_INFO,
        label: "Description",
        icon: "fas fa-info-circle",
        kind: FieldKind::TextArea,
        options: None,
        max_length: Some(INFO_MAX_LENGTH),
        required: false,
    },
    text(RECIPIENT_EMAIL, "Recipient Email(s)", "fas fa-envelope", false),
    FieldDefinition {
        name: DATE,
        label: "Date of Issue",
        icon: "fas fa-calendar-check",
        kind: FieldKind::DateReadOnly,
        options: None,
        max_length: None,
        required: true,
    },
];

/// All declared fields, in display order.
pub fn fields() -> &'static [FieldDefinition] {
    &FIELDS
}

/// Look up a field by name.
pub fn field(name: &str) -> Option<&'static FieldDefinition> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Look up a field by name, failing with `UnknownField`.
pub fn require_field(name: &str) -> FormResult<&'static FieldDefinition> {
    field(name).ok_or_else(|| FormError::UnknownField(name.to_string()))
}

impl FieldDefinition {
    /// Truncate `value` to this field's capacity (in characters).
    pub fn clamp_input(&self, value: &str) -> String {
        match self.max_length {
            Some(max) if value.chars().count() > max => value.chars().take(max).collect(),
            _ => value.to_string(),
        }
    }

    /// Whether a select value is the unselected marker or a declared option.
    /// Non-select fields accept anything.
    pub fn accepts_option(&self, value: &str) -> bool {
        match self.options {
            Some(options) => value == UNSELECTED || options.contains(&value),
            None => true,
        }
    }

    /// Input-boundary check for typed or scripted values: clamps length,
    /// rejects undeclared options and writes to the date field.
    pub fn admit(&self, value: &str) -> FormResult<String> {
        if self.kind == FieldKind::DateReadOnly {
            return Err(FormError::ReadOnly(self.name));
        }
        if !self.accepts_option(value) {
            return Err(FormError::InvalidOption {
                field: self.name,
                value: value.to_string(),
            });
        }
        Ok(self.clamp_input(value))
    }

    /// Step through `UNSELECTED` followed by the options, wrapping around.
    /// Returns `None` for non-select fields.
    pub fn cycle_option(&self, current: &str, forward: bool) -> Option<&'static str> {
        let options = self.options?;
        // Slot 0 is the unselected marker, slots 1..=len the options.
        let slots = options.len() + 1;
        let pos = options
            .iter()
            .position(|o| *o == current)
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % slots
        } else {
            (pos + slots - 1) % slots
        };
        Some(if next == 0 { UNSELECTED } else { options[next - 1] })
    }
}
