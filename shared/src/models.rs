use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::StoreError;

/// Title used when a booking carries none
pub const DEFAULT_EVENT_TITLE: &str = "Meeting";

/// Location used when a booking carries none
pub const DEFAULT_EVENT_LOCATION: &str = "Online";

/// Prompt shown when a customer is submitted without name or email
pub const REQUIRED_FIELDS_PROMPT: &str = "Name and email are required";

/// Person attending a booking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Attendee {
    /// Name when present, otherwise the email address
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.email.as_deref())
            .unwrap_or_default()
    }
}

/// Calendar event derived from a booking.
///
/// `start` and `end` are `None` when the source timestamp could not be
/// parsed; such events never land in a calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub location: String,
    pub description: String,
    pub attendees: Vec<Attendee>,
}

impl Event {
    /// Calendar date the event starts on, as seen from `tz`
    pub fn start_date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.start.map(|start| start.with_timezone(tz).date_naive())
    }

    /// `"2:00 PM - 2:30 PM"` in the given zone
    pub fn time_range_label<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let label = |instant: Option<DateTime<Utc>>| match instant {
            Some(instant) => instant.with_timezone(tz).format("%-I:%M %p").to_string(),
            None => "Invalid Date".to_string(),
        };
        format!("{} - {}", label(self.start), label(self.end))
    }

    /// Comma separated attendee labels
    pub fn attendee_summary(&self) -> String {
        self.attendees
            .iter()
            .map(Attendee::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Customer appointment row held by the tabular-data store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    /// `YYYY-MM-DD` when set, empty otherwise
    pub appointment_on: String,
    pub appointment_for: String,
    pub timing: String,
    /// Remote record exactly as received
    pub raw: serde_json::Value,
}

impl Customer {
    pub fn appointment_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.appointment_on, "%Y-%m-%d").ok()
    }

    /// `"Jan 13, 2024"`, the raw value when it is not a date, `"-"` when unset
    pub fn appointment_label(&self) -> String {
        if self.appointment_on.is_empty() {
            return "-".to_string();
        }
        match self.appointment_date() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => self.appointment_on.clone(),
        }
    }
}

/// Write payload for creating or updating a customer.
///
/// `None` means the field was not provided at all, `Some("")` means it was
/// provided blank. Create drops both; update forwards the blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CustomerInput {
    #[validate(required, custom = "not_blank")]
    pub name: Option<String>,

    #[validate(required, custom = "not_blank")]
    pub email: Option<String>,

    pub appointment_on: Option<String>,
    pub appointment_for: Option<String>,
    pub timing: Option<String>,
}

impl CustomerInput {
    /// Reject drafts without a usable name and email
    pub fn check_required(&self) -> Result<(), StoreError> {
        self.validate()
            .map_err(|_| StoreError::Validation(REQUIRED_FIELDS_PROMPT.to_string()))
    }
}

impl From<&Customer> for CustomerInput {
    fn from(customer: &Customer) -> Self {
        Self {
            name: Some(customer.name.clone()),
            email: Some(customer.email.clone()),
            appointment_on: Some(customer.appointment_on.clone()),
            appointment_for: Some(customer.appointment_for.clone()),
            timing: Some(customer.timing.clone()),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn customer(appointment_on: &str) -> Customer {
        Customer {
            id: "rec1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            appointment_on: appointment_on.to_string(),
            appointment_for: String::new(),
            timing: String::new(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_attendee_label_prefers_name() {
        let named = Attendee {
            name: Some("Client ABC".to_string()),
            email: Some("abc@example.com".to_string()),
        };
        let anonymous = Attendee {
            name: Some(String::new()),
            email: Some("abc@example.com".to_string()),
        };

        assert_eq!(named.label(), "Client ABC");
        assert_eq!(anonymous.label(), "abc@example.com");
        assert_eq!(Attendee::default().label(), "");
    }

    #[test]
    fn test_time_range_label_uses_zone() {
        let start = "2025-07-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let event = Event {
            id: "1".to_string(),
            title: "Standup".to_string(),
            start: Some(start),
            end: Some(start + chrono::Duration::minutes(30)),
            location: DEFAULT_EVENT_LOCATION.to_string(),
            description: String::new(),
            attendees: vec![],
        };
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(event.time_range_label(&plus_two), "2:00 PM - 2:30 PM");
    }

    #[test]
    fn test_appointment_label() {
        assert_eq!(customer("2024-01-13").appointment_label(), "Jan 13, 2024");
        assert_eq!(customer("").appointment_label(), "-");
        assert_eq!(customer("next week").appointment_label(), "next week");
    }

    #[test]
    fn test_required_fields() {
        let mut input = CustomerInput {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        assert!(input.check_required().is_ok());

        input.name = Some("   ".to_string());
        assert_eq!(
            input.check_required(),
            Err(StoreError::Validation(REQUIRED_FIELDS_PROMPT.to_string()))
        );

        input.name = Some("Ada".to_string());
        input.email = None;
        assert!(input.check_required().is_err());
    }

    #[test]
    fn test_input_from_customer_keeps_blanks() {
        let input = CustomerInput::from(&customer(""));

        assert_eq!(input.appointment_on, Some(String::new()));
        assert_eq!(input.timing, Some(String::new()));
    }
}
