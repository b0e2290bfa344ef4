//! Reservation Model

use super::serde_helpers::blank_as_none;
use super::status::ReservationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Reservation entity (table `reservations`)
///
/// `date` and `time` are kept as the submitted text (`YYYY-MM-DD` / `HH:MM`);
/// availability lookups compare them by exact string equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub date: String,
    pub time: String,
    pub persons: i32,
    pub notes: Option<String>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Public reservation form payload
///
/// Field names follow the booking form (`name`, `guests`). Missing text
/// fields deserialize to empty strings so validation reports them per field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "phone is required"))]
    pub phone: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_date_format"))]
    pub date: String,
    #[serde(default)]
    #[validate(custom(function = "validate_time_format"))]
    pub time: String,
    #[serde(default)]
    #[validate(range(min = 1, max = 500, message = "guests must be at least 1"))]
    pub guests: i32,
    #[validate(length(max = 200))]
    pub preference: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Store-side insert for a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub date: String,
    pub time: String,
    pub persons: i32,
    pub notes: Option<String>,
    pub status: ReservationStatus,
}

impl NewReservation {
    /// Map a public form payload to the store naming.
    ///
    /// The store has no preference column, so a non-empty preference is
    /// folded into the notes.
    pub fn from_form(form: ReservationCreate, status: ReservationStatus) -> Self {
        let preference = form.preference.filter(|p| !p.trim().is_empty());
        let notes = form.notes.filter(|n| !n.trim().is_empty());
        let notes = match (preference, notes) {
            (Some(p), Some(n)) => Some(format!("Preference: {}\n{}", p.trim(), n)),
            (Some(p), None) => Some(format!("Preference: {}", p.trim())),
            (None, notes) => notes,
        };

        Self {
            full_name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email,
            date: form.date,
            time: form.time,
            persons: form.guests,
            notes,
            status,
        }
    }
}

/// Availability check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub time: String,
}

/// Result of an availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub current_count: i64,
    pub max_capacity: i64,
}

/// Status update body shared by the reservation and order endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-MM-DD`, shape only
pub fn validate_date_format(value: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = value.split('-').collect();
    let ok = matches!(parts.as_slice(), [y, m, d]
        if y.len() == 4 && m.len() == 2 && d.len() == 2
            && all_digits(y) && all_digits(m) && all_digits(d));
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("date_format");
        err.message = Some("date must be formatted as YYYY-MM-DD".into());
        Err(err)
    }
}

/// `HH:MM`, 24-hour clock
pub fn validate_time_format(value: &str) -> Result<(), ValidationError> {
    let ok = match value.split_once(':') {
        Some((h, m)) if h.len() == 2 && m.len() == 2 && all_digits(h) && all_digits(m) => {
            h.parse::<u8>().is_ok_and(|h| h < 24) && m.parse::<u8>().is_ok_and(|m| m < 60)
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_format");
        err.message = Some("time must be formatted as HH:MM".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ReservationCreate {
        ReservationCreate {
            name: "Amina Benali".to_string(),
            phone: "+212600000000".to_string(),
            email: Some("amina@example.com".to_string()),
            date: "2024-06-01".to_string(),
            time: "19:00".to_string(),
            guests: 4,
            preference: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_reported() {
        let payload: ReservationCreate = serde_json::from_str(r#"{"email":null}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "phone", "date", "time", "guests"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_zero_guests_rejected() {
        let mut f = form();
        f.guests = 0;
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut f = form();
        f.email = Some("not-an-email".to_string());
        let errors = f.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_blank_email_is_absent() {
        let payload: ReservationCreate = serde_json::from_str(
            r#"{"name":"Amina","phone":"0600","email":"","date":"2024-06-01","time":"20:00","guests":4}"#,
        )
        .unwrap();
        assert_eq!(payload.email, None);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_date_and_time_shapes() {
        assert!(validate_date_format("2024-06-01").is_ok());
        assert!(validate_date_format("01/06/2024").is_err());
        assert!(validate_date_format("2024-6-1").is_err());
        assert!(validate_time_format("19:00").is_ok());
        assert!(validate_time_format("7pm").is_err());
        assert!(validate_time_format("24:00").is_err());
        assert!(validate_time_format("19:60").is_err());
    }

    #[test]
    fn test_from_form_maps_names_and_folds_preference() {
        let mut f = form();
        f.preference = Some("terrace".to_string());
        f.notes = Some("birthday".to_string());
        let new = NewReservation::from_form(f, ReservationStatus::Pending);
        assert_eq!(new.full_name, "Amina Benali");
        assert_eq!(new.persons, 4);
        assert_eq!(new.notes.as_deref(), Some("Preference: terrace\nbirthday"));
        assert_eq!(new.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_from_form_without_preference_keeps_notes() {
        let mut f = form();
        f.notes = Some("window seat".to_string());
        let new = NewReservation::from_form(f, ReservationStatus::Waitlist);
        assert_eq!(new.notes.as_deref(), Some("window seat"));
    }

    #[test]
    fn test_availability_is_camel_case() {
        let a = Availability {
            available: false,
            current_count: 2,
            max_capacity: 2,
        };
        let json = serde_json::to_value(a).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"available": false, "currentCount": 2, "maxCapacity": 2})
        );
    }
}
