//! Custom-cake inquiry Model

use super::serde_helpers::blank_as_none;
use super::status::InquiryStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inquiry order entity (table `orders`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InquiryOrder {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub type_event: String,
    pub persons: i32,
    pub date_needed: String,
    pub budget: Option<String>,
    pub description: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub img_refs: Vec<String>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// Public custom-cake form payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InquiryCreate {
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
    #[validate(length(min = 1, max = 100, message = "event type is required"))]
    pub event_type: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "event date is required"))]
    pub event_date: String,
    #[serde(default)]
    #[validate(range(min = 1, message = "guest count must be at least 1"))]
    pub guest_count: i32,
    #[validate(length(max = 100))]
    pub budget: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub inspiration_photos: Vec<String>,
}

/// Store-side insert for an inquiry order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInquiry {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub type_event: String,
    pub persons: i32,
    pub date_needed: String,
    pub budget: Option<String>,
    pub description: String,
    pub img_refs: Vec<String>,
}

impl From<InquiryCreate> for NewInquiry {
    fn from(form: InquiryCreate) -> Self {
        Self {
            full_name: form.name.trim().to_string(),
            email: form.email.unwrap_or_default(),
            phone: form.phone.trim().to_string(),
            type_event: form.event_type,
            persons: form.guest_count,
            date_needed: form.event_date,
            budget: form.budget.filter(|b| !b.trim().is_empty()),
            description: form.description,
            img_refs: form.inspiration_photos,
        }
    }
}
