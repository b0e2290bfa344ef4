//! Contact message Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact message entity (table `messages`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Message {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Public contact form payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MessageCreate {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "subject is required"))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "message is required"))]
    pub message: String,
}

/// Store-side insert for a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl From<MessageCreate> for NewMessage {
    fn from(form: MessageCreate) -> Self {
        Self {
            full_name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.filter(|p| !p.trim().is_empty()),
            subject: form.subject,
            message: form.message,
        }
    }
}

/// Read flag update body; an absent flag means "mark as read"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadFlagUpdate {
    pub is_read: Option<bool>,
}

/// Result of a bulk mark-as-read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkAllReadResult {
    pub updated: u64,
}
