//! Setting Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the per-slot capacity setting (integer stored as text)
pub const MAX_CAPACITY_KEY: &str = "max_capacity";

/// Key/value setting (table `settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update setting payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingUpdate {
    pub value: String,
}
