//! Dashboard Model

use serde::{Deserialize, Serialize};

/// Most viewed dish entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopDish {
    pub name_fr: String,
    pub view_count: i64,
}

/// Back-office dashboard counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Reservations dated today or later
    pub today_reservations: i64,
    /// Reservations dated within the last seven days or later
    pub week_reservations: i64,
    /// Inquiry orders still `new`
    pub pending_orders: i64,
    pub unread_messages: i64,
    pub top_dishes: Vec<TopDish>,
}
