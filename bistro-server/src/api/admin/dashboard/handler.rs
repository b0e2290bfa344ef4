use axum::{Json, extract::State};
use chrono::{Duration, NaiveDate, Utc};
use shared::models::{DashboardStats, InquiryStatus};

use crate::core::ServerState;
use crate::store::{MenuStore, MessageStore, OrderStore, ReservationStore};
use crate::utils::AppResult;

const TOP_DISHES: i64 = 5;

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// GET /api/admin/dashboard
///
/// Reservation counts compare the stored `YYYY-MM-DD` text against today
/// and today minus seven days (UTC).
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let today = Utc::now().date_naive();
    let today_str = ymd(today);
    let week_start = ymd(today - Duration::days(7));

    let store = &state.store;
    let (today_reservations, week_reservations, pending_orders, unread_messages, top_dishes) =
        tokio::try_join!(
            store.count_reservations_since(&today_str),
            store.count_reservations_since(&week_start),
            store.count_inquiries_with_status(InquiryStatus::New),
            store.count_unread_messages(),
            store.top_dishes(TOP_DISHES),
        )?;

    Ok(Json(DashboardStats {
        today_reservations,
        week_reservations,
        pending_orders,
        unread_messages,
        top_dishes,
    }))
}
