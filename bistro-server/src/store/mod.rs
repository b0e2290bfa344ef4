//! Data store access
//!
//! The hosted Postgres database is the sole owner of persistent state; the
//! server holds no authoritative copy. Every table is reached through the
//! traits below so the core logic can run against [`MemoryStore`] in tests
//! and against [`PgStore`] in production.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    CartOrder, CartOrderStatus, Dish, DishCreate, DishType, DishTypeCreate, DishTypePosition,
    InquiryOrder, InquiryStatus, Message, NewCartOrder, NewInquiry, NewMessage, NewReservation,
    Reservation, ReservationStatus, Setting, StaffRole, StaffUser, TopDish,
};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store failure
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),

    #[error("store write failed: {0}")]
    Write(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Read(msg) => {
                tracing::error!(error = %msg, "Store read failed");
                AppError::store_read()
            }
            StoreError::Write(msg) => {
                tracing::error!(error = %msg, "Store write failed");
                AppError::store_write()
            }
            StoreError::NotFound { entity, id } => {
                let code = match entity {
                    "reservation" => ErrorCode::ReservationNotFound,
                    "order" => ErrorCode::OrderNotFound,
                    "customer_order" => ErrorCode::CartOrderNotFound,
                    "message" => ErrorCode::MessageNotFound,
                    "dish" => ErrorCode::DishNotFound,
                    "dish_type" => ErrorCode::DishTypeNotFound,
                    "setting" => ErrorCode::SettingNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::with_message(code, format!("{} {} not found", entity, id))
                    .with_detail("id", id)
            }
            StoreError::Conflict(msg) => AppError::conflict(msg),
            StoreError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Store unavailable");
                AppError::store_unavailable()
            }
        }
    }
}

/// Key/value settings (`settings`)
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_setting(&self, key: &str) -> StoreResult<Option<Setting>>;
    async fn list_settings(&self) -> StoreResult<Vec<Setting>>;
    /// Insert or overwrite a setting
    async fn upsert_setting(&self, key: &str, value: &str) -> StoreResult<Setting>;
}

/// Reservations (`reservations`)
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert_reservation(&self, new: NewReservation) -> StoreResult<Reservation>;
    /// Newest first
    async fn list_reservations(&self) -> StoreResult<Vec<Reservation>>;
    async fn get_reservation(&self, id: i64) -> StoreResult<Option<Reservation>>;
    /// Sum of `persons` over `confirmed` reservations at exactly this date and time
    async fn sum_confirmed_persons(&self, date: &str, time: &str) -> StoreResult<i64>;
    /// Unconditional overwrite of the status column
    async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> StoreResult<Reservation>;
    /// Number of reservations whose date is on or after `date` (`YYYY-MM-DD`)
    async fn count_reservations_since(&self, date: &str) -> StoreResult<i64>;
}

/// Custom-cake inquiries (`orders`) and cart orders (`customer_orders`)
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_inquiry(&self, new: NewInquiry) -> StoreResult<InquiryOrder>;
    async fn list_inquiries(&self) -> StoreResult<Vec<InquiryOrder>>;
    async fn get_inquiry(&self, id: i64) -> StoreResult<Option<InquiryOrder>>;
    async fn update_inquiry_status(
        &self,
        id: i64,
        status: InquiryStatus,
    ) -> StoreResult<InquiryOrder>;
    async fn count_inquiries_with_status(&self, status: InquiryStatus) -> StoreResult<i64>;

    async fn insert_cart_order(&self, new: NewCartOrder) -> StoreResult<CartOrder>;
    async fn list_cart_orders(&self) -> StoreResult<Vec<CartOrder>>;
    async fn get_cart_order(&self, id: i64) -> StoreResult<Option<CartOrder>>;
    async fn update_cart_order_status(
        &self,
        id: i64,
        status: CartOrderStatus,
    ) -> StoreResult<CartOrder>;
}

/// Contact messages (`messages`)
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert_message(&self, new: NewMessage) -> StoreResult<Message>;
    async fn list_messages(&self) -> StoreResult<Vec<Message>>;
    async fn set_message_read(&self, id: i64, is_read: bool) -> StoreResult<Message>;
    /// Flag every unread message as read in one write; returns the number of rows changed
    async fn mark_all_messages_read(&self) -> StoreResult<u64>;
    /// Returns `false` when nothing was deleted
    async fn delete_message(&self, id: i64) -> StoreResult<bool>;
    async fn count_unread_messages(&self) -> StoreResult<i64>;
}

/// Dish types (`dish_types`) and dishes (`dishes`)
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Ordered by `order` ascending
    async fn list_dish_types(&self) -> StoreResult<Vec<DishType>>;
    async fn get_dish_type(&self, id: i64) -> StoreResult<Option<DishType>>;
    async fn find_dish_type_by_slug(&self, slug: &str) -> StoreResult<Option<DishType>>;
    async fn insert_dish_type(&self, data: DishTypeCreate) -> StoreResult<DishType>;
    async fn update_dish_type(&self, id: i64, data: DishTypeCreate) -> StoreResult<DishType>;
    async fn delete_dish_type(&self, id: i64) -> StoreResult<bool>;
    async fn reorder_dish_types(&self, positions: &[DishTypePosition]) -> StoreResult<()>;

    /// Newest first, optionally restricted to one dish type and/or to active dishes
    async fn list_dishes(&self, type_id: Option<i64>, active_only: bool) -> StoreResult<Vec<Dish>>;
    async fn get_dish(&self, id: i64) -> StoreResult<Option<Dish>>;
    async fn insert_dish(&self, data: DishCreate) -> StoreResult<Dish>;
    async fn update_dish(&self, id: i64, data: DishCreate) -> StoreResult<Dish>;
    async fn delete_dish(&self, id: i64) -> StoreResult<bool>;
    /// Returns the new view count
    async fn increment_dish_views(&self, id: i64) -> StoreResult<i64>;
    async fn top_dishes(&self, limit: i64) -> StoreResult<Vec<TopDish>>;
}

/// Back-office users (`users`)
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<StaffUser>>;
    async fn insert_user(
        &self,
        email: &str,
        role: StaffRole,
        password_hash: &str,
    ) -> StoreResult<StaffUser>;
}

/// The full data store
#[async_trait]
pub trait Store:
    SettingsStore + ReservationStore + OrderStore + MessageStore + MenuStore + UserStore
{
    /// Cheap round trip used by health checks and startup
    async fn ping(&self) -> StoreResult<()>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}
