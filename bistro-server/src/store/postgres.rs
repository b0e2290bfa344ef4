//! Postgres-backed store
//!
//! Thin wrapper around a `PgPool`; every trait method is one statement (the
//! dish type reorder is one transaction). Schema lives in `migrations/`.

use async_trait::async_trait;
use shared::models::{
    CartOrder, CartOrderStatus, Dish, DishCreate, DishType, DishTypeCreate, DishTypePosition,
    InquiryOrder, InquiryStatus, Message, NewCartOrder, NewInquiry, NewMessage, NewReservation,
    Reservation, ReservationStatus, Setting, StaffRole, StaffUser, TopDish,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use super::{
    MenuStore, MessageStore, OrderStore, ReservationStore, SettingsStore, Store, StoreError,
    StoreResult, UserStore,
};

const RESERVATION_COLUMNS: &str =
    "id, full_name, phone, email, date, time, persons, notes, status, created_at";
const INQUIRY_COLUMNS: &str = "id, full_name, email, phone, type_event, persons, date_needed, \
     budget, description, img_refs, status, created_at";
const CART_ORDER_COLUMNS: &str = "id, full_name, phone, email, delivery_type, address, \
     table_number, reservation_time, items, total_price, status, created_at";
const MESSAGE_COLUMNS: &str =
    "id, full_name, email, phone, subject, message, is_read, created_at";
const DISH_TYPE_COLUMNS: &str = "id, slug, name_fr, name_en, name_ar, sort_order, created_at";
const DISH_COLUMNS: &str = "id, type_id, name_fr, name_en, name_ar, description_fr, \
     description_en, description_ar, price, img_url, is_active, allergens, view_count, \
     created_at, updated_at";
const SETTING_COLUMNS: &str = "key, value, created_at, updated_at";
const USER_COLUMNS: &str = "id, email, role, password_hash, created_at";

/// Unique (23505) and foreign key (23503) violations
fn is_constraint_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505" || code == "23503")
}

fn read_err(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Read(err.to_string()),
    }
}

fn write_err(err: sqlx::Error) -> StoreError {
    if is_constraint_violation(&err) {
        return StoreError::Conflict(err.to_string());
    }
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        _ => StoreError::Write(err.to_string()),
    }
}

/// Hosted Postgres store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a lazily-connected pool; the first query establishes the connection
    pub fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))
    }
}

#[async_trait]
impl SettingsStore for PgStore {
    async fn get_setting(&self, key: &str) -> StoreResult<Option<Setting>> {
        sqlx::query_as::<_, Setting>(&format!(
            "SELECT {SETTING_COLUMNS} FROM settings WHERE key = $1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn list_settings(&self) -> StoreResult<Vec<Setting>> {
        sqlx::query_as::<_, Setting>(&format!(
            "SELECT {SETTING_COLUMNS} FROM settings ORDER BY key"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn upsert_setting(&self, key: &str, value: &str) -> StoreResult<Setting> {
        sqlx::query_as::<_, Setting>(&format!(
            "INSERT INTO settings (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
             RETURNING {SETTING_COLUMNS}"
        ))
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }
}

#[async_trait]
impl ReservationStore for PgStore {
    async fn insert_reservation(&self, new: NewReservation) -> StoreResult<Reservation> {
        sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservations (full_name, phone, email, date, time, persons, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(&new.full_name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(&new.date)
        .bind(&new.time)
        .bind(new.persons)
        .bind(&new.notes)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }

    async fn list_reservations(&self) -> StoreResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn get_reservation(&self, id: i64) -> StoreResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn sum_confirmed_persons(&self, date: &str, time: &str) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(persons), 0)::BIGINT FROM reservations
             WHERE date = $1 AND time = $2 AND status = 'confirmed'",
        )
        .bind(date)
        .bind(time)
        .fetch_one(&self.pool)
        .await
        .map_err(read_err)?;
        Ok(row.0)
    }

    async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> StoreResult<Reservation> {
        sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations SET status = $2 WHERE id = $1 RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?
        .ok_or_else(|| StoreError::not_found("reservation", id))
    }

    async fn count_reservations_since(&self, date: &str) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservations WHERE date >= $1")
            .bind(date)
            .fetch_one(&self.pool)
            .await
            .map_err(read_err)?;
        Ok(row.0)
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn insert_inquiry(&self, new: NewInquiry) -> StoreResult<InquiryOrder> {
        sqlx::query_as::<_, InquiryOrder>(&format!(
            "INSERT INTO orders
                (full_name, email, phone, type_event, persons, date_needed, budget, description, img_refs, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {INQUIRY_COLUMNS}"
        ))
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.type_event)
        .bind(new.persons)
        .bind(&new.date_needed)
        .bind(&new.budget)
        .bind(&new.description)
        .bind(Json(&new.img_refs))
        .bind(InquiryStatus::default().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }

    async fn list_inquiries(&self) -> StoreResult<Vec<InquiryOrder>> {
        sqlx::query_as::<_, InquiryOrder>(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn get_inquiry(&self, id: i64) -> StoreResult<Option<InquiryOrder>> {
        sqlx::query_as::<_, InquiryOrder>(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn update_inquiry_status(
        &self,
        id: i64,
        status: InquiryStatus,
    ) -> StoreResult<InquiryOrder> {
        sqlx::query_as::<_, InquiryOrder>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {INQUIRY_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?
        .ok_or_else(|| StoreError::not_found("order", id))
    }

    async fn count_inquiries_with_status(&self, status: InquiryStatus) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(read_err)?;
        Ok(row.0)
    }

    async fn insert_cart_order(&self, new: NewCartOrder) -> StoreResult<CartOrder> {
        sqlx::query_as::<_, CartOrder>(&format!(
            "INSERT INTO customer_orders
                (full_name, phone, email, delivery_type, address, table_number, reservation_time,
                 items, total_price, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {CART_ORDER_COLUMNS}"
        ))
        .bind(&new.full_name)
        .bind(&new.phone)
        .bind(&new.email)
        .bind(new.delivery_type.as_str())
        .bind(&new.address)
        .bind(&new.table_number)
        .bind(&new.reservation_time)
        .bind(Json(&new.items))
        .bind(new.total_price)
        .bind(CartOrderStatus::default().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }

    async fn list_cart_orders(&self) -> StoreResult<Vec<CartOrder>> {
        sqlx::query_as::<_, CartOrder>(&format!(
            "SELECT {CART_ORDER_COLUMNS} FROM customer_orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn get_cart_order(&self, id: i64) -> StoreResult<Option<CartOrder>> {
        sqlx::query_as::<_, CartOrder>(&format!(
            "SELECT {CART_ORDER_COLUMNS} FROM customer_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn update_cart_order_status(
        &self,
        id: i64,
        status: CartOrderStatus,
    ) -> StoreResult<CartOrder> {
        sqlx::query_as::<_, CartOrder>(&format!(
            "UPDATE customer_orders SET status = $2 WHERE id = $1 RETURNING {CART_ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?
        .ok_or_else(|| StoreError::not_found("customer_order", id))
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn insert_message(&self, new: NewMessage) -> StoreResult<Message> {
        sqlx::query_as::<_, Message>(&format!(
            "INSERT INTO messages (full_name, email, phone, subject, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.subject)
        .bind(&new.message)
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }

    async fn list_messages(&self) -> StoreResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn set_message_read(&self, id: i64, is_read: bool) -> StoreResult<Message> {
        sqlx::query_as::<_, Message>(&format!(
            "UPDATE messages SET is_read = $2 WHERE id = $1 RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(is_read)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?
        .ok_or_else(|| StoreError::not_found("message", id))
    }

    async fn mark_all_messages_read(&self) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE messages SET is_read = TRUE WHERE is_read = FALSE")
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        Ok(result.rows_affected())
    }

    async fn delete_message(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_unread_messages(&self) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE is_read = FALSE")
            .fetch_one(&self.pool)
            .await
            .map_err(read_err)?;
        Ok(row.0)
    }
}

#[async_trait]
impl MenuStore for PgStore {
    async fn list_dish_types(&self) -> StoreResult<Vec<DishType>> {
        sqlx::query_as::<_, DishType>(&format!(
            "SELECT {DISH_TYPE_COLUMNS} FROM dish_types ORDER BY sort_order ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn get_dish_type(&self, id: i64) -> StoreResult<Option<DishType>> {
        sqlx::query_as::<_, DishType>(&format!(
            "SELECT {DISH_TYPE_COLUMNS} FROM dish_types WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn find_dish_type_by_slug(&self, slug: &str) -> StoreResult<Option<DishType>> {
        sqlx::query_as::<_, DishType>(&format!(
            "SELECT {DISH_TYPE_COLUMNS} FROM dish_types WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn insert_dish_type(&self, data: DishTypeCreate) -> StoreResult<DishType> {
        sqlx::query_as::<_, DishType>(&format!(
            "INSERT INTO dish_types (slug, name_fr, name_en, name_ar, sort_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {DISH_TYPE_COLUMNS}"
        ))
        .bind(&data.slug)
        .bind(&data.name_fr)
        .bind(&data.name_en)
        .bind(&data.name_ar)
        .bind(data.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }

    async fn update_dish_type(&self, id: i64, data: DishTypeCreate) -> StoreResult<DishType> {
        sqlx::query_as::<_, DishType>(&format!(
            "UPDATE dish_types
             SET slug = $2, name_fr = $3, name_en = $4, name_ar = $5, sort_order = $6
             WHERE id = $1
             RETURNING {DISH_TYPE_COLUMNS}"
        ))
        .bind(id)
        .bind(&data.slug)
        .bind(&data.name_fr)
        .bind(&data.name_en)
        .bind(&data.name_ar)
        .bind(data.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?
        .ok_or_else(|| StoreError::not_found("dish_type", id))
    }

    async fn delete_dish_type(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM dish_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn reorder_dish_types(&self, positions: &[DishTypePosition]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(write_err)?;
        for position in positions {
            let result = sqlx::query("UPDATE dish_types SET sort_order = $2 WHERE id = $1")
                .bind(position.id)
                .bind(position.order)
                .execute(&mut *tx)
                .await
                .map_err(write_err)?;
            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back
                return Err(StoreError::not_found("dish_type", position.id));
            }
        }
        tx.commit().await.map_err(write_err)
    }

    async fn list_dishes(&self, type_id: Option<i64>, active_only: bool) -> StoreResult<Vec<Dish>> {
        sqlx::query_as::<_, Dish>(&format!(
            "SELECT {DISH_COLUMNS} FROM dishes
             WHERE ($1::BIGINT IS NULL OR type_id = $1) AND (NOT $2 OR is_active)
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(type_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn get_dish(&self, id: i64) -> StoreResult<Option<Dish>> {
        sqlx::query_as::<_, Dish>(&format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_err)
    }

    async fn insert_dish(&self, data: DishCreate) -> StoreResult<Dish> {
        sqlx::query_as::<_, Dish>(&format!(
            "INSERT INTO dishes
                (type_id, name_fr, name_en, name_ar, description_fr, description_en, description_ar,
                 price, img_url, is_active, allergens)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {DISH_COLUMNS}"
        ))
        .bind(data.type_id)
        .bind(&data.name_fr)
        .bind(&data.name_en)
        .bind(&data.name_ar)
        .bind(&data.description_fr)
        .bind(&data.description_en)
        .bind(&data.description_ar)
        .bind(data.price)
        .bind(&data.img_url)
        .bind(data.is_active)
        .bind(Json(&data.allergens))
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }

    async fn update_dish(&self, id: i64, data: DishCreate) -> StoreResult<Dish> {
        sqlx::query_as::<_, Dish>(&format!(
            "UPDATE dishes
             SET type_id = $2, name_fr = $3, name_en = $4, name_ar = $5,
                 description_fr = $6, description_en = $7, description_ar = $8,
                 price = $9, img_url = $10, is_active = $11, allergens = $12, updated_at = NOW()
             WHERE id = $1
             RETURNING {DISH_COLUMNS}"
        ))
        .bind(id)
        .bind(data.type_id)
        .bind(&data.name_fr)
        .bind(&data.name_en)
        .bind(&data.name_ar)
        .bind(&data.description_fr)
        .bind(&data.description_en)
        .bind(&data.description_ar)
        .bind(data.price)
        .bind(&data.img_url)
        .bind(data.is_active)
        .bind(Json(&data.allergens))
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?
        .ok_or_else(|| StoreError::not_found("dish", id))
    }

    async fn delete_dish(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_dish_views(&self, id: i64) -> StoreResult<i64> {
        let row: Option<(i64,)> = sqlx::query_as(
            "UPDATE dishes SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?;
        row.map(|r| r.0)
            .ok_or_else(|| StoreError::not_found("dish", id))
    }

    async fn top_dishes(&self, limit: i64) -> StoreResult<Vec<TopDish>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT name_fr, view_count FROM dishes ORDER BY view_count DESC, id ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)?;
        Ok(rows
            .into_iter()
            .map(|(name_fr, view_count)| TopDish {
                name_fr,
                view_count,
            })
            .collect())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<StaffUser>> {
        sqlx::query_as::<_, StaffUser>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)
    }

    async fn insert_user(
        &self,
        email: &str,
        role: StaffRole,
        password_hash: &str,
    ) -> StoreResult<StaffUser> {
        sqlx::query_as::<_, StaffUser>(&format!(
            "INSERT INTO users (id, email, role, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(uuid::Uuid::new_v4())
        .bind(email)
        .bind(role.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
