//! In-process store
//!
//! Used when no `DATABASE_URL` is configured and by the test-suite. Tables are
//! plain maps keyed by id behind one `parking_lot::RwLock`; ids grow
//! monotonically so reverse key order is newest first.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use shared::models::{
    CartOrder, CartOrderStatus, Dish, DishCreate, DishType, DishTypeCreate, DishTypePosition,
    InquiryOrder, InquiryStatus, Message, NewCartOrder, NewInquiry, NewMessage, NewReservation,
    Reservation, ReservationStatus, Setting, StaffRole, StaffUser, TopDish,
};
use uuid::Uuid;

use super::{
    MenuStore, MessageStore, OrderStore, ReservationStore, SettingsStore, Store, StoreError,
    StoreResult, UserStore,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    settings: BTreeMap<String, Setting>,
    reservations: BTreeMap<i64, Reservation>,
    inquiries: BTreeMap<i64, InquiryOrder>,
    cart_orders: BTreeMap<i64, CartOrder>,
    messages: BTreeMap<i64, Message>,
    dish_types: BTreeMap<i64, DishType>,
    dishes: BTreeMap<i64, Dish>,
    users: Vec<StaffUser>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

fn newest_first<T: Clone>(table: &BTreeMap<i64, T>) -> Vec<T> {
    table.values().rev().cloned().collect()
}

/// Memory-backed [`Store`]
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
    writes_failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable store: every subsequent call fails
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make writes fail while reads keep working
    pub fn set_writes_failing(&self, failing: bool) {
        self.writes_failing.store(failing, Ordering::SeqCst);
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Read("memory store marked unavailable".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Write("memory store marked unavailable".into()));
        }
        if self.writes_failing.load(Ordering::SeqCst) {
            return Err(StoreError::Write("memory store rejecting writes".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_setting(&self, key: &str) -> StoreResult<Option<Setting>> {
        self.check_read()?;
        Ok(self.tables.read().settings.get(key).cloned())
    }

    async fn list_settings(&self) -> StoreResult<Vec<Setting>> {
        self.check_read()?;
        Ok(self.tables.read().settings.values().cloned().collect())
    }

    async fn upsert_setting(&self, key: &str, value: &str) -> StoreResult<Setting> {
        self.check_write()?;
        let now = Utc::now();
        let mut tables = self.tables.write();
        let setting = tables
            .settings
            .entry(key.to_string())
            .and_modify(|s| {
                s.value = value.to_string();
                s.updated_at = now;
            })
            .or_insert_with(|| Setting {
                key: key.to_string(),
                value: value.to_string(),
                created_at: now,
                updated_at: now,
            });
        Ok(setting.clone())
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn insert_reservation(&self, new: NewReservation) -> StoreResult<Reservation> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let id = tables.next_id();
        let reservation = Reservation {
            id,
            full_name: new.full_name,
            phone: new.phone,
            email: new.email,
            date: new.date,
            time: new.time,
            persons: new.persons,
            notes: new.notes,
            status: new.status,
            created_at: Utc::now(),
        };
        tables.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn list_reservations(&self) -> StoreResult<Vec<Reservation>> {
        self.check_read()?;
        Ok(newest_first(&self.tables.read().reservations))
    }

    async fn get_reservation(&self, id: i64) -> StoreResult<Option<Reservation>> {
        self.check_read()?;
        Ok(self.tables.read().reservations.get(&id).cloned())
    }

    async fn sum_confirmed_persons(&self, date: &str, time: &str) -> StoreResult<i64> {
        self.check_read()?;
        let sum = self
            .tables
            .read()
            .reservations
            .values()
            .filter(|r| {
                r.status == ReservationStatus::Confirmed && r.date == date && r.time == time
            })
            .map(|r| i64::from(r.persons))
            .sum();
        Ok(sum)
    }

    async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> StoreResult<Reservation> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let reservation = tables
            .reservations
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("reservation", id))?;
        reservation.status = status;
        Ok(reservation.clone())
    }

    async fn count_reservations_since(&self, date: &str) -> StoreResult<i64> {
        self.check_read()?;
        let count = self
            .tables
            .read()
            .reservations
            .values()
            .filter(|r| r.date.as_str() >= date)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_inquiry(&self, new: NewInquiry) -> StoreResult<InquiryOrder> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let id = tables.next_id();
        let inquiry = InquiryOrder {
            id,
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            type_event: new.type_event,
            persons: new.persons,
            date_needed: new.date_needed,
            budget: new.budget,
            description: new.description,
            img_refs: new.img_refs,
            status: InquiryStatus::default(),
            created_at: Utc::now(),
        };
        tables.inquiries.insert(id, inquiry.clone());
        Ok(inquiry)
    }

    async fn list_inquiries(&self) -> StoreResult<Vec<InquiryOrder>> {
        self.check_read()?;
        Ok(newest_first(&self.tables.read().inquiries))
    }

    async fn get_inquiry(&self, id: i64) -> StoreResult<Option<InquiryOrder>> {
        self.check_read()?;
        Ok(self.tables.read().inquiries.get(&id).cloned())
    }

    async fn update_inquiry_status(
        &self,
        id: i64,
        status: InquiryStatus,
    ) -> StoreResult<InquiryOrder> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let inquiry = tables
            .inquiries
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("order", id))?;
        inquiry.status = status;
        Ok(inquiry.clone())
    }

    async fn count_inquiries_with_status(&self, status: InquiryStatus) -> StoreResult<i64> {
        self.check_read()?;
        let count = self
            .tables
            .read()
            .inquiries
            .values()
            .filter(|o| o.status == status)
            .count();
        Ok(count as i64)
    }

    async fn insert_cart_order(&self, new: NewCartOrder) -> StoreResult<CartOrder> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let id = tables.next_id();
        let order = CartOrder {
            id,
            full_name: new.full_name,
            phone: new.phone,
            email: new.email,
            delivery_type: new.delivery_type,
            address: new.address,
            table_number: new.table_number,
            reservation_time: new.reservation_time,
            items: new.items,
            total_price: new.total_price,
            status: CartOrderStatus::default(),
            created_at: Utc::now(),
        };
        tables.cart_orders.insert(id, order.clone());
        Ok(order)
    }

    async fn list_cart_orders(&self) -> StoreResult<Vec<CartOrder>> {
        self.check_read()?;
        Ok(newest_first(&self.tables.read().cart_orders))
    }

    async fn get_cart_order(&self, id: i64) -> StoreResult<Option<CartOrder>> {
        self.check_read()?;
        Ok(self.tables.read().cart_orders.get(&id).cloned())
    }

    async fn update_cart_order_status(
        &self,
        id: i64,
        status: CartOrderStatus,
    ) -> StoreResult<CartOrder> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let order = tables
            .cart_orders
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("customer_order", id))?;
        order.status = status;
        Ok(order.clone())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert_message(&self, new: NewMessage) -> StoreResult<Message> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let id = tables.next_id();
        let message = Message {
            id,
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            subject: new.subject,
            message: new.message,
            is_read: false,
            created_at: Utc::now(),
        };
        tables.messages.insert(id, message.clone());
        Ok(message)
    }

    async fn list_messages(&self) -> StoreResult<Vec<Message>> {
        self.check_read()?;
        Ok(newest_first(&self.tables.read().messages))
    }

    async fn set_message_read(&self, id: i64, is_read: bool) -> StoreResult<Message> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let message = tables
            .messages
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("message", id))?;
        message.is_read = is_read;
        Ok(message.clone())
    }

    async fn mark_all_messages_read(&self) -> StoreResult<u64> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let mut changed = 0;
        for message in tables.messages.values_mut().filter(|m| !m.is_read) {
            message.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn delete_message(&self, id: i64) -> StoreResult<bool> {
        self.check_write()?;
        Ok(self.tables.write().messages.remove(&id).is_some())
    }

    async fn count_unread_messages(&self) -> StoreResult<i64> {
        self.check_read()?;
        let count = self
            .tables
            .read()
            .messages
            .values()
            .filter(|m| !m.is_read)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn list_dish_types(&self) -> StoreResult<Vec<DishType>> {
        self.check_read()?;
        let mut types: Vec<DishType> = self.tables.read().dish_types.values().cloned().collect();
        types.sort_by_key(|t| (t.sort_order, t.id));
        Ok(types)
    }

    async fn get_dish_type(&self, id: i64) -> StoreResult<Option<DishType>> {
        self.check_read()?;
        Ok(self.tables.read().dish_types.get(&id).cloned())
    }

    async fn find_dish_type_by_slug(&self, slug: &str) -> StoreResult<Option<DishType>> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .dish_types
            .values()
            .find(|t| t.slug == slug)
            .cloned())
    }

    async fn insert_dish_type(&self, data: DishTypeCreate) -> StoreResult<DishType> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if tables.dish_types.values().any(|t| t.slug == data.slug) {
            return Err(StoreError::Conflict(format!(
                "dish type slug '{}' already exists",
                data.slug
            )));
        }
        let id = tables.next_id();
        let dish_type = DishType {
            id,
            slug: data.slug,
            name_fr: data.name_fr,
            name_en: data.name_en,
            name_ar: data.name_ar,
            sort_order: data.sort_order,
            created_at: Utc::now(),
        };
        tables.dish_types.insert(id, dish_type.clone());
        Ok(dish_type)
    }

    async fn update_dish_type(&self, id: i64, data: DishTypeCreate) -> StoreResult<DishType> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if tables
            .dish_types
            .values()
            .any(|t| t.slug == data.slug && t.id != id)
        {
            return Err(StoreError::Conflict(format!(
                "dish type slug '{}' already exists",
                data.slug
            )));
        }
        let dish_type = tables
            .dish_types
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("dish_type", id))?;
        dish_type.slug = data.slug;
        dish_type.name_fr = data.name_fr;
        dish_type.name_en = data.name_en;
        dish_type.name_ar = data.name_ar;
        dish_type.sort_order = data.sort_order;
        Ok(dish_type.clone())
    }

    async fn delete_dish_type(&self, id: i64) -> StoreResult<bool> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if tables.dishes.values().any(|d| d.type_id == id) {
            return Err(StoreError::Conflict(format!(
                "dish type {} still has dishes",
                id
            )));
        }
        Ok(tables.dish_types.remove(&id).is_some())
    }

    async fn reorder_dish_types(&self, positions: &[DishTypePosition]) -> StoreResult<()> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if let Some(missing) = positions
            .iter()
            .find(|p| !tables.dish_types.contains_key(&p.id))
        {
            return Err(StoreError::not_found("dish_type", missing.id));
        }
        for position in positions {
            if let Some(dish_type) = tables.dish_types.get_mut(&position.id) {
                dish_type.sort_order = position.order;
            }
        }
        Ok(())
    }

    async fn list_dishes(&self, type_id: Option<i64>, active_only: bool) -> StoreResult<Vec<Dish>> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .dishes
            .values()
            .rev()
            .filter(|d| type_id.is_none_or(|t| d.type_id == t))
            .filter(|d| !active_only || d.is_active)
            .cloned()
            .collect())
    }

    async fn get_dish(&self, id: i64) -> StoreResult<Option<Dish>> {
        self.check_read()?;
        Ok(self.tables.read().dishes.get(&id).cloned())
    }

    async fn insert_dish(&self, data: DishCreate) -> StoreResult<Dish> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if !tables.dish_types.contains_key(&data.type_id) {
            return Err(StoreError::Conflict(format!(
                "dish type {} does not exist",
                data.type_id
            )));
        }
        let id = tables.next_id();
        let now = Utc::now();
        let dish = Dish {
            id,
            type_id: data.type_id,
            name_fr: data.name_fr,
            name_en: data.name_en,
            name_ar: data.name_ar,
            description_fr: data.description_fr,
            description_en: data.description_en,
            description_ar: data.description_ar,
            price: data.price,
            img_url: data.img_url,
            is_active: data.is_active,
            allergens: data.allergens,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.dishes.insert(id, dish.clone());
        Ok(dish)
    }

    async fn update_dish(&self, id: i64, data: DishCreate) -> StoreResult<Dish> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if !tables.dish_types.contains_key(&data.type_id) {
            return Err(StoreError::Conflict(format!(
                "dish type {} does not exist",
                data.type_id
            )));
        }
        let dish = tables
            .dishes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("dish", id))?;
        dish.type_id = data.type_id;
        dish.name_fr = data.name_fr;
        dish.name_en = data.name_en;
        dish.name_ar = data.name_ar;
        dish.description_fr = data.description_fr;
        dish.description_en = data.description_en;
        dish.description_ar = data.description_ar;
        dish.price = data.price;
        dish.img_url = data.img_url;
        dish.is_active = data.is_active;
        dish.allergens = data.allergens;
        dish.updated_at = Utc::now();
        Ok(dish.clone())
    }

    async fn delete_dish(&self, id: i64) -> StoreResult<bool> {
        self.check_write()?;
        Ok(self.tables.write().dishes.remove(&id).is_some())
    }

    async fn increment_dish_views(&self, id: i64) -> StoreResult<i64> {
        self.check_write()?;
        let mut tables = self.tables.write();
        let dish = tables
            .dishes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("dish", id))?;
        dish.view_count += 1;
        Ok(dish.view_count)
    }

    async fn top_dishes(&self, limit: i64) -> StoreResult<Vec<TopDish>> {
        self.check_read()?;
        let tables = self.tables.read();
        let mut dishes: Vec<&Dish> = tables.dishes.values().collect();
        dishes.sort_by(|a, b| b.view_count.cmp(&a.view_count).then(a.id.cmp(&b.id)));
        Ok(dishes
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|d| TopDish {
                name_fr: d.name_fr.clone(),
                view_count: d.view_count,
            })
            .collect())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<StaffUser>> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_user(
        &self,
        email: &str,
        role: StaffRole,
        password_hash: &str,
    ) -> StoreResult<StaffUser> {
        self.check_write()?;
        let mut tables = self.tables.write();
        if tables.users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(StoreError::Conflict(format!("user {} already exists", email)));
        }
        let user = StaffUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            role,
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store marked unavailable".into()));
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(date: &str, time: &str, persons: i32, status: ReservationStatus) -> NewReservation {
        NewReservation {
            full_name: "Guest".into(),
            phone: "0600000000".into(),
            email: None,
            date: date.into(),
            time: time.into(),
            persons,
            notes: None,
            status,
        }
    }

    fn message(subject: &str) -> NewMessage {
        NewMessage {
            full_name: "Sara".into(),
            email: "sara@example.com".into(),
            phone: None,
            subject: subject.into(),
            message: "Hello".into(),
        }
    }

    #[tokio::test]
    async fn test_sum_confirmed_persons_only_counts_confirmed_exact_slot() {
        let store = MemoryStore::new();
        for (date, time, persons, status) in [
            ("2024-06-01", "19:00", 2, ReservationStatus::Confirmed),
            ("2024-06-01", "19:00", 3, ReservationStatus::Confirmed),
            ("2024-06-01", "19:00", 4, ReservationStatus::Pending),
            ("2024-06-01", "19:00", 5, ReservationStatus::Waitlist),
            ("2024-06-01", "19:00", 6, ReservationStatus::Cancelled),
            ("2024-06-01", "19:30", 7, ReservationStatus::Confirmed),
            ("2024-06-02", "19:00", 8, ReservationStatus::Confirmed),
        ] {
            store
                .insert_reservation(reservation(date, time, persons, status))
                .await
                .unwrap();
        }

        let sum = store.sum_confirmed_persons("2024-06-01", "19:00").await.unwrap();
        assert_eq!(sum, 5);
        let none = store.sum_confirmed_persons("tomorrow", "7pm").await.unwrap();
        assert_eq!(none, 0);
    }

    #[tokio::test]
    async fn test_lists_are_newest_first() {
        let store = MemoryStore::new();
        store.insert_message(message("first")).await.unwrap();
        store.insert_message(message("second")).await.unwrap();

        let messages = store.list_messages().await.unwrap();
        assert_eq!(messages[0].subject, "second");
        assert_eq!(messages[1].subject, "first");
    }

    #[tokio::test]
    async fn test_mark_all_read_counts_changed_rows() {
        let store = MemoryStore::new();
        let first = store.insert_message(message("a")).await.unwrap();
        store.insert_message(message("b")).await.unwrap();
        store.set_message_read(first.id, true).await.unwrap();

        assert_eq!(store.mark_all_messages_read().await.unwrap(), 1);
        assert_eq!(store.mark_all_messages_read().await.unwrap(), 0);
        assert_eq!(store.count_unread_messages().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_reservation_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_reservation_status(99, ReservationStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "reservation", .. }));
    }

    #[tokio::test]
    async fn test_upsert_setting_overwrites() {
        let store = MemoryStore::new();
        store.upsert_setting("max_capacity", "50").await.unwrap();
        let updated = store.upsert_setting("max_capacity", "2").await.unwrap();
        assert_eq!(updated.value, "2");
        assert_eq!(store.list_settings().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_reads_and_writes() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.sum_confirmed_persons("2024-06-01", "19:00").await,
            Err(StoreError::Read(_))
        ));
        assert!(matches!(
            store.insert_message(message("x")).await,
            Err(StoreError::Write(_))
        ));
        assert!(store.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_failing_writes_leave_reads_working() {
        let store = MemoryStore::new();
        store.insert_message(message("kept")).await.unwrap();
        store.set_writes_failing(true);
        assert!(matches!(
            store.insert_message(message("lost")).await,
            Err(StoreError::Write(_))
        ));
        assert_eq!(store.list_messages().await.unwrap().len(), 1);

        store.set_writes_failing(false);
        store.insert_message(message("late")).await.unwrap();
        assert_eq!(store.list_messages().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dish_type_slug_unique_and_delete_guard() {
        let store = MemoryStore::new();
        let data = DishTypeCreate {
            slug: "desserts".into(),
            name_fr: "Desserts".into(),
            name_en: "Desserts".into(),
            name_ar: "حلويات".into(),
            sort_order: 0,
        };
        let dish_type = store.insert_dish_type(data.clone()).await.unwrap();
        assert!(matches!(
            store.insert_dish_type(data).await,
            Err(StoreError::Conflict(_))
        ));

        store
            .insert_dish(DishCreate {
                type_id: dish_type.id,
                name_fr: "Cornes de gazelle".into(),
                name_en: "Gazelle horns".into(),
                name_ar: "كعب غزال".into(),
                description_fr: "Amande".into(),
                description_en: "Almond".into(),
                description_ar: "لوز".into(),
                price: 30,
                img_url: None,
                is_active: true,
                allergens: vec!["nuts".into()],
            })
            .await
            .unwrap();
        assert!(matches!(
            store.delete_dish_type(dish_type.id).await,
            Err(StoreError::Conflict(_))
        ));
    }
}
