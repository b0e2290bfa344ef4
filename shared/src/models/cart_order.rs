//! Customer (cart) order Model

use super::serde_helpers::blank_as_none;
use super::status::{CartOrderStatus, DeliveryType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Line item snapshot taken at submission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CartItem {
    pub id: i64,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Unit price in dirhams
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

impl CartItem {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity
    }
}

/// Sum of `price * quantity` over the snapshot
pub fn cart_total(items: &[CartItem]) -> i64 {
    items.iter().map(CartItem::line_total).sum()
}

/// Cart order entity (table `customer_orders`)
///
/// `items` and `total_price` are frozen when the order is placed and are
/// never recomputed from live menu prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartOrder {
    pub id: i64,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub delivery_type: DeliveryType,
    pub address: Option<String>,
    pub table_number: Option<String>,
    pub reservation_time: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<CartItem>,
    pub total_price: i64,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: CartOrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_delivery"))]
pub struct CartOrderCreate {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "full name is required"))]
    pub full_name: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "phone is required"))]
    pub phone: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "email is not a valid address"))]
    pub email: Option<String>,
    pub delivery_type: DeliveryType,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub table_number: Option<String>,
    #[validate(length(max = 20))]
    pub reservation_time: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "cart is empty"), nested)]
    pub items: Vec<CartItem>,
}

fn validate_delivery(order: &CartOrderCreate) -> Result<(), ValidationError> {
    let missing_address = order
        .address
        .as_deref()
        .is_none_or(|a| a.trim().is_empty());
    if order.delivery_type == DeliveryType::Home && missing_address {
        let mut err = ValidationError::new("address_required");
        err.message = Some("address is required for home delivery".into());
        return Err(err);
    }
    Ok(())
}

/// Store-side insert for a cart order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCartOrder {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub delivery_type: DeliveryType,
    pub address: Option<String>,
    pub table_number: Option<String>,
    pub reservation_time: Option<String>,
    pub items: Vec<CartItem>,
    pub total_price: i64,
}

impl From<CartOrderCreate> for NewCartOrder {
    /// Keeps only the fields relevant to the delivery type and computes the
    /// total once.
    fn from(form: CartOrderCreate) -> Self {
        let (address, table_number, reservation_time) = match form.delivery_type {
            DeliveryType::Home => (form.address, None, None),
            DeliveryType::Restaurant => (None, form.table_number, form.reservation_time),
        };
        let total_price = cart_total(&form.items);

        Self {
            full_name: form.full_name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            email: form.email,
            delivery_type: form.delivery_type,
            address,
            table_number,
            reservation_time,
            items: form.items,
            total_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, price: i64, quantity: i64) -> CartItem {
        CartItem {
            id,
            name: format!("dish-{id}"),
            price,
            quantity,
        }
    }

    fn form(delivery_type: DeliveryType) -> CartOrderCreate {
        CartOrderCreate {
            full_name: "Karim".to_string(),
            phone: "0611111111".to_string(),
            email: None,
            delivery_type,
            address: Some("12 rue des Oliviers".to_string()),
            table_number: Some("7".to_string()),
            reservation_time: Some("20:30".to_string()),
            items: vec![item(1, 45, 2), item(2, 30, 1)],
        }
    }

    #[test]
    fn test_cart_total() {
        assert_eq!(cart_total(&[item(1, 45, 2), item(2, 30, 1)]), 120);
        assert_eq!(cart_total(&[]), 0);
    }

    #[test]
    fn test_home_delivery_keeps_address_only() {
        let new = NewCartOrder::from(form(DeliveryType::Home));
        assert_eq!(new.address.as_deref(), Some("12 rue des Oliviers"));
        assert!(new.table_number.is_none());
        assert!(new.reservation_time.is_none());
        assert_eq!(new.total_price, 120);
    }

    #[test]
    fn test_restaurant_keeps_table_only() {
        let new = NewCartOrder::from(form(DeliveryType::Restaurant));
        assert!(new.address.is_none());
        assert_eq!(new.table_number.as_deref(), Some("7"));
        assert_eq!(new.reservation_time.as_deref(), Some("20:30"));
    }

    #[test]
    fn test_home_without_address_rejected() {
        let mut f = form(DeliveryType::Home);
        f.address = None;
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut f = form(DeliveryType::Restaurant);
        f.items.clear();
        let errors = f.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut f = form(DeliveryType::Restaurant);
        f.items.push(item(3, 10, 0));
        assert!(f.validate().is_err());
    }
}
