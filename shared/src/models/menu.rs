//! Menu Models (dish types and dishes)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dish type entity (menu section, table `dish_types`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DishType {
    pub id: i64,
    pub slug: String,
    pub name_fr: String,
    pub name_en: String,
    pub name_ar: String,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Create / replace dish type payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishTypeCreate {
    #[validate(length(min = 1, max = 100))]
    pub slug: String,
    #[validate(length(min = 1, max = 200))]
    pub name_fr: String,
    #[validate(length(min = 1, max = 200))]
    pub name_en: String,
    #[validate(length(min = 1, max = 200))]
    pub name_ar: String,
    #[serde(rename = "order")]
    #[validate(range(min = 0))]
    pub sort_order: i32,
}

/// One entry of a reorder request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishTypePosition {
    pub id: i64,
    pub order: i32,
}

/// Reorder payload: `{ "orders": [{ "id": 1, "order": 0 }, ...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishTypeReorder {
    pub orders: Vec<DishTypePosition>,
}

/// Dish entity (table `dishes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Dish {
    pub id: i64,
    pub type_id: i64,
    pub name_fr: String,
    pub name_en: String,
    pub name_ar: String,
    pub description_fr: String,
    pub description_en: String,
    pub description_ar: String,
    /// Price in dirhams
    pub price: i64,
    pub img_url: Option<String>,
    pub is_active: bool,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub allergens: Vec<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / replace dish payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DishCreate {
    #[validate(range(min = 1))]
    pub type_id: i64,
    #[validate(length(min = 1, max = 200))]
    pub name_fr: String,
    #[validate(length(min = 1, max = 200))]
    pub name_en: String,
    #[validate(length(min = 1, max = 200))]
    pub name_ar: String,
    #[validate(length(min = 1, max = 2000))]
    pub description_fr: String,
    #[validate(length(min = 1, max = 2000))]
    pub description_en: String,
    #[validate(length(min = 1, max = 2000))]
    pub description_ar: String,
    #[validate(range(min = 1, message = "price must be positive"))]
    pub price: i64,
    #[validate(length(max = 500))]
    pub img_url: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub allergens: Vec<String>,
}

/// Menu query string (`?category=<slug>`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Admin dish list query string (`?type_id=<id>`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishListQuery {
    pub type_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_type_order_field_name() {
        let json = r#"{"slug":"tajines","name_fr":"Tajines","name_en":"Tagines","name_ar":"طواجن","order":2}"#;
        let payload: DishTypeCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.sort_order, 2);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let payload = DishCreate {
            type_id: 1,
            name_fr: "Couscous".into(),
            name_en: "Couscous".into(),
            name_ar: "كسكس".into(),
            description_fr: "Royal".into(),
            description_en: "Royal".into(),
            description_ar: "ملكي".into(),
            price: 0,
            img_url: None,
            is_active: true,
            allergens: vec![],
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }
}
