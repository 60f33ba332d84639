use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::grocery_item::model::GroceryItem;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Object)]
pub struct CreateGroceryItemRequest {
    /// Item name (cannot be empty)
    pub name: String,
    /// How many to buy, at least 1 (default: 1)
    #[oai(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateGroceryItemRequest {
    /// New item name
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    /// New quantity, at least 1
    #[oai(skip_serializing_if_is_none)]
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Object)]
pub struct GroceryItemResponse {
    pub id: Option<i64>,
    /// Owning grocery list
    pub grocery_list_id: Option<i64>,
    pub name: String,
    pub quantity: i32,
    pub is_purchased: bool,
    /// Set only while the item is purchased
    pub purchased_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&GroceryItem> for GroceryItemResponse {
    fn from(item: &GroceryItem) -> Self {
        Self {
            id: item.id(),
            grocery_list_id: item.list_id(),
            name: item.name().to_string(),
            quantity: item.quantity(),
            is_purchased: item.is_purchased(),
            purchased_at: item.purchased_at(),
            created_at: item.created_at(),
            updated_at: item.updated_at(),
        }
    }
}

impl From<GroceryItem> for GroceryItemResponse {
    fn from(item: GroceryItem) -> Self {
        Self::from(&item)
    }
}
