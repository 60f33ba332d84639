use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::grocery_list::model::GroceryList;

use crate::api::grocery_item::dto::GroceryItemResponse;

#[derive(Debug, Clone, Object)]
pub struct GroceryListRequest {
    /// List name (cannot be empty)
    pub name: String,
}

#[derive(Debug, Clone, Object)]
pub struct GroceryListResponse {
    pub id: Option<i64>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Items in insertion order
    pub grocery_items: Vec<GroceryItemResponse>,
}

impl From<GroceryList> for GroceryListResponse {
    fn from(list: GroceryList) -> Self {
        Self {
            id: list.id(),
            name: list.name().to_string(),
            created_at: list.created_at(),
            updated_at: list.updated_at(),
            grocery_items: list.items().iter().map(GroceryItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use business::domain::grocery_item::model::GroceryItem;

    use super::*;

    #[test]
    fn should_embed_items_in_order() {
        let mut list = GroceryList::new("Weekly".to_string()).unwrap();
        list.add_item(GroceryItem::new("Milk".to_string(), 2).unwrap());
        list.add_item(GroceryItem::new("Eggs".to_string(), 1).unwrap());

        let response = GroceryListResponse::from(list);

        let names: Vec<&str> = response
            .grocery_items
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(response.name, "Weekly");
        assert_eq!(names, vec!["Milk", "Eggs"]);
    }
}
