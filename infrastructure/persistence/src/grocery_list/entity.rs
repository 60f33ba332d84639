use chrono::{DateTime, Utc};
use sqlx::FromRow;

use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_list::model::GroceryList;

#[derive(Debug, FromRow)]
pub struct GroceryListEntity {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroceryListEntity {
    pub fn into_domain(self, items: Vec<GroceryItem>) -> GroceryList {
        GroceryList::from_repository(
            self.id,
            self.name,
            self.created_at,
            self.updated_at,
            items,
        )
    }
}
