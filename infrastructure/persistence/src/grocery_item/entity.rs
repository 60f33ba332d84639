use chrono::{DateTime, Utc};
use sqlx::FromRow;

use business::domain::errors::RepositoryError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_item::value_objects::ItemStatus;

#[derive(Debug, FromRow)]
pub struct GroceryItemEntity {
    pub id: i64,
    pub grocery_list_id: i64,
    pub name: String,
    pub quantity: i32,
    pub status: String,
    pub purchased_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroceryItemEntity {
    pub fn into_domain(self) -> Result<GroceryItem, RepositoryError> {
        let status = self.status.parse::<ItemStatus>().map_err(|_| {
            RepositoryError::storage_error(format!(
                "grocery item {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        Ok(GroceryItem::from_repository(
            self.id,
            self.grocery_list_id,
            self.name,
            self.quantity,
            status,
            self.purchased_at,
            self.created_at,
            self.updated_at,
        ))
    }
}
