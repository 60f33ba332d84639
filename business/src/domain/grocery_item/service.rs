use async_trait::async_trait;

use crate::domain::grocery_item::errors::GroceryItemError;
use crate::domain::grocery_item::model::GroceryItem;
use crate::domain::repository::EntityId;
use crate::domain::unit_of_work::UnitOfWork;

pub struct AddGroceryItemParams {
    pub list_id: EntityId,
    pub name: String,
    pub quantity: i32,
}

pub struct UpdateGroceryItemParams {
    pub id: EntityId,
    pub name: Option<String>,
    pub quantity: Option<i32>,
}

/// Item operations. A missing item or list is reported as `None` / `false`.
#[async_trait]
pub trait GroceryItemService: Send + Sync {
    async fn add_item(
        &self,
        uow: &dyn UnitOfWork,
        params: AddGroceryItemParams,
    ) -> Result<Option<GroceryItem>, GroceryItemError>;

    async fn get_item(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryItem>, GroceryItemError>;

    /// Items of a list in insertion order, `None` if the list does not exist.
    async fn list_items(
        &self,
        uow: &dyn UnitOfWork,
        list_id: EntityId,
    ) -> Result<Option<Vec<GroceryItem>>, GroceryItemError>;

    async fn update_item(
        &self,
        uow: &dyn UnitOfWork,
        params: UpdateGroceryItemParams,
    ) -> Result<Option<GroceryItem>, GroceryItemError>;

    async fn mark_purchased(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryItem>, GroceryItemError>;

    async fn mark_pending(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryItem>, GroceryItemError>;

    async fn delete_item(&self, uow: &dyn UnitOfWork, id: EntityId)
    -> Result<bool, GroceryItemError>;
}
