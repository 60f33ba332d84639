use async_trait::async_trait;

use crate::domain::grocery_list::errors::GroceryListError;
use crate::domain::grocery_list::model::GroceryList;
use crate::domain::repository::EntityId;
use crate::domain::unit_of_work::UnitOfWork;

pub struct UpdateGroceryListParams {
    pub id: EntityId,
    pub name: String,
}

/// List operations. A missing list is reported as `None` / `false`.
#[async_trait]
pub trait GroceryListService: Send + Sync {
    async fn create_list(
        &self,
        uow: &dyn UnitOfWork,
        name: String,
    ) -> Result<GroceryList, GroceryListError>;

    async fn get_list(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryList>, GroceryListError>;

    async fn list_all(&self, uow: &dyn UnitOfWork) -> Result<Vec<GroceryList>, GroceryListError>;

    async fn update_list(
        &self,
        uow: &dyn UnitOfWork,
        params: UpdateGroceryListParams,
    ) -> Result<Option<GroceryList>, GroceryListError>;

    /// Deletes the list together with every item it owns, atomically.
    async fn delete_list(&self, uow: &dyn UnitOfWork, id: EntityId)
    -> Result<bool, GroceryListError>;
}
