use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::grocery_list::errors::GroceryListError;
use crate::domain::grocery_list::model::GroceryList;
use crate::domain::grocery_list::service::{GroceryListService, UpdateGroceryListParams};
use crate::domain::logger::Logger;
use crate::domain::repository::EntityId;
use crate::domain::unit_of_work::{UnitOfWork, complete};

pub struct GroceryListServiceImpl {
    pub logger: Arc<dyn Logger>,
}

impl GroceryListServiceImpl {
    /// Deletes the owned items, reloads the list to catch any item still
    /// pointing at it, then deletes the list. The storage-level cascade is
    /// only a backstop.
    async fn cascade_delete(
        &self,
        uow: &dyn UnitOfWork,
        list: &GroceryList,
        list_id: EntityId,
    ) -> Result<bool, GroceryListError> {
        for item in list.items() {
            if let Some(item_id) = item.id() {
                uow.items().delete_by_id(item_id).await?;
            }
        }

        if let Some(reloaded) = uow.lists().get_by_id(list_id).await? {
            for orphan_id in reloaded.items().iter().filter_map(|item| item.id()) {
                self.logger.warn(&format!(
                    "Removing orphaned grocery item {} of list {}",
                    orphan_id, list_id
                ));
                uow.items().delete_by_id(orphan_id).await?;
            }
        }

        let deleted = uow.lists().delete_by_id(list_id).await?;
        Ok(deleted)
    }
}

#[async_trait]
impl GroceryListService for GroceryListServiceImpl {
    async fn create_list(
        &self,
        uow: &dyn UnitOfWork,
        name: String,
    ) -> Result<GroceryList, GroceryListError> {
        self.logger.info(&format!("Creating grocery list: {}", name));

        let list = GroceryList::new(name)?;
        let outcome = uow.lists().add(list).await.map_err(GroceryListError::from);
        let created = complete(uow, self.logger.as_ref(), outcome).await?;

        self.logger
            .info(&format!("Grocery list created: {:?}", created.id()));
        Ok(created)
    }

    async fn get_list(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryList>, GroceryListError> {
        self.logger.debug(&format!("Getting grocery list: {}", id));
        Ok(uow.lists().get_by_id(id).await?)
    }

    async fn list_all(&self, uow: &dyn UnitOfWork) -> Result<Vec<GroceryList>, GroceryListError> {
        let lists = uow.lists().get_all().await?;
        self.logger
            .info(&format!("Retrieved {} grocery lists", lists.len()));
        Ok(lists)
    }

    async fn update_list(
        &self,
        uow: &dyn UnitOfWork,
        params: UpdateGroceryListParams,
    ) -> Result<Option<GroceryList>, GroceryListError> {
        let UpdateGroceryListParams { id, name } = params;
        self.logger.info(&format!("Updating grocery list: {}", id));

        let outcome = async {
            let Some(mut list) = uow.lists().get_by_id(id).await? else {
                return Ok(None);
            };
            list.rename(name)?;
            let updated = uow.lists().update(list).await?;
            Ok::<_, GroceryListError>(Some(updated))
        }
        .await;

        let updated = complete(uow, self.logger.as_ref(), outcome).await?;
        if updated.is_none() {
            self.logger.info(&format!("Grocery list {} not found", id));
        }
        Ok(updated)
    }

    async fn delete_list(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<bool, GroceryListError> {
        self.logger.info(&format!("Deleting grocery list: {}", id));

        let outcome = async {
            let Some(list) = uow.lists().get_by_id(id).await? else {
                return Ok(false);
            };
            self.cascade_delete(uow, &list, id).await
        }
        .await;

        let deleted = complete(uow, self.logger.as_ref(), outcome).await?;
        if deleted {
            self.logger.info(&format!("Grocery list deleted: {}", id));
        }
        Ok(deleted)
    }
}
