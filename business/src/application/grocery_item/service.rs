use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::grocery_item::errors::GroceryItemError;
use crate::domain::grocery_item::model::GroceryItem;
use crate::domain::grocery_item::service::{
    AddGroceryItemParams, GroceryItemService, UpdateGroceryItemParams,
};
use crate::domain::logger::Logger;
use crate::domain::repository::EntityId;
use crate::domain::unit_of_work::{UnitOfWork, complete};

pub struct GroceryItemServiceImpl {
    pub logger: Arc<dyn Logger>,
}

impl GroceryItemServiceImpl {
    /// Loads the item, applies a status transition, persists and commits.
    async fn transition(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
        apply: fn(&mut GroceryItem),
    ) -> Result<Option<GroceryItem>, GroceryItemError> {
        let outcome = async {
            let Some(mut item) = uow.items().get_by_id(id).await? else {
                return Ok(None);
            };
            apply(&mut item);
            let updated = uow.items().update(item).await?;
            Ok::<_, GroceryItemError>(Some(updated))
        }
        .await;

        complete(uow, self.logger.as_ref(), outcome).await
    }
}

#[async_trait]
impl GroceryItemService for GroceryItemServiceImpl {
    async fn add_item(
        &self,
        uow: &dyn UnitOfWork,
        params: AddGroceryItemParams,
    ) -> Result<Option<GroceryItem>, GroceryItemError> {
        let AddGroceryItemParams {
            list_id,
            name,
            quantity,
        } = params;
        self.logger.info(&format!(
            "Adding grocery item {} (x{}) to list {}",
            name, quantity, list_id
        ));

        let outcome = async {
            let Some(mut list) = uow.lists().get_by_id(list_id).await? else {
                return Ok(None);
            };
            let item = GroceryItem::new(name, quantity)?;

            let attached = list.add_item(item);
            let stored = uow.items().add(attached.clone()).await?;
            *attached = stored.clone();
            uow.lists().update(list).await?;
            Ok::<_, GroceryItemError>(Some(stored))
        }
        .await;

        let added = complete(uow, self.logger.as_ref(), outcome).await?;
        match &added {
            Some(item) => self
                .logger
                .info(&format!("Grocery item created: {:?}", item.id())),
            None => self
                .logger
                .info(&format!("Grocery list {} not found", list_id)),
        }
        Ok(added)
    }

    async fn get_item(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryItem>, GroceryItemError> {
        self.logger.debug(&format!("Getting grocery item: {}", id));
        Ok(uow.items().get_by_id(id).await?)
    }

    async fn list_items(
        &self,
        uow: &dyn UnitOfWork,
        list_id: EntityId,
    ) -> Result<Option<Vec<GroceryItem>>, GroceryItemError> {
        let list = uow.lists().get_by_id(list_id).await?;
        Ok(list.map(|list| list.items().to_vec()))
    }

    async fn update_item(
        &self,
        uow: &dyn UnitOfWork,
        params: UpdateGroceryItemParams,
    ) -> Result<Option<GroceryItem>, GroceryItemError> {
        let UpdateGroceryItemParams { id, name, quantity } = params;
        self.logger.info(&format!("Updating grocery item: {}", id));

        let outcome = async {
            let Some(mut item) = uow.items().get_by_id(id).await? else {
                return Ok(None);
            };
            item.update(name, quantity)?;
            let updated = uow.items().update(item).await?;
            Ok::<_, GroceryItemError>(Some(updated))
        }
        .await;

        complete(uow, self.logger.as_ref(), outcome).await
    }

    async fn mark_purchased(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryItem>, GroceryItemError> {
        self.logger
            .info(&format!("Marking grocery item {} as purchased", id));
        self.transition(uow, id, GroceryItem::mark_purchased).await
    }

    async fn mark_pending(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<Option<GroceryItem>, GroceryItemError> {
        self.logger
            .info(&format!("Marking grocery item {} as pending", id));
        self.transition(uow, id, GroceryItem::mark_pending).await
    }

    async fn delete_item(
        &self,
        uow: &dyn UnitOfWork,
        id: EntityId,
    ) -> Result<bool, GroceryItemError> {
        self.logger.info(&format!("Deleting grocery item: {}", id));

        let outcome = async {
            let Some(item) = uow.items().get_by_id(id).await? else {
                return Ok(false);
            };

            if let Some(list_id) = item.list_id()
                && let Some(mut list) = uow.lists().get_by_id(list_id).await?
                && list.remove_item(id).is_some()
            {
                uow.lists().update(list).await?;
            }

            let deleted = uow.items().delete_by_id(id).await?;
            Ok::<_, GroceryItemError>(deleted)
        }
        .await;

        let deleted = complete(uow, self.logger.as_ref(), outcome).await?;
        if deleted {
            self.logger.info(&format!("Grocery item deleted: {}", id));
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        MockItemRepo, MockListRepo, RecordingUnitOfWork, mock_logger, stored_item, stored_list,
    };
    use crate::domain::errors::RepositoryError;
    use crate::domain::grocery_item::value_objects::ItemStatus;
    use crate::domain::grocery_list::model::GroceryList;
    use crate::domain::repository::Entity;
    use mockall::predicate::{always, eq, function};

    fn service() -> GroceryItemServiceImpl {
        GroceryItemServiceImpl {
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_add_item_to_existing_list() {
        let mut lists = MockListRepo::new();
        lists
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_list(id, "Weekly", vec![]))));
        lists
            .expect_update()
            .with(function(|list: &GroceryList| {
                list.items().len() == 1 && list.items()[0].id() == Some(5)
            }))
            .times(1)
            .returning(Ok);
        let mut items = MockItemRepo::new();
        items.expect_add().times(1).returning(|mut item| {
            item.assign_id(5);
            Ok(item)
        });
        let uow = RecordingUnitOfWork::new(lists, items);

        let result = service()
            .add_item(
                &uow,
                AddGroceryItemParams {
                    list_id: 1,
                    name: "Milk".to_string(),
                    quantity: 2,
                },
            )
            .await;

        let item = result.unwrap().unwrap();
        assert_eq!(item.id(), Some(5));
        assert_eq!(item.list_id(), Some(1));
        assert_eq!(item.status(), ItemStatus::Pending);
        assert_eq!(uow.commits(), 1);
    }

    #[tokio::test]
    async fn should_return_none_when_list_missing() {
        let mut lists = MockListRepo::new();
        lists.expect_get_by_id().returning(|_| Ok(None));
        let mut items = MockItemRepo::new();
        items.expect_add().never();
        let uow = RecordingUnitOfWork::new(lists, items);

        let result = service()
            .add_item(
                &uow,
                AddGroceryItemParams {
                    list_id: 99,
                    name: "Milk".to_string(),
                    quantity: 1,
                },
            )
            .await;

        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity_before_persisting() {
        let mut lists = MockListRepo::new();
        lists
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_list(id, "Weekly", vec![]))));
        lists.expect_update().never();
        let mut items = MockItemRepo::new();
        items.expect_add().never();
        let uow = RecordingUnitOfWork::new(lists, items);

        let result = service()
            .add_item(
                &uow,
                AddGroceryItemParams {
                    list_id: 1,
                    name: "Milk".to_string(),
                    quantity: 0,
                },
            )
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, GroceryItemError::InvalidQuantity));
        assert!(err.is_validation());
        assert_eq!(uow.commits(), 0);
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_item() {
        let mut items = MockItemRepo::new();
        items.expect_get_by_id().with(eq(999)).returning(|_| Ok(None));
        items.expect_update().never();
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let result = service()
            .update_item(
                &uow,
                UpdateGroceryItemParams {
                    id: 999,
                    name: Some("X".to_string()),
                    quantity: None,
                },
            )
            .await;

        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_update_name_and_quantity() {
        let mut items = MockItemRepo::new();
        items
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_item(id, 1, "Milk"))));
        items.expect_update().times(1).returning(Ok);
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let result = service()
            .update_item(
                &uow,
                UpdateGroceryItemParams {
                    id: 3,
                    name: Some("Oat Milk".to_string()),
                    quantity: Some(4),
                },
            )
            .await;

        let item = result.unwrap().unwrap();
        assert_eq!(item.name(), "Oat Milk");
        assert_eq!(item.quantity(), 4);
        assert_eq!(uow.commits(), 1);
    }

    #[tokio::test]
    async fn should_not_persist_invalid_quantity_update() {
        let mut items = MockItemRepo::new();
        items
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_item(id, 1, "Milk"))));
        items.expect_update().never();
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let result = service()
            .update_item(
                &uow,
                UpdateGroceryItemParams {
                    id: 3,
                    name: None,
                    quantity: Some(-2),
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), GroceryItemError::InvalidQuantity));
        assert_eq!(uow.commits(), 0);
    }

    #[tokio::test]
    async fn should_roll_back_rename_to_blank_name() {
        let mut items = MockItemRepo::new();
        items
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_item(id, 1, "Milk"))));
        items.expect_update().never();
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let result = service()
            .update_item(
                &uow,
                UpdateGroceryItemParams {
                    id: 3,
                    name: Some("  ".to_string()),
                    quantity: Some(4),
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), GroceryItemError::NameEmpty));
        assert_eq!(uow.commits(), 0);
        assert_eq!(uow.rollbacks(), 1);
    }

    #[tokio::test]
    async fn should_mark_item_purchased() {
        let mut items = MockItemRepo::new();
        items
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_item(id, 1, "Milk"))));
        items.expect_update().returning(Ok);
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let item = service().mark_purchased(&uow, 3).await.unwrap().unwrap();

        assert_eq!(item.status(), ItemStatus::Purchased);
        assert!(item.purchased_at().is_some());
        assert_eq!(uow.commits(), 1);
    }

    #[tokio::test]
    async fn should_mark_item_pending() {
        let mut items = MockItemRepo::new();
        items.expect_get_by_id().returning(|id| {
            let mut item = stored_item(id, 1, "Milk");
            item.mark_purchased();
            Ok(Some(item))
        });
        items.expect_update().returning(Ok);
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let item = service().mark_pending(&uow, 3).await.unwrap().unwrap();

        assert_eq!(item.status(), ItemStatus::Pending);
        assert!(item.purchased_at().is_none());
    }

    #[tokio::test]
    async fn should_return_none_when_marking_missing_item() {
        let mut items = MockItemRepo::new();
        items.expect_get_by_id().returning(|_| Ok(None));
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let result = service().mark_purchased(&uow, 77).await;

        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_detach_item_from_list_when_deleting() {
        let mut lists = MockListRepo::new();
        lists.expect_get_by_id().with(eq(1)).returning(|id| {
            Ok(Some(stored_list(
                id,
                "Weekly",
                vec![stored_item(3, id, "Milk"), stored_item(4, id, "Eggs")],
            )))
        });
        lists
            .expect_update()
            .with(function(|list: &GroceryList| {
                list.items().iter().all(|item| item.id() != Some(3))
                    && list.updated_at() > list.created_at()
            }))
            .times(1)
            .returning(Ok);
        let mut items = MockItemRepo::new();
        items
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_item(id, 1, "Milk"))));
        items
            .expect_delete_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(true));
        let uow = RecordingUnitOfWork::new(lists, items);

        let result = service().delete_item(&uow, 3).await;

        assert!(result.unwrap());
        assert_eq!(uow.commits(), 1);
    }

    #[tokio::test]
    async fn should_return_false_when_deleting_missing_item() {
        let mut items = MockItemRepo::new();
        items.expect_get_by_id().returning(|_| Ok(None));
        items.expect_delete_by_id().never();
        let uow = RecordingUnitOfWork::new(MockListRepo::new(), items);

        let result = service().delete_item(&uow, 3).await;

        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn should_roll_back_detach_when_item_delete_fails() {
        let mut lists = MockListRepo::new();
        lists
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_list(id, "Weekly", vec![stored_item(3, id, "Milk")]))));
        lists.expect_update().with(always()).returning(Ok);
        let mut items = MockItemRepo::new();
        items
            .expect_get_by_id()
            .returning(|id| Ok(Some(stored_item(id, 1, "Milk"))));
        items
            .expect_delete_by_id()
            .returning(|_| Err(RepositoryError::storage_error("constraint violation")));
        let uow = RecordingUnitOfWork::new(lists, items);

        let result = service().delete_item(&uow, 3).await;

        assert!(matches!(result.unwrap_err(), GroceryItemError::Repository(_)));
        assert_eq!(uow.commits(), 0);
        assert_eq!(uow.rollbacks(), 1);
    }

    #[tokio::test]
    async fn should_list_items_of_existing_list() {
        let mut lists = MockListRepo::new();
        lists.expect_get_by_id().returning(|id| {
            Ok(Some(stored_list(
                id,
                "Weekly",
                vec![stored_item(1, id, "Milk"), stored_item(2, id, "Eggs")],
            )))
        });
        let uow = RecordingUnitOfWork::new(lists, MockItemRepo::new());

        let items = service().list_items(&uow, 1).await.unwrap().unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["Milk", "Eggs"]);
    }
}
