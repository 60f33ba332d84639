use std::sync::Arc;

use async_trait::async_trait;

use business::domain::errors::RepositoryError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_list::model::GroceryList;
use business::domain::repository::{Entity, EntityId, Repository};

use super::database::{Collection, MemorySession, Operation};
use super::state::{Change, ListRow};

pub struct InMemoryGroceryListRepository {
    session: Arc<MemorySession>,
}

impl InMemoryGroceryListRepository {
    pub(crate) fn new(session: Arc<MemorySession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<GroceryList> for InMemoryGroceryListRepository {
    async fn add(&self, mut list: GroceryList) -> Result<GroceryList, RepositoryError> {
        self.session.guard(Collection::Lists, Operation::Add)?;
        if list.id().is_some() {
            return Err(RepositoryError::invalid_operation(
                "grocery list is already persisted",
            ));
        }

        let id = self.session.next_list_id();
        self.session
            .write(Change::InsertList(id, ListRow::from(&list)))?;
        list.assign_id(id);
        Ok(list)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<GroceryList>, RepositoryError> {
        self.session.guard(Collection::Lists, Operation::GetById)?;
        self.session.read(|state| state.list(id))
    }

    async fn get_all(&self) -> Result<Vec<GroceryList>, RepositoryError> {
        self.session.guard(Collection::Lists, Operation::GetAll)?;
        self.session.read(|state| state.lists())
    }

    async fn update(&self, list: GroceryList) -> Result<GroceryList, RepositoryError> {
        self.session.guard(Collection::Lists, Operation::Update)?;
        let id = list.id().ok_or_else(RepositoryError::missing_identity)?;

        self.session
            .write(Change::UpdateList(id, ListRow::from(&list)))?;
        Ok(list)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, RepositoryError> {
        self.session.guard(Collection::Lists, Operation::DeleteById)?;
        self.session.write(Change::DeleteList(id))
    }
}

pub struct InMemoryGroceryItemRepository {
    session: Arc<MemorySession>,
}

impl InMemoryGroceryItemRepository {
    pub(crate) fn new(session: Arc<MemorySession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<GroceryItem> for InMemoryGroceryItemRepository {
    async fn add(&self, mut item: GroceryItem) -> Result<GroceryItem, RepositoryError> {
        self.session.guard(Collection::Items, Operation::Add)?;
        if item.id().is_some() {
            return Err(RepositoryError::invalid_operation(
                "grocery item is already persisted",
            ));
        }
        if item.list_id().is_none() {
            return Err(RepositoryError::invalid_operation(
                "grocery item is not attached to a list",
            ));
        }

        item.assign_id(self.session.next_item_id());
        self.session.write(Change::InsertItem(item.clone()))?;
        Ok(item)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<GroceryItem>, RepositoryError> {
        self.session.guard(Collection::Items, Operation::GetById)?;
        self.session.read(|state| state.item(id))
    }

    async fn get_all(&self) -> Result<Vec<GroceryItem>, RepositoryError> {
        self.session.guard(Collection::Items, Operation::GetAll)?;
        self.session.read(|state| state.items())
    }

    async fn update(&self, item: GroceryItem) -> Result<GroceryItem, RepositoryError> {
        self.session.guard(Collection::Items, Operation::Update)?;
        if item.id().is_none() {
            return Err(RepositoryError::missing_identity());
        }

        self.session.write(Change::UpdateItem(item.clone()))?;
        Ok(item)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, RepositoryError> {
        self.session.guard(Collection::Items, Operation::DeleteById)?;
        self.session.write(Change::DeleteItem(id))
    }
}

#[cfg(test)]
mod tests {
    use business::domain::unit_of_work::UnitOfWork;

    use super::*;
    use crate::memory::database::InMemoryDatabase;

    fn new_list(name: &str) -> GroceryList {
        GroceryList::new(name.to_string()).unwrap()
    }

    async fn item_for(uow: &dyn UnitOfWork, list_id: EntityId, name: &str) -> GroceryItem {
        let mut list = uow.lists().get_by_id(list_id).await.unwrap().unwrap();
        let item = list
            .add_item(GroceryItem::new(name.to_string(), 1).unwrap())
            .clone();
        uow.items().add(item).await.unwrap()
    }

    #[tokio::test]
    async fn should_assign_ids_starting_at_one() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();

        let first = uow.lists().add(new_list("Weekly")).await.unwrap();
        let second = uow.lists().add(new_list("Party")).await.unwrap();

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
    }

    #[tokio::test]
    async fn should_return_lists_in_creation_order() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        for name in ["Weekly", "Party", "Camping"] {
            uow.lists().add(new_list(name)).await.unwrap();
        }

        let names: Vec<String> = uow
            .lists()
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|list| list.name().to_string())
            .collect();

        assert_eq!(names, vec!["Weekly", "Party", "Camping"]);
    }

    #[tokio::test]
    async fn should_return_none_for_unknown_ids() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();

        assert!(uow.lists().get_by_id(42).await.unwrap().is_none());
        assert!(uow.items().get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_report_false_when_deleting_unknown_ids() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();

        assert!(!uow.lists().delete_by_id(7).await.unwrap());
        assert!(!uow.items().delete_by_id(7).await.unwrap());
    }

    #[tokio::test]
    async fn should_reject_update_without_identity() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();

        let result = uow.lists().update(new_list("Weekly")).await;

        assert!(matches!(result, Err(RepositoryError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn should_reject_adding_unattached_item() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();

        let result = uow
            .items()
            .add(GroceryItem::new("Milk".to_string(), 1).unwrap())
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn should_reject_adding_persisted_list() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        let stored = uow.lists().add(new_list("Weekly")).await.unwrap();

        let result = uow.lists().add(stored).await;

        assert!(matches!(result, Err(RepositoryError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn should_hydrate_list_items_in_insertion_order() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        let list = uow.lists().add(new_list("Weekly")).await.unwrap();
        let list_id = list.id().unwrap();
        item_for(&uow, list_id, "Milk").await;
        item_for(&uow, list_id, "Eggs").await;

        let stored = uow.lists().get_by_id(list_id).await.unwrap().unwrap();
        let names: Vec<&str> = stored.items().iter().map(|item| item.name()).collect();

        assert_eq!(names, vec!["Milk", "Eggs"]);
        assert!(stored.items().iter().all(|item| item.list_id() == Some(list_id)));
    }

    #[tokio::test]
    async fn should_persist_item_changes_on_update() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        let list = uow.lists().add(new_list("Weekly")).await.unwrap();
        let mut item = item_for(&uow, list.id().unwrap(), "Milk").await;

        item.mark_purchased();
        item.requantify(3).unwrap();
        uow.items().update(item.clone()).await.unwrap();

        let stored = uow.items().get_by_id(item.id().unwrap()).await.unwrap().unwrap();
        assert!(stored.is_purchased());
        assert_eq!(stored.quantity(), 3);
    }

    #[tokio::test]
    async fn should_ignore_update_of_unknown_item() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        let list = uow.lists().add(new_list("Weekly")).await.unwrap();
        let item = item_for(&uow, list.id().unwrap(), "Milk").await;
        assert!(uow.items().delete_by_id(item.id().unwrap()).await.unwrap());

        uow.items().update(item).await.unwrap();

        assert!(uow.items().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_delete_items_with_their_list() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        let list = uow.lists().add(new_list("Weekly")).await.unwrap();
        item_for(&uow, list.id().unwrap(), "Milk").await;

        assert!(uow.lists().delete_by_id(list.id().unwrap()).await.unwrap());

        assert!(uow.items().get_all().await.unwrap().is_empty());
    }
}
