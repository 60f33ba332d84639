use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;

use crate::domain::errors::RepositoryError;
use crate::domain::grocery_item::model::GroceryItem;
use crate::domain::grocery_item::value_objects::ItemStatus;
use crate::domain::grocery_list::model::GroceryList;
use crate::domain::logger::Logger;
use crate::domain::repository::{EntityId, Repository};
use crate::domain::unit_of_work::UnitOfWork;

mock! {
    pub ListRepo {}

    #[async_trait]
    impl Repository<GroceryList> for ListRepo {
        async fn add(&self, entity: GroceryList) -> Result<GroceryList, RepositoryError>;
        async fn get_by_id(&self, id: EntityId) -> Result<Option<GroceryList>, RepositoryError>;
        async fn get_all(&self) -> Result<Vec<GroceryList>, RepositoryError>;
        async fn update(&self, entity: GroceryList) -> Result<GroceryList, RepositoryError>;
        async fn delete_by_id(&self, id: EntityId) -> Result<bool, RepositoryError>;
    }
}

mock! {
    pub ItemRepo {}

    #[async_trait]
    impl Repository<GroceryItem> for ItemRepo {
        async fn add(&self, entity: GroceryItem) -> Result<GroceryItem, RepositoryError>;
        async fn get_by_id(&self, id: EntityId) -> Result<Option<GroceryItem>, RepositoryError>;
        async fn get_all(&self) -> Result<Vec<GroceryItem>, RepositoryError>;
        async fn update(&self, entity: GroceryItem) -> Result<GroceryItem, RepositoryError>;
        async fn delete_by_id(&self, id: EntityId) -> Result<bool, RepositoryError>;
    }
}

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

/// Unit of work over mocked repositories that counts commits and rollbacks.
pub struct RecordingUnitOfWork {
    pub lists: MockListRepo,
    pub items: MockItemRepo,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl RecordingUnitOfWork {
    pub fn new(lists: MockListRepo, items: MockItemRepo) -> Self {
        Self {
            lists,
            items,
            commits: AtomicUsize::new(0),
            rollbacks: AtomicUsize::new(0),
        }
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnitOfWork for RecordingUnitOfWork {
    fn lists(&self) -> &dyn Repository<GroceryList> {
        &self.lists
    }

    fn items(&self) -> &dyn Repository<GroceryItem> {
        &self.items
    }

    async fn commit(&self) -> Result<(), RepositoryError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(&self) -> Result<(), RepositoryError> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn stored_item(id: EntityId, list_id: EntityId, name: &str) -> GroceryItem {
    let now = Utc::now();
    GroceryItem::from_repository(id, list_id, name.to_string(), 1, ItemStatus::Pending, None, now, now)
}

/// Persisted list last touched an hour ago.
pub fn stored_list(id: EntityId, name: &str, items: Vec<GroceryItem>) -> GroceryList {
    let earlier = Utc::now() - chrono::Duration::hours(1);
    GroceryList::from_repository(id, name.to_string(), earlier, earlier, items)
}
