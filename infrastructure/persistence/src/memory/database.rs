use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use business::domain::errors::RepositoryError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_list::model::GroceryList;
use business::domain::repository::{EntityId, Repository};
use business::domain::unit_of_work::{UnitOfWork, UnitOfWorkFactory};

use super::repository::{InMemoryGroceryItemRepository, InMemoryGroceryListRepository};
use super::state::{Change, MemoryState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Lists,
    Items,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    GetById,
    GetAll,
    Update,
    DeleteById,
}

/// Makes the matching repository call fail with a storage error once
/// `after` matching calls have gone through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub collection: Collection,
    pub operation: Operation,
    pub after: usize,
}

impl Fault {
    pub fn new(collection: Collection, operation: Operation) -> Self {
        Self {
            collection,
            operation,
            after: 0,
        }
    }

    pub fn after(mut self, calls: usize) -> Self {
        self.after = calls;
        self
    }
}

#[derive(Default)]
struct Shared {
    committed: Mutex<MemoryState>,
    list_ids: AtomicI64,
    item_ids: AtomicI64,
    fault: Mutex<Option<Fault>>,
}

/// Process-local store with the same unit-of-work semantics as the Postgres
/// backend. Clones share the same data.
///
/// Ids come from counters that are never rolled back, so they stay unique
/// across aborted units of work.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    shared: Arc<Shared>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit_of_work(&self) -> Result<InMemoryUnitOfWork, RepositoryError> {
        InMemoryUnitOfWork::new(self.clone())
    }

    /// Arms a one-shot fault. Replaces any fault that has not fired yet.
    pub fn inject_fault(&self, fault: Fault) -> Result<(), RepositoryError> {
        *lock(&self.shared.fault)? = Some(fault);
        Ok(())
    }

    pub fn clear_fault(&self) -> Result<(), RepositoryError> {
        *lock(&self.shared.fault)? = None;
        Ok(())
    }

    fn snapshot(&self) -> Result<MemoryState, RepositoryError> {
        Ok(lock(&self.shared.committed)?.clone())
    }

    fn next_list_id(&self) -> EntityId {
        self.shared.list_ids.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn next_item_id(&self) -> EntityId {
        self.shared.item_ids.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn trip(&self, collection: Collection, operation: Operation) -> Result<(), RepositoryError> {
        let mut slot = lock(&self.shared.fault)?;
        let Some(fault) = slot.as_mut() else {
            return Ok(());
        };
        if fault.collection != collection || fault.operation != operation {
            return Ok(());
        }
        if fault.after > 0 {
            fault.after -= 1;
            return Ok(());
        }

        *slot = None;
        tracing::debug!(?collection, ?operation, "injected fault fired");
        Err(RepositoryError::storage_error(format!(
            "injected fault on {:?} {:?}",
            collection, operation
        )))
    }
}

#[async_trait]
impl UnitOfWorkFactory for InMemoryDatabase {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        Ok(Box::new(self.unit_of_work()?))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::storage_error("in-memory store lock poisoned"))
}

struct Working {
    state: MemoryState,
    journal: Vec<Change>,
}

/// Private view of one unit of work over the committed state.
pub(crate) struct MemorySession {
    database: InMemoryDatabase,
    working: Mutex<Working>,
}

impl MemorySession {
    fn new(database: InMemoryDatabase) -> Result<Self, RepositoryError> {
        let state = database.snapshot()?;
        Ok(Self {
            database,
            working: Mutex::new(Working {
                state,
                journal: Vec::new(),
            }),
        })
    }

    pub(crate) fn guard(
        &self,
        collection: Collection,
        operation: Operation,
    ) -> Result<(), RepositoryError> {
        self.database.trip(collection, operation)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&MemoryState) -> R) -> Result<R, RepositoryError> {
        Ok(f(&lock(&self.working)?.state))
    }

    pub(crate) fn write(&self, change: Change) -> Result<bool, RepositoryError> {
        let mut working = lock(&self.working)?;
        let touched = working.state.apply(change.clone())?;
        working.journal.push(change);
        Ok(touched)
    }

    pub(crate) fn next_list_id(&self) -> EntityId {
        self.database.next_list_id()
    }

    pub(crate) fn next_item_id(&self) -> EntityId {
        self.database.next_item_id()
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        let mut working = lock(&self.working)?;
        let mut committed = lock(&self.database.shared.committed)?;

        let journal = std::mem::take(&mut working.journal);
        let mut next = committed.clone();
        let replayed = journal
            .into_iter()
            .try_for_each(|change| next.apply(change).map(|_| ()));

        if replayed.is_ok() {
            *committed = next;
        }
        working.state = committed.clone();
        replayed
    }

    fn rollback(&self) -> Result<(), RepositoryError> {
        let mut working = lock(&self.working)?;
        let committed = lock(&self.database.shared.committed)?;

        working.journal.clear();
        working.state = committed.clone();
        Ok(())
    }
}

pub struct InMemoryUnitOfWork {
    session: Arc<MemorySession>,
    lists: InMemoryGroceryListRepository,
    items: InMemoryGroceryItemRepository,
}

impl InMemoryUnitOfWork {
    fn new(database: InMemoryDatabase) -> Result<Self, RepositoryError> {
        let session = Arc::new(MemorySession::new(database)?);
        Ok(Self {
            lists: InMemoryGroceryListRepository::new(session.clone()),
            items: InMemoryGroceryItemRepository::new(session.clone()),
            session,
        })
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn lists(&self) -> &dyn Repository<GroceryList> {
        &self.lists
    }

    fn items(&self) -> &dyn Repository<GroceryItem> {
        &self.items
    }

    async fn commit(&self) -> Result<(), RepositoryError> {
        self.session.commit()
    }

    async fn rollback(&self) -> Result<(), RepositoryError> {
        self.session.rollback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_list(db: &InMemoryDatabase, name: &str) -> GroceryList {
        let uow = db.unit_of_work().unwrap();
        let list = uow
            .lists()
            .add(GroceryList::new(name.to_string()).unwrap())
            .await
            .unwrap();
        uow.commit().await.unwrap();
        list
    }

    #[tokio::test]
    async fn should_hide_uncommitted_writes_from_other_units() {
        let db = InMemoryDatabase::new();
        let writer = db.unit_of_work().unwrap();
        writer
            .lists()
            .add(GroceryList::new("Weekly".to_string()).unwrap())
            .await
            .unwrap();

        let reader = db.unit_of_work().unwrap();
        assert!(reader.lists().get_all().await.unwrap().is_empty());

        writer.commit().await.unwrap();

        let reader = db.unit_of_work().unwrap();
        assert_eq!(reader.lists().get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_discard_writes_on_rollback() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        uow.lists()
            .add(GroceryList::new("Weekly".to_string()).unwrap())
            .await
            .unwrap();

        uow.rollback().await.unwrap();

        assert!(uow.lists().get_all().await.unwrap().is_empty());
        let fresh = db.unit_of_work().unwrap();
        assert!(fresh.lists().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_discard_writes_when_dropped_without_commit() {
        let db = InMemoryDatabase::new();
        {
            let uow = db.unit_of_work().unwrap();
            uow.lists()
                .add(GroceryList::new("Weekly".to_string()).unwrap())
                .await
                .unwrap();
        }

        let fresh = db.unit_of_work().unwrap();
        assert!(fresh.lists().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_stay_usable_after_commit() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        uow.lists()
            .add(GroceryList::new("Weekly".to_string()).unwrap())
            .await
            .unwrap();
        uow.commit().await.unwrap();

        uow.lists()
            .add(GroceryList::new("Party".to_string()).unwrap())
            .await
            .unwrap();
        uow.commit().await.unwrap();

        let fresh = db.unit_of_work().unwrap();
        assert_eq!(fresh.lists().get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_not_reuse_ids_after_rollback() {
        let db = InMemoryDatabase::new();
        let uow = db.unit_of_work().unwrap();
        let first = uow
            .lists()
            .add(GroceryList::new("Weekly".to_string()).unwrap())
            .await
            .unwrap();
        uow.rollback().await.unwrap();

        let second = seed_list(&db, "Party").await;

        assert_eq!(first.id(), Some(1));
        assert_eq!(second.id(), Some(2));
    }

    #[tokio::test]
    async fn should_fire_fault_once_after_given_calls() {
        let db = InMemoryDatabase::new();
        seed_list(&db, "Weekly").await;
        db.inject_fault(Fault::new(Collection::Lists, Operation::GetById).after(1))
            .unwrap();
        let uow = db.unit_of_work().unwrap();

        assert!(uow.lists().get_by_id(1).await.is_ok());
        assert!(matches!(
            uow.lists().get_by_id(1).await,
            Err(RepositoryError::StorageError(_))
        ));
        assert!(uow.lists().get_by_id(1).await.is_ok());
    }

    #[tokio::test]
    async fn should_ignore_fault_for_other_operations() {
        let db = InMemoryDatabase::new();
        seed_list(&db, "Weekly").await;
        db.inject_fault(Fault::new(Collection::Items, Operation::GetById))
            .unwrap();
        let uow = db.unit_of_work().unwrap();

        assert!(uow.lists().get_by_id(1).await.is_ok());
        assert!(uow.items().get_all().await.is_ok());

        db.clear_fault().unwrap();
        assert!(uow.items().get_by_id(1).await.is_ok());
    }

    #[tokio::test]
    async fn should_fail_commit_when_owner_was_removed_concurrently() {
        let db = InMemoryDatabase::new();
        let list = seed_list(&db, "Weekly").await;
        let list_id = list.id().unwrap();

        let adder = db.unit_of_work().unwrap();
        let mut weekly = adder.lists().get_by_id(list_id).await.unwrap().unwrap();
        let item = weekly
            .add_item(GroceryItem::new("Milk".to_string(), 1).unwrap())
            .clone();
        adder.items().add(item).await.unwrap();

        let remover = db.unit_of_work().unwrap();
        assert!(remover.lists().delete_by_id(list_id).await.unwrap());
        remover.commit().await.unwrap();

        assert!(matches!(
            adder.commit().await,
            Err(RepositoryError::StorageError(_))
        ));
        let fresh = db.unit_of_work().unwrap();
        assert!(fresh.items().get_all().await.unwrap().is_empty());
    }
}
