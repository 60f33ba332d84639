use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};

use business::domain::errors::RepositoryError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_list::model::GroceryList;
use business::domain::repository::Repository;
use business::domain::unit_of_work::{UnitOfWork, UnitOfWorkFactory};

use crate::db::storage_error;
use crate::grocery_item::repository::GroceryItemRepositoryPostgres;
use crate::grocery_list::repository::GroceryListRepositoryPostgres;

pub(crate) type TransactionSlot = Option<Transaction<'static, Postgres>>;

/// One database transaction shared by every repository of a unit of work.
/// A new transaction is opened lazily after a commit or rollback.
pub(crate) struct PgSession {
    pool: PgPool,
    tx: Mutex<TransactionSlot>,
}

impl PgSession {
    async fn begin(pool: PgPool) -> Result<Self, RepositoryError> {
        let tx = pool.begin().await.map_err(storage_error)?;
        Ok(Self {
            pool,
            tx: Mutex::new(Some(tx)),
        })
    }

    pub(crate) async fn transaction(&self) -> Result<MutexGuard<'_, TransactionSlot>, RepositoryError> {
        let mut slot = self.tx.lock().await;
        if slot.is_none() {
            *slot = Some(self.pool.begin().await.map_err(storage_error)?);
        }
        Ok(slot)
    }

    async fn take(&self) -> TransactionSlot {
        self.tx.lock().await.take()
    }
}

pub(crate) fn connection(slot: &mut TransactionSlot) -> Result<&mut PgConnection, RepositoryError> {
    slot.as_deref_mut()
        .ok_or_else(|| RepositoryError::invalid_operation("transaction is not open"))
}

pub struct PgUnitOfWork {
    session: Arc<PgSession>,
    lists: GroceryListRepositoryPostgres,
    items: GroceryItemRepositoryPostgres,
}

impl PgUnitOfWork {
    pub async fn begin(pool: PgPool) -> Result<Self, RepositoryError> {
        let session = Arc::new(PgSession::begin(pool).await?);
        Ok(Self {
            lists: GroceryListRepositoryPostgres::new(session.clone()),
            items: GroceryItemRepositoryPostgres::new(session.clone()),
            session,
        })
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    fn lists(&self) -> &dyn Repository<GroceryList> {
        &self.lists
    }

    fn items(&self) -> &dyn Repository<GroceryItem> {
        &self.items
    }

    async fn commit(&self) -> Result<(), RepositoryError> {
        match self.session.take().await {
            Some(tx) => tx.commit().await.map_err(storage_error),
            None => Ok(()),
        }
    }

    async fn rollback(&self) -> Result<(), RepositoryError> {
        match self.session.take().await {
            Some(tx) => tx.rollback().await.map_err(storage_error),
            None => Ok(()),
        }
    }
}

pub struct PgUnitOfWorkFactory {
    pool: PgPool,
}

impl PgUnitOfWorkFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PgUnitOfWorkFactory {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        let uow = PgUnitOfWork::begin(self.pool.clone()).await?;
        Ok(Box::new(uow))
    }
}
