use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::grocery_item::model::GroceryItem;
use crate::domain::grocery_list::model::GroceryList;
use crate::domain::logger::Logger;
use crate::domain::repository::Repository;

/// Transaction boundary shared by the repositories of one request.
///
/// Writes made through `lists()` and `items()` become visible to other units
/// of work only after `commit`. `rollback` discards them, as does dropping the
/// unit of work without committing. Both leave the unit of work usable: the
/// next repository call starts a fresh transaction.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn lists(&self) -> &dyn Repository<GroceryList>;
    fn items(&self) -> &dyn Repository<GroceryItem>;
    async fn commit(&self) -> Result<(), RepositoryError>;
    async fn rollback(&self) -> Result<(), RepositoryError>;
}

/// Opens units of work. Owned by the boundary layer, one unit per request.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError>;
}

/// Finishes a multi-step operation: commits when `outcome` is `Ok`, rolls the
/// whole unit back otherwise and hands the error back.
///
/// A failed commit applies nothing, so there is nothing left to roll back.
pub async fn complete<T, E>(
    uow: &dyn UnitOfWork,
    logger: &dyn Logger,
    outcome: Result<T, E>,
) -> Result<T, E>
where
    T: Send,
    E: From<RepositoryError> + std::fmt::Display + Send,
{
    match outcome {
        Ok(value) => match uow.commit().await {
            Ok(()) => Ok(value),
            Err(err) => {
                logger.error(&format!("Commit failed: {:?}", err));
                Err(err.into())
            }
        },
        Err(err) => {
            logger.warn(&format!("Rolling back unit of work: {}", err));
            if let Err(rollback_err) = uow.rollback().await {
                logger.error(&format!("Rollback failed: {:?}", rollback_err));
            }
            Err(err)
        }
    }
}
