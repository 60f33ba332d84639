use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

/// Storage identity of a persisted entity.
pub type EntityId = i64;

/// Implemented by every entity a [`Repository`] can store.
///
/// Identity is absent until the entity is persisted for the first time; only
/// repositories assign it.
pub trait Entity {
    fn id(&self) -> Option<EntityId>;
    fn assign_id(&mut self, id: EntityId);
}

/// Storage-agnostic CRUD contract shared by every backend.
///
/// - `add` assigns the identity and returns the entity carrying it.
/// - `get_by_id` returns `None` for unknown ids.
/// - `get_all` returns entities in creation order.
/// - `update` requires an identity and fails with
///   [`RepositoryError::InvalidOperation`] otherwise.
/// - `delete_by_id` reports whether a row was actually removed.
#[async_trait]
pub trait Repository<T: Send + 'static>: Send + Sync {
    async fn add(&self, entity: T) -> Result<T, RepositoryError>;
    async fn get_by_id(&self, id: EntityId) -> Result<Option<T>, RepositoryError>;
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;
    async fn update(&self, entity: T) -> Result<T, RepositoryError>;
    async fn delete_by_id(&self, id: EntityId) -> Result<bool, RepositoryError>;
}
