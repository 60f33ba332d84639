use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use business::domain::errors::RepositoryError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_list::model::GroceryList;
use business::domain::repository::{Entity, EntityId, Repository};

use super::entity::GroceryListEntity;
use crate::db::storage_error;
use crate::grocery_item::entity::GroceryItemEntity;
use crate::unit_of_work::{PgSession, connection};

pub struct GroceryListRepositoryPostgres {
    session: Arc<PgSession>,
}

impl GroceryListRepositoryPostgres {
    pub(crate) fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

fn hydrate(entities: Vec<GroceryItemEntity>) -> Result<Vec<GroceryItem>, RepositoryError> {
    entities
        .into_iter()
        .map(GroceryItemEntity::into_domain)
        .collect()
}

#[async_trait]
impl Repository<GroceryList> for GroceryListRepositoryPostgres {
    async fn add(&self, mut list: GroceryList) -> Result<GroceryList, RepositoryError> {
        if list.id().is_some() {
            return Err(RepositoryError::invalid_operation(
                "grocery list is already persisted",
            ));
        }

        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO grocery_lists (name, created_at, updated_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(list.name())
        .bind(list.created_at())
        .bind(list.updated_at())
        .fetch_one(&mut *conn)
        .await
        .map_err(storage_error)?;

        list.assign_id(id);
        Ok(list)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<GroceryList>, RepositoryError> {
        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        let Some(entity) = sqlx::query_as::<_, GroceryListEntity>(
            "SELECT id, name, created_at, updated_at FROM grocery_lists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(storage_error)?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, GroceryItemEntity>(
            "SELECT id, grocery_list_id, name, quantity, status, purchased_at, created_at, updated_at FROM grocery_items WHERE grocery_list_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(storage_error)?;

        Ok(Some(entity.into_domain(hydrate(items)?)))
    }

    async fn get_all(&self) -> Result<Vec<GroceryList>, RepositoryError> {
        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        let entities = sqlx::query_as::<_, GroceryListEntity>(
            "SELECT id, name, created_at, updated_at FROM grocery_lists ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(storage_error)?;

        let items = sqlx::query_as::<_, GroceryItemEntity>(
            "SELECT id, grocery_list_id, name, quantity, status, purchased_at, created_at, updated_at FROM grocery_items ORDER BY grocery_list_id, id",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(storage_error)?;

        let mut by_list: HashMap<EntityId, Vec<GroceryItemEntity>> = HashMap::new();
        for item in items {
            by_list.entry(item.grocery_list_id).or_default().push(item);
        }

        entities
            .into_iter()
            .map(|entity| {
                let items = by_list.remove(&entity.id).unwrap_or_default();
                Ok(entity.into_domain(hydrate(items)?))
            })
            .collect()
    }

    async fn update(&self, list: GroceryList) -> Result<GroceryList, RepositoryError> {
        let id = list.id().ok_or_else(RepositoryError::missing_identity)?;

        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        sqlx::query("UPDATE grocery_lists SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(list.name())
            .bind(list.updated_at())
            .execute(&mut *conn)
            .await
            .map_err(storage_error)?;

        Ok(list)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, RepositoryError> {
        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        let result = sqlx::query("DELETE FROM grocery_lists WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
