use std::sync::Arc;

use async_trait::async_trait;

use business::domain::errors::RepositoryError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::repository::{Entity, EntityId, Repository};

use super::entity::GroceryItemEntity;
use crate::db::storage_error;
use crate::unit_of_work::{PgSession, connection};

pub struct GroceryItemRepositoryPostgres {
    session: Arc<PgSession>,
}

impl GroceryItemRepositoryPostgres {
    pub(crate) fn new(session: Arc<PgSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Repository<GroceryItem> for GroceryItemRepositoryPostgres {
    async fn add(&self, mut item: GroceryItem) -> Result<GroceryItem, RepositoryError> {
        if item.id().is_some() {
            return Err(RepositoryError::invalid_operation(
                "grocery item is already persisted",
            ));
        }
        let list_id = item.list_id().ok_or_else(|| {
            RepositoryError::invalid_operation("grocery item is not attached to a list")
        })?;

        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO grocery_items (grocery_list_id, name, quantity, status, purchased_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id"#,
        )
        .bind(list_id)
        .bind(item.name())
        .bind(item.quantity())
        .bind(item.status().to_string())
        .bind(item.purchased_at())
        .bind(item.created_at())
        .bind(item.updated_at())
        .fetch_one(&mut *conn)
        .await
        .map_err(storage_error)?;

        item.assign_id(id);
        Ok(item)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<GroceryItem>, RepositoryError> {
        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        sqlx::query_as::<_, GroceryItemEntity>(
            "SELECT id, grocery_list_id, name, quantity, status, purchased_at, created_at, updated_at FROM grocery_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(storage_error)?
        .map(GroceryItemEntity::into_domain)
        .transpose()
    }

    async fn get_all(&self) -> Result<Vec<GroceryItem>, RepositoryError> {
        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        let entities = sqlx::query_as::<_, GroceryItemEntity>(
            "SELECT id, grocery_list_id, name, quantity, status, purchased_at, created_at, updated_at FROM grocery_items ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(storage_error)?;

        entities
            .into_iter()
            .map(GroceryItemEntity::into_domain)
            .collect()
    }

    async fn update(&self, item: GroceryItem) -> Result<GroceryItem, RepositoryError> {
        let id = item.id().ok_or_else(RepositoryError::missing_identity)?;

        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        sqlx::query(
            r#"UPDATE grocery_items SET
                name = $2,
                quantity = $3,
                status = $4,
                purchased_at = $5,
                updated_at = $6
            WHERE id = $1"#,
        )
        .bind(id)
        .bind(item.name())
        .bind(item.quantity())
        .bind(item.status().to_string())
        .bind(item.purchased_at())
        .bind(item.updated_at())
        .execute(&mut *conn)
        .await
        .map_err(storage_error)?;

        Ok(item)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, RepositoryError> {
        let mut slot = self.session.transaction().await?;
        let conn = connection(&mut slot)?;

        let result = sqlx::query("DELETE FROM grocery_items WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
