use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use business::domain::errors::RepositoryError;
use business::domain::grocery_item::model::GroceryItem;
use business::domain::grocery_list::model::GroceryList;
use business::domain::repository::EntityId;

/// Stored shape of a list: its items live in their own table.
#[derive(Debug, Clone)]
pub(crate) struct ListRow {
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&GroceryList> for ListRow {
    fn from(list: &GroceryList) -> Self {
        Self {
            name: list.name().to_string(),
            created_at: list.created_at(),
            updated_at: list.updated_at(),
        }
    }
}

/// A single write, recorded by a unit of work and replayed on commit.
#[derive(Debug, Clone)]
pub(crate) enum Change {
    InsertList(EntityId, ListRow),
    UpdateList(EntityId, ListRow),
    DeleteList(EntityId),
    InsertItem(GroceryItem),
    UpdateItem(GroceryItem),
    DeleteItem(EntityId),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    lists: BTreeMap<EntityId, ListRow>,
    items: BTreeMap<EntityId, GroceryItem>,
}

impl MemoryState {
    /// Applies one change. Returns whether a row was touched; updates and
    /// deletes of unknown ids touch nothing.
    pub(crate) fn apply(&mut self, change: Change) -> Result<bool, RepositoryError> {
        match change {
            Change::InsertList(id, row) => {
                self.lists.insert(id, row);
                Ok(true)
            }
            Change::UpdateList(id, row) => Ok(match self.lists.get_mut(&id) {
                Some(stored) => {
                    *stored = row;
                    true
                }
                None => false,
            }),
            Change::DeleteList(id) => {
                let removed = self.lists.remove(&id).is_some();
                if removed {
                    self.items.retain(|_, item| item.list_id() != Some(id));
                }
                Ok(removed)
            }
            Change::InsertItem(item) => {
                let id = item.id().ok_or_else(RepositoryError::missing_identity)?;
                self.check_owner(&item)?;
                self.items.insert(id, item);
                Ok(true)
            }
            Change::UpdateItem(item) => {
                let id = item.id().ok_or_else(RepositoryError::missing_identity)?;
                if !self.items.contains_key(&id) {
                    return Ok(false);
                }
                self.check_owner(&item)?;
                self.items.insert(id, item);
                Ok(true)
            }
            Change::DeleteItem(id) => Ok(self.items.remove(&id).is_some()),
        }
    }

    fn check_owner(&self, item: &GroceryItem) -> Result<(), RepositoryError> {
        match item.list_id() {
            Some(list_id) if self.lists.contains_key(&list_id) => Ok(()),
            Some(list_id) => Err(RepositoryError::storage_error(format!(
                "grocery list {} does not exist",
                list_id
            ))),
            None => Err(RepositoryError::invalid_operation(
                "grocery item is not attached to a list",
            )),
        }
    }

    pub(crate) fn list(&self, id: EntityId) -> Option<GroceryList> {
        let row = self.lists.get(&id)?;
        let items = self
            .items
            .values()
            .filter(|item| item.list_id() == Some(id))
            .cloned()
            .collect();

        Some(GroceryList::from_repository(
            id,
            row.name.clone(),
            row.created_at,
            row.updated_at,
            items,
        ))
    }

    pub(crate) fn lists(&self) -> Vec<GroceryList> {
        self.lists.keys().filter_map(|id| self.list(*id)).collect()
    }

    pub(crate) fn item(&self, id: EntityId) -> Option<GroceryItem> {
        self.items.get(&id).cloned()
    }

    pub(crate) fn items(&self) -> Vec<GroceryItem> {
        self.items.values().cloned().collect()
    }
}
