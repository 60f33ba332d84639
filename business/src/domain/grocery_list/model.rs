use chrono::{DateTime, Utc};

use super::errors::GroceryListError;
use crate::domain::grocery_item::model::GroceryItem;
use crate::domain::repository::{Entity, EntityId};

/// A named list that exclusively owns its items, kept in insertion order.
///
/// Every item in `items` carries this list's identity as its `list_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryList {
    id: Option<EntityId>,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    items: Vec<GroceryItem>,
}

impl GroceryList {
    pub fn new(name: String) -> Result<Self, GroceryListError> {
        validate_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            name,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: EntityId,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        items: Vec<GroceryItem>,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            created_at,
            updated_at,
            items,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn rename(&mut self, name: String) -> Result<(), GroceryListError> {
        validate_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Appends `item`, pointing its back-reference at this list.
    pub fn add_item(&mut self, mut item: GroceryItem) -> &mut GroceryItem {
        item.attach_to(self.id);
        let index = self.items.len();
        self.items.push(item);
        self.touch();
        &mut self.items[index]
    }

    /// Removes the item with `item_id`. Unknown ids are ignored and leave the
    /// list untouched.
    pub fn remove_item(&mut self, item_id: EntityId) -> Option<GroceryItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.id() == Some(item_id))?;
        let removed = self.items.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn pending_items(&self) -> Vec<&GroceryItem> {
        self.items.iter().filter(|item| !item.is_purchased()).collect()
    }

    pub fn purchased_items(&self) -> Vec<&GroceryItem> {
        self.items.iter().filter(|item| item.is_purchased()).collect()
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for GroceryList {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
        for item in &mut self.items {
            item.attach_to(Some(id));
        }
    }
}

fn validate_name(name: &str) -> Result<(), GroceryListError> {
    if name.trim().is_empty() {
        return Err(GroceryListError::NameEmpty);
    }
    Ok(())
}
