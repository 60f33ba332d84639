use chrono::{DateTime, Utc};

use super::errors::GroceryItemError;
use super::value_objects::ItemStatus;
use crate::domain::repository::{Entity, EntityId};

/// A named, quantified purchase-tracking record owned by one grocery list.
///
/// Fields are private: `status` and `purchased_at` only change together through
/// [`GroceryItem::mark_purchased`] and [`GroceryItem::mark_pending`], and
/// `quantity` never drops below 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItem {
    id: Option<EntityId>,
    list_id: Option<EntityId>,
    name: String,
    quantity: i32,
    status: ItemStatus,
    purchased_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroceryItem {
    pub fn new(name: String, quantity: i32) -> Result<Self, GroceryItemError> {
        validate_name(&name)?;
        validate_quantity(quantity)?;

        let now = Utc::now();
        Ok(Self {
            id: None,
            list_id: None,
            name,
            quantity,
            status: ItemStatus::Pending,
            purchased_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: EntityId,
        list_id: EntityId,
        name: String,
        quantity: i32,
        status: ItemStatus,
        purchased_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            list_id: Some(list_id),
            name,
            quantity,
            status,
            purchased_at,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Identity of the owning list, set when the item is added to a list.
    pub fn list_id(&self) -> Option<EntityId> {
        self.list_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn is_purchased(&self) -> bool {
        self.status == ItemStatus::Purchased
    }

    pub fn purchased_at(&self) -> Option<DateTime<Utc>> {
        self.purchased_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn rename(&mut self, name: String) -> Result<(), GroceryItemError> {
        self.update(Some(name), None)
    }

    pub fn requantify(&mut self, quantity: i32) -> Result<(), GroceryItemError> {
        self.update(None, Some(quantity))
    }

    /// Applies a partial edit. Both values are validated before either is
    /// applied; passing neither leaves the item untouched.
    pub fn update(
        &mut self,
        name: Option<String>,
        quantity: Option<i32>,
    ) -> Result<(), GroceryItemError> {
        if let Some(name) = &name {
            validate_name(name)?;
        }
        if let Some(quantity) = quantity {
            validate_quantity(quantity)?;
        }
        if name.is_none() && quantity.is_none() {
            return Ok(());
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Idempotent: an already purchased item gets a fresh `purchased_at`.
    pub fn mark_purchased(&mut self) {
        let now = Utc::now();
        self.status = ItemStatus::Purchased;
        self.purchased_at = Some(now);
        self.updated_at = now;
    }

    /// Idempotent: clears the purchase fields even if already pending.
    pub fn mark_pending(&mut self) {
        self.status = ItemStatus::Pending;
        self.purchased_at = None;
        self.updated_at = Utc::now();
    }

    pub(crate) fn attach_to(&mut self, list_id: Option<EntityId>) {
        self.list_id = list_id;
    }
}

impl Entity for GroceryItem {
    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

fn validate_name(name: &str) -> Result<(), GroceryItemError> {
    if name.trim().is_empty() {
        return Err(GroceryItemError::NameEmpty);
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), GroceryItemError> {
    if quantity < 1 {
        return Err(GroceryItemError::InvalidQuantity);
    }
    Ok(())
}
