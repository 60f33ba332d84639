#[derive(Debug, thiserror::Error)]
pub enum GroceryItemError {
    #[error("grocery_item.name_empty")]
    NameEmpty,
    #[error("grocery_item.invalid_quantity")]
    InvalidQuantity,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}

impl GroceryItemError {
    /// Caller-supplied data was rejected before anything was written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GroceryItemError::NameEmpty | GroceryItemError::InvalidQuantity
        )
    }
}
