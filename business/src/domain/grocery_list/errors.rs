#[derive(Debug, thiserror::Error)]
pub enum GroceryListError {
    #[error("grocery_list.name_empty")]
    NameEmpty,
    #[error("repository.persistence")]
    Repository(#[from] crate::domain::errors::RepositoryError),
}
