/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
///
/// Missing rows are reported as `None` / `false`, never as an error.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Backing store unavailable or a constraint was violated.
    #[error("repository.storage_error")]
    StorageError(String),
    /// Structural misuse of a repository, e.g. updating an entity without identity.
    #[error("repository.invalid_operation")]
    InvalidOperation(&'static str),
}

impl RepositoryError {
    pub fn storage_error(detail: impl Into<String>) -> Self {
        RepositoryError::StorageError(detail.into())
    }
    pub fn invalid_operation(reason: &'static str) -> Self {
        RepositoryError::InvalidOperation(reason)
    }
    pub fn missing_identity() -> Self {
        RepositoryError::InvalidOperation("entity has no identity")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_code_style_messages() {
        assert_eq!(
            RepositoryError::storage_error("connection reset").to_string(),
            "repository.storage_error"
        );
        assert_eq!(
            RepositoryError::missing_identity().to_string(),
            "repository.invalid_operation"
        );
    }

    #[test]
    fn should_keep_storage_detail_for_diagnostics() {
        let err = RepositoryError::storage_error("duplicate key");
        assert!(matches!(err, RepositoryError::StorageError(ref d) if d == "duplicate key"));
    }
}
