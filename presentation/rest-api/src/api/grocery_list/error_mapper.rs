use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::grocery_list::errors::GroceryListError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for GroceryListError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = match &self {
            GroceryListError::NameEmpty => (StatusCode::BAD_REQUEST, "ValidationError"),
            GroceryListError::Repository(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
            }
        };

        (status, ErrorResponse::new(name, &self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use business::domain::errors::RepositoryError;

    use super::*;

    #[test]
    fn should_map_validation_to_bad_request() {
        let (status, json) = GroceryListError::NameEmpty.into_error_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.message, "grocery_list.name_empty");
    }

    #[test]
    fn should_map_storage_failure_to_internal_error() {
        let err = GroceryListError::from(RepositoryError::storage_error("down"));

        let (status, json) = err.into_error_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.name, "InternalError");
    }
}
