use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::grocery_item::errors::GroceryItemError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for GroceryItemError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name) = if self.is_validation() {
            (StatusCode::BAD_REQUEST, "ValidationError")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
        };

        (status, ErrorResponse::new(name, &self.to_string()))
    }
}
