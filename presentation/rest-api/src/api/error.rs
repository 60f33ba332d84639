use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

use business::domain::errors::RepositoryError;

#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(name: &str, message: &str) -> Json<Self> {
        Json(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    pub fn not_found(message: &str) -> Json<Self> {
        Self::new("NotFound", message)
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}

/// Failure to open a unit of work.
impl IntoErrorResponse for RepositoryError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("InternalError", &self.to_string()),
        )
    }
}
