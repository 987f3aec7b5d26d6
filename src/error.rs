// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::ViewError;
use crate::database::DatabaseError;
use crate::middleware::AuthError;

/// HTTP API error; every variant renders as `{ "error": "<message>" }`
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    /// `Missing '<field>' in request body`
    pub fn missing_field(field: &str) -> Self {
        ApiError::ValidationError(format!("Missing '{}' in request body", field))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn thing_not_found() -> Self {
        ApiError::NotFound("Thing doesn't exist".to_string())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(db_err) => db_err.into(),
            rejection => ApiError::unauthorized(rejection.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Don't expose internal database errors to clients
        tracing::error!("Database error: {}", err);
        ApiError::internal_server_error("Internal server error")
    }
}

impl From<ViewError> for ApiError {
    fn from(err: ViewError) -> Self {
        tracing::error!("Data integrity fault: {}", err);
        ApiError::internal_server_error("Internal server error")
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_single_error_field() {
        let err = ApiError::missing_field("rating");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json(), json!({ "error": "Missing 'rating' in request body" }));
    }

    #[test]
    fn auth_errors_map_to_401() {
        let missing = ApiError::from(AuthError::MissingToken);
        assert_eq!(missing.status_code(), 401);
        assert_eq!(missing.message(), "Missing bearer token");

        let rejected = ApiError::from(AuthError::Unauthorized);
        assert_eq!(rejected.status_code(), 401);
        assert_eq!(rejected.message(), "Unauthorized request");
    }

    #[test]
    fn database_errors_hide_details() {
        let err = ApiError::from(DatabaseError::ForeignKey("thingful_reviews_thing_id_fkey".into()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Internal server error");
    }
}
