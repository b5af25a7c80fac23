//! Typed error handling for the inkpost backend
//!
//! Every failure that can cross the HTTP boundary is expressed as an
//! [`ApiError`], which knows its own status code and JSON body shape.
//! Storage backends raise the narrower [`StorageError`]; services either
//! translate those into entity-specific [`ApiError`]s or let the blanket
//! `From` impl map them to their generic equivalents.
//!
//! # Status taxonomy
//!
//! - validation failure → 400 with structured field errors
//! - malformed path identifier → 400
//! - bad foreign-key reference → 400
//! - not found → 404
//! - uniqueness conflict → 409
//! - storage/unexpected failure → 500 (logged, generic body)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// A single field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The main error type for request handling.
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed schema validation
    Validation(Vec<FieldError>),

    /// Malformed request that never reached validation (bad JSON, bad shape)
    BadRequest { message: String },

    /// Path identifier is not a well-formed UUID
    InvalidId { value: String },

    /// Entity lookup came up empty
    NotFound { resource: &'static str },

    /// Uniqueness constraint violated
    Conflict { message: String },

    /// A referenced foreign entity does not exist
    ReferenceNotFound { message: String },

    /// Unexpected failure (storage, integrity, bugs)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation failed: {}", msgs.join(", "))
            }
            ApiError::BadRequest { message } => write!(f, "Bad request: {}", message),
            ApiError::InvalidId { value } => write!(f, "Invalid UUID format: '{}'", value),
            ApiError::NotFound { resource } => write!(f, "{} not found", resource),
            ApiError::Conflict { message } => write!(f, "{}", message),
            ApiError::ReferenceNotFound { message } => write!(f, "{}", message),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::ReferenceNotFound { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the JSON body for this error.
    ///
    /// Validation failures use the structured `{status, message, errors}`
    /// shape; everything else is a plain `{error}` object. Internal errors
    /// never leak their cause to the client.
    pub fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(errors) => json!({
                "status": "error",
                "message": "Validation failed",
                "errors": errors,
            }),
            ApiError::BadRequest { message } => json!({ "error": message }),
            ApiError::InvalidId { .. } => json!({ "error": "Invalid UUID format" }),
            ApiError::NotFound { resource } => {
                json!({ "error": format!("{} not found", resource) })
            }
            ApiError::Conflict { message } => json!({ "error": message }),
            ApiError::ReferenceNotFound { message } => json!({ "error": message }),
            ApiError::Internal(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            tracing::error!(error = %msg, "request failed");
        }
        (self.status_code(), Json(self.body())).into_response()
    }
}

// =============================================================================
// Storage errors
// =============================================================================

/// Errors raised by storage backends.
///
/// Constraint violations carry the violated constraint's name so services
/// can produce entity-specific messages. The in-memory backend uses the
/// same constraint names as the PostgreSQL schema.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unique constraint '{constraint}' violated")]
    UniqueViolation { constraint: String },

    #[error("foreign key constraint '{constraint}' violated")]
    ForeignKeyViolation { constraint: String },

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation { .. } => ApiError::Conflict {
                message: "Resource already exists".to_string(),
            },
            StorageError::ForeignKeyViolation { .. } => ApiError::ReferenceNotFound {
                message: "Referenced entity not found".to_string(),
            },
            StorageError::Database(e) => ApiError::Internal(e.to_string()),
            StorageError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

/// A specialized Result type for service and handler operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound { resource: "User" }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict {
                message: "dup".to_string()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::ReferenceNotFound {
                message: "missing".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_shape() {
        let err = ApiError::Validation(vec![
            FieldError::new("email", "Invalid email address"),
            FieldError::new("password", "must be at least 6 characters"),
        ]);
        let body = err.body();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[test]
    fn test_not_found_body() {
        let err = ApiError::NotFound { resource: "Blog" };
        assert_eq!(err.body()["error"], "Blog not found");
    }

    #[test]
    fn test_internal_body_does_not_leak() {
        let err = ApiError::Internal("connection refused on 10.0.0.3".to_string());
        assert_eq!(err.body()["error"], "Internal server error");
    }

    #[test]
    fn test_storage_error_conversion() {
        let err: ApiError = StorageError::UniqueViolation {
            constraint: "users_email_key".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: ApiError = StorageError::ForeignKeyViolation {
            constraint: "comments_user_id_fkey".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_display() {
        let err = ApiError::NotFound { resource: "Author" };
        assert_eq!(err.to_string(), "Author not found");

        let err = ApiError::InvalidId {
            value: "not-a-uuid".to_string(),
        };
        assert!(err.to_string().contains("not-a-uuid"));
    }
}
