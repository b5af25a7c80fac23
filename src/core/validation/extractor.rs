//! Axum extractor for validated payloads
//!
//! `ValidatedJson<T>` runs the payload type's [`Schema`] against the raw
//! JSON body before deserializing into `T`, so handlers only receive data
//! that already passed validation.

use super::schema::Schema;
use crate::core::error::{ApiError, FieldError};
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for payload types that carry a validation schema.
pub trait Validate: DeserializeOwned {
    fn schema() -> Schema;
}

/// Extractor that validates and deserializes a JSON request body.
///
/// ```rust,ignore
/// pub async fn create_user(
///     State(state): State<AppState>,
///     ValidatedJson(payload): ValidatedJson<CreateUser>,
/// ) -> Result<(StatusCode, Json<User>), ApiError> {
///     // payload passed the CreateUser schema
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + Send + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> =
            Json::from_request(req, state)
                .await
                .map_err(|_| ApiError::BadRequest {
                    message: "Invalid JSON body".to_string(),
                })?;

        let accepted = T::schema()
            .validate(&payload)
            .map_err(ApiError::Validation)?;

        let typed: T = serde_json::from_value(accepted).map_err(|e| {
            ApiError::Validation(vec![FieldError::new("body", e.to_string())])
        })?;

        Ok(ValidatedJson(typed))
    }
}
