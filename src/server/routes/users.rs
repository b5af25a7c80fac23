//! User routes, including the cross-resource profile lookup

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::error::ApiError;
use crate::core::id::parse_id;
use crate::core::validation::ValidatedJson;
use crate::entities::{CreateUser, ProfileWithUser, UpdateUser, User, UserWithRelations};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/{id}/profile", get(get_user_profile))
}

async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithRelations>>, ApiError> {
    Ok(Json(state.users.find_all().await?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserWithRelations>, ApiError> {
    let id = parse_id(&id)?;
    state
        .users
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "User" })
}

async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.users.create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    let id = parse_id(&id)?;
    state
        .users
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "User" })
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.users.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: "User" })
    }
}

async fn get_user_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileWithUser>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.profiles.find_for_user(id).await?))
}
