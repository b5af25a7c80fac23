//! Profile routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::error::ApiError;
use crate::core::id::parse_id;
use crate::core::validation::ValidatedJson;
use crate::entities::{CreateProfile, Profile, ProfileWithUser, UpdateProfile};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route(
            "/profiles/{id}",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}

async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileWithUser>>, ApiError> {
    Ok(Json(state.profiles.find_all().await?))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileWithUser>, ApiError> {
    let id = parse_id(&id)?;
    state
        .profiles
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            resource: "Profile",
        })
}

async fn create_profile(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProfile>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let profile = state.profiles.create(payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProfile>,
) -> Result<Json<Profile>, ApiError> {
    let id = parse_id(&id)?;
    state
        .profiles
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            resource: "Profile",
        })
}

async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.profiles.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: "Profile",
        })
    }
}
