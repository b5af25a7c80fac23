//! Author routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::error::ApiError;
use crate::core::id::parse_id;
use crate::core::validation::ValidatedJson;
use crate::entities::{Author, AuthorWithRelations, CreateAuthor, UpdateAuthor};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/{id}",
            get(get_author).put(update_author).delete(delete_author),
        )
}

async fn list_authors(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorWithRelations>>, ApiError> {
    Ok(Json(state.authors.find_all().await?))
}

async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuthorWithRelations>, ApiError> {
    let id = parse_id(&id)?;
    state
        .authors
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "Author" })
}

async fn create_author(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAuthor>,
) -> Result<(StatusCode, Json<Author>), ApiError> {
    let author = state.authors.create(payload).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateAuthor>,
) -> Result<Json<Author>, ApiError> {
    let id = parse_id(&id)?;
    state
        .authors
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "Author" })
}

async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.authors.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: "Author" })
    }
}
