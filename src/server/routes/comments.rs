//! Comment routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::error::ApiError;
use crate::core::id::parse_id;
use crate::core::validation::ValidatedJson;
use crate::entities::{Comment, CommentWithRelations, CreateComment, UpdateComment};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .route(
            "/comments/{id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}

async fn list_comments(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommentWithRelations>>, ApiError> {
    Ok(Json(state.comments.find_all().await?))
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CommentWithRelations>, ApiError> {
    let id = parse_id(&id)?;
    state
        .comments
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            resource: "Comment",
        })
}

async fn create_comment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state.comments.create(payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateComment>,
) -> Result<Json<Comment>, ApiError> {
    let id = parse_id(&id)?;
    state
        .comments
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            resource: "Comment",
        })
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.comments.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: "Comment",
        })
    }
}
