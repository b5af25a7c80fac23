//! Blog routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::error::ApiError;
use crate::core::id::parse_id;
use crate::core::validation::ValidatedJson;
use crate::entities::{Blog, BlogWithRelations, CreateBlog, UpdateBlog};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route(
            "/blogs/{id}",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
}

async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogWithRelations>>, ApiError> {
    Ok(Json(state.blogs.find_all().await?))
}

async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogWithRelations>, ApiError> {
    let id = parse_id(&id)?;
    state
        .blogs
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "Blog" })
}

async fn create_blog(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBlog>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    let blog = state.blogs.create(payload).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateBlog>,
) -> Result<Json<Blog>, ApiError> {
    let id = parse_id(&id)?;
    state
        .blogs
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "Blog" })
}

async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.blogs.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: "Blog" })
    }
}
