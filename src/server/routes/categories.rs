//! Category routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::core::error::ApiError;
use crate::core::id::parse_id;
use crate::core::validation::ValidatedJson;
use crate::entities::{Category, CategoryWithBlogs, CreateCategory, UpdateCategory};
use crate::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithBlogs>>, ApiError> {
    Ok(Json(state.categories.find_all().await?))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryWithBlogs>, ApiError> {
    let id = parse_id(&id)?;
    state
        .categories
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            resource: "Category",
        })
}

async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state.categories.create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateCategory>,
) -> Result<Json<Category>, ApiError> {
    let id = parse_id(&id)?;
    state
        .categories
        .update(id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound {
            resource: "Category",
        })
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.categories.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound {
            resource: "Category",
        })
    }
}
