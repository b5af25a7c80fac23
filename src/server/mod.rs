//! HTTP server
//!
//! Builds the axum router over the service layer: per-resource route
//! modules, a liveness probe, and tower-http trace/CORS layers. Control
//! flow per request is strictly linear: route → validate → service →
//! repository → response.

pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{
    AuthorService, BlogService, CategoryService, CommentService, ProfileService, UserService,
};
use crate::storage::Storage;

/// Shared handler state: one service per entity over the same storage.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub profiles: ProfileService,
    pub authors: AuthorService,
    pub blogs: BlogService,
    pub categories: CategoryService,
    pub comments: CommentService,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        Self {
            users: UserService::new(storage.clone()),
            profiles: ProfileService::new(storage.clone()),
            authors: AuthorService::new(storage.clone()),
            blogs: BlogService::new(storage.clone()),
            categories: CategoryService::new(storage.clone()),
            comments: CommentService::new(storage),
        }
    }
}

/// Build the application router over the given storage backend.
pub fn app(storage: Storage) -> Router {
    let state = AppState::new(storage);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::users::router())
        .merge(routes::profiles::router())
        .merge(routes::authors::router())
        .merge(routes::blogs::router())
        .merge(routes::categories::router())
        .merge(routes::comments::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
