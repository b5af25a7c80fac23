//! # inkpost
//!
//! REST backend for a multi-author blogging platform: Users, Profiles,
//! Authors, Blogs, Categories, and Comments over PostgreSQL.
//!
//! ## Architecture
//!
//! Control flow per request is strictly linear:
//!
//! ```text
//! Router → Validate → Service → Repository → Database → (reverse)
//! ```
//!
//! - [`entities`]: the six record types, payloads, and relation shapes
//! - [`core`]: error taxonomy, id parsing, validation, repository contracts
//! - [`storage`]: PostgreSQL and in-memory repository implementations
//! - [`services`]: per-entity business logic and relation assembly
//! - [`server`]: axum routes and the application state
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use inkpost::prelude::*;
//!
//! let pool = storage::postgres::connect(&database_url, 10).await?;
//! storage::postgres::run_migrations(&pool).await?;
//! let app = server::app(Storage::postgres(pool));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::core::error::{ApiError, ApiResult, FieldError, StorageError};
    pub use crate::core::id::parse_id;
    pub use crate::core::validation::{Schema, Validate, ValidatedJson};
    pub use crate::entities::*;
    pub use crate::server::{AppState, app};
    pub use crate::services::{
        AuthorService, BlogService, CategoryService, CommentService, ProfileService, UserService,
    };
    pub use crate::storage::Storage;
}
