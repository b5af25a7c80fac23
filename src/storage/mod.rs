//! Storage backends
//!
//! Two implementations of the repository contracts in
//! [`crate::core::repository`]: a PostgreSQL backend via `sqlx::PgPool`
//! (production) and an in-memory backend (tests and development). Both
//! enforce the same uniqueness, foreign-key, and cascade rules and raise
//! the same constraint names, so code above the traits cannot tell them
//! apart.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use sqlx::PgPool;

use crate::core::repository::{
    AuthorRepo, BlogRepo, CategoryRepo, CommentRepo, ProfileRepo, UserRepo,
};

/// The bundle of repository handles passed into each service at
/// construction. Cloning is cheap (shared `Arc`s).
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepo>,
    pub profiles: Arc<dyn ProfileRepo>,
    pub authors: Arc<dyn AuthorRepo>,
    pub blogs: Arc<dyn BlogRepo>,
    pub categories: Arc<dyn CategoryRepo>,
    pub comments: Arc<dyn CommentRepo>,
}

impl Storage {
    /// Storage backed by a shared PostgreSQL connection pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(postgres::PgUserRepo::new(pool.clone())),
            profiles: Arc::new(postgres::PgProfileRepo::new(pool.clone())),
            authors: Arc::new(postgres::PgAuthorRepo::new(pool.clone())),
            blogs: Arc::new(postgres::PgBlogRepo::new(pool.clone())),
            categories: Arc::new(postgres::PgCategoryRepo::new(pool.clone())),
            comments: Arc::new(postgres::PgCommentRepo::new(pool)),
        }
    }

    /// Storage backed by a single in-process store.
    pub fn in_memory() -> Self {
        let db = in_memory::MemStore::new();
        Self {
            users: Arc::new(in_memory::MemUserRepo::new(db.clone())),
            profiles: Arc::new(in_memory::MemProfileRepo::new(db.clone())),
            authors: Arc::new(in_memory::MemAuthorRepo::new(db.clone())),
            blogs: Arc::new(in_memory::MemBlogRepo::new(db.clone())),
            categories: Arc::new(in_memory::MemCategoryRepo::new(db.clone())),
            comments: Arc::new(in_memory::MemCommentRepo::new(db)),
        }
    }
}
