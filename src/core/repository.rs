//! Repository contracts
//!
//! Per-entity data-access traits the services program against. Backends
//! (PostgreSQL, in-memory) implement the same contracts, including the
//! uniqueness and referential-integrity rules: violations surface as
//! [`StorageError::UniqueViolation`] / [`StorageError::ForeignKeyViolation`]
//! carrying the violated constraint's name.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::StorageError;
use crate::entities::{Author, Blog, Category, Comment, Profile, User};

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn list(&self) -> StorageResult<Vec<User>>;
    async fn get(&self, id: Uuid) -> StorageResult<Option<User>>;
    async fn insert(&self, user: &User) -> StorageResult<()>;
    async fn update(&self, user: &User) -> StorageResult<()>;
    /// Delete by id, cascading to the user's profile, author, and comments.
    /// Returns whether a row was actually removed.
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;
}

#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn list(&self) -> StorageResult<Vec<Profile>>;
    async fn get(&self, id: Uuid) -> StorageResult<Option<Profile>>;
    async fn get_by_user(&self, user_id: Uuid) -> StorageResult<Option<Profile>>;
    async fn insert(&self, profile: &Profile) -> StorageResult<()>;
    async fn update(&self, profile: &Profile) -> StorageResult<()>;
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;
}

#[async_trait]
pub trait AuthorRepo: Send + Sync {
    async fn list(&self) -> StorageResult<Vec<Author>>;
    async fn get(&self, id: Uuid) -> StorageResult<Option<Author>>;
    async fn get_by_user(&self, user_id: Uuid) -> StorageResult<Option<Author>>;
    async fn insert(&self, author: &Author) -> StorageResult<()>;
    async fn update(&self, author: &Author) -> StorageResult<()>;
    /// Delete by id; blogs referencing the author get `author_id = NULL`.
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;
}

#[async_trait]
pub trait BlogRepo: Send + Sync {
    async fn list(&self) -> StorageResult<Vec<Blog>>;
    async fn get(&self, id: Uuid) -> StorageResult<Option<Blog>>;
    async fn list_by_author(&self, author_id: Uuid) -> StorageResult<Vec<Blog>>;
    /// Insert the blog row and its category associations atomically.
    async fn insert(&self, blog: &Blog, category_ids: &[Uuid]) -> StorageResult<()>;
    /// Update the blog row; when `category_ids` is `Some`, replace the
    /// category associations wholesale in the same unit of work (an empty
    /// list clears them).
    async fn update(&self, blog: &Blog, category_ids: Option<&[Uuid]>) -> StorageResult<()>;
    /// Delete by id, cascading to the blog's comments and associations.
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;
    /// Categories attached to a blog, ordered by name.
    async fn categories_of(&self, blog_id: Uuid) -> StorageResult<Vec<Category>>;
    /// Blogs a category is attached to.
    async fn list_by_category(&self, category_id: Uuid) -> StorageResult<Vec<Blog>>;
}

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    async fn list(&self) -> StorageResult<Vec<Category>>;
    async fn get(&self, id: Uuid) -> StorageResult<Option<Category>>;
    async fn get_many(&self, ids: &[Uuid]) -> StorageResult<Vec<Category>>;
    async fn insert(&self, category: &Category) -> StorageResult<()>;
    async fn update(&self, category: &Category) -> StorageResult<()>;
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;
}

#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn list(&self) -> StorageResult<Vec<Comment>>;
    async fn get(&self, id: Uuid) -> StorageResult<Option<Comment>>;
    async fn list_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Comment>>;
    async fn list_by_blog(&self, blog_id: Uuid) -> StorageResult<Vec<Comment>>;
    async fn insert(&self, comment: &Comment) -> StorageResult<()>;
    async fn update(&self, comment: &Comment) -> StorageResult<()>;
    async fn delete(&self, id: Uuid) -> StorageResult<bool>;
}
