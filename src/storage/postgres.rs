//! PostgreSQL storage backend using sqlx.
//!
//! One repository struct per entity, all sharing the process-wide
//! `PgPool`. Uniqueness and referential integrity live in the schema
//! (`migrations/`); this module's job is to translate PostgreSQL error
//! codes — `23505` unique violation, `23503` foreign-key violation — into
//! typed [`StorageError`]s carrying the violated constraint's name.
//! Composite writes (blog row + category associations) run in a single
//! transaction.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::core::error::StorageError;
use crate::core::repository::{
    AuthorRepo, BlogRepo, CategoryRepo, CommentRepo, ProfileRepo, StorageResult, UserRepo,
};
use crate::entities::{Author, Blog, Category, Comment, Profile, User};

/// Open the shared connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Apply pending migrations from `./migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Translate a sqlx error into a typed storage error.
fn map_err(err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            match code.as_ref() {
                "23505" => return StorageError::UniqueViolation { constraint },
                "23503" => return StorageError::ForeignKeyViolation { constraint },
                _ => {}
            }
        }
    }
    StorageError::Database(err)
}

// =============================================================================
// Users
// =============================================================================

#[derive(Clone)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, first_name, last_name, email, password, created_at, updated_at";

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn list(&self) -> StorageResult<Vec<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn insert(&self, user: &User) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, password, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        sqlx::query(
            "UPDATE users SET first_name = $2, last_name = $3, email = $4, password = $5, \
             updated_at = $6 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Profiles
// =============================================================================

#[derive(Clone)]
pub struct PgProfileRepo {
    pool: PgPool,
}

impl PgProfileRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "id, user_id, full_name, bio, avatar_url, created_at, updated_at";

#[async_trait]
impl ProfileRepo for PgProfileRepo {
    async fn list(&self) -> StorageResult<Vec<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get_by_user(&self, user_id: Uuid) -> StorageResult<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn insert(&self, profile: &Profile) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO profiles (id, user_id, full_name, bio, avatar_url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.full_name)
        .bind(&profile.bio)
        .bind(&profile.avatar_url)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> StorageResult<()> {
        sqlx::query(
            "UPDATE profiles SET full_name = $2, bio = $3, avatar_url = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(profile.id)
        .bind(&profile.full_name)
        .bind(&profile.bio)
        .bind(&profile.avatar_url)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Authors
// =============================================================================

#[derive(Clone)]
pub struct PgAuthorRepo {
    pool: PgPool,
}

impl PgAuthorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const AUTHOR_COLUMNS: &str = "id, user_id, pen_name, biography, created_at, updated_at";

#[async_trait]
impl AuthorRepo for PgAuthorRepo {
    async fn list(&self) -> StorageResult<Vec<Author>> {
        sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Author>> {
        sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get_by_user(&self, user_id: Uuid) -> StorageResult<Option<Author>> {
        sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn insert(&self, author: &Author) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO authors (id, user_id, pen_name, biography, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(author.id)
        .bind(author.user_id)
        .bind(&author.pen_name)
        .bind(&author.biography)
        .bind(author.created_at)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, author: &Author) -> StorageResult<()> {
        sqlx::query(
            "UPDATE authors SET pen_name = $2, biography = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(author.id)
        .bind(&author.pen_name)
        .bind(&author.biography)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Blogs
// =============================================================================

#[derive(Clone)]
pub struct PgBlogRepo {
    pool: PgPool,
}

impl PgBlogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BLOG_COLUMNS: &str =
    "id, author_id, slug, title, content, published, excerpt, created_at, updated_at";

#[async_trait]
impl BlogRepo for PgBlogRepo {
    async fn list(&self) -> StorageResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err)
    }

    async fn list_by_author(&self, author_id: Uuid) -> StorageResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE author_id = $1 ORDER BY created_at"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn insert(&self, blog: &Blog, category_ids: &[Uuid]) -> StorageResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;

        sqlx::query(
            "INSERT INTO blogs (id, author_id, slug, title, content, published, excerpt, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(blog.id)
        .bind(blog.author_id)
        .bind(&blog.slug)
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(blog.published)
        .bind(&blog.excerpt)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_err)?;

        for category_id in category_ids {
            sqlx::query("INSERT INTO blog_categories (blog_id, category_id) VALUES ($1, $2)")
                .bind(blog.id)
                .bind(category_id)
                .execute(&mut *tx)
                .await
                .map_err(map_err)?;
        }

        tx.commit().await.map_err(map_err)
    }

    async fn update(&self, blog: &Blog, category_ids: Option<&[Uuid]>) -> StorageResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_err)?;

        sqlx::query(
            "UPDATE blogs SET author_id = $2, slug = $3, title = $4, content = $5, \
             published = $6, excerpt = $7, updated_at = $8 WHERE id = $1",
        )
        .bind(blog.id)
        .bind(blog.author_id)
        .bind(&blog.slug)
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(blog.published)
        .bind(&blog.excerpt)
        .bind(blog.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_err)?;

        if let Some(category_ids) = category_ids {
            sqlx::query("DELETE FROM blog_categories WHERE blog_id = $1")
                .bind(blog.id)
                .execute(&mut *tx)
                .await
                .map_err(map_err)?;

            for category_id in category_ids {
                sqlx::query("INSERT INTO blog_categories (blog_id, category_id) VALUES ($1, $2)")
                    .bind(blog.id)
                    .bind(category_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_err)?;
            }
        }

        tx.commit().await.map_err(map_err)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn categories_of(&self, blog_id: Uuid) -> StorageResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT c.id, c.name, c.slug, c.description, c.created_at, c.updated_at \
             FROM categories c \
             JOIN blog_categories bc ON bc.category_id = c.id \
             WHERE bc.blog_id = $1 ORDER BY c.name",
        )
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn list_by_category(&self, category_id: Uuid) -> StorageResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>(
            "SELECT b.id, b.author_id, b.slug, b.title, b.content, b.published, b.excerpt, \
             b.created_at, b.updated_at \
             FROM blogs b \
             JOIN blog_categories bc ON bc.blog_id = b.id \
             WHERE bc.category_id = $1 ORDER BY b.created_at",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Clone)]
pub struct PgCategoryRepo {
    pool: PgPool,
}

impl PgCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CATEGORY_COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

#[async_trait]
impl CategoryRepo for PgCategoryRepo {
    async fn list(&self) -> StorageResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get_many(&self, ids: &[Uuid]) -> StorageResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ANY($1)"
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn insert(&self, category: &Category) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO categories (id, name, slug, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, category: &Category) -> StorageResult<()> {
        sqlx::query(
            "UPDATE categories SET name = $2, slug = $3, description = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Clone)]
pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COMMENT_COLUMNS: &str = "id, user_id, blog_id, content, is_approved, created_at, updated_at";

#[async_trait]
impl CommentRepo for PgCommentRepo {
    async fn list(&self) -> StorageResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn list_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn list_by_blog(&self, blog_id: Uuid) -> StorageResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE blog_id = $1 ORDER BY created_at"
        ))
        .bind(blog_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)
    }

    async fn insert(&self, comment: &Comment) -> StorageResult<()> {
        sqlx::query(
            "INSERT INTO comments (id, user_id, blog_id, content, is_approved, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(comment.id)
        .bind(comment.user_id)
        .bind(comment.blog_id)
        .bind(&comment.content)
        .bind(comment.is_approved)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> StorageResult<()> {
        sqlx::query(
            "UPDATE comments SET content = $2, is_approved = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.is_approved)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;
        Ok(result.rows_affected() > 0)
    }
}
