//! In-memory storage backend for testing and development
//!
//! A single `RwLock`-guarded store shared by all repositories, so
//! cross-entity integrity rules (foreign keys, 1:1 uniqueness, cascades)
//! behave exactly like the PostgreSQL schema. Violations raise the same
//! constraint names the schema declares, which keeps service-level error
//! mapping backend-independent.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::StorageError;
use crate::core::repository::{
    AuthorRepo, BlogRepo, CategoryRepo, CommentRepo, ProfileRepo, StorageResult, UserRepo,
};
use crate::entities::{Author, Blog, Category, Comment, Profile, User};

#[derive(Default)]
struct MemDb {
    users: HashMap<Uuid, User>,
    profiles: HashMap<Uuid, Profile>,
    authors: HashMap<Uuid, Author>,
    blogs: HashMap<Uuid, Blog>,
    categories: HashMap<Uuid, Category>,
    comments: HashMap<Uuid, Comment>,
    blog_categories: HashSet<(Uuid, Uuid)>,
}

/// Shared handle to the in-process store.
#[derive(Clone, Default)]
pub struct MemStore {
    db: Arc<RwLock<MemDb>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, MemDb>> {
        self.db
            .read()
            .map_err(|e| StorageError::Backend(format!("failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, MemDb>> {
        self.db
            .write()
            .map_err(|e| StorageError::Backend(format!("failed to acquire write lock: {}", e)))
    }
}

fn unique(constraint: &str) -> StorageError {
    StorageError::UniqueViolation {
        constraint: constraint.to_string(),
    }
}

fn foreign_key(constraint: &str) -> StorageError {
    StorageError::ForeignKeyViolation {
        constraint: constraint.to_string(),
    }
}

fn sorted_by_created<T>(
    items: impl Iterator<Item = T>,
    key: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.sort_by_key(|item| key(item));
    out
}

// =============================================================================
// Users
// =============================================================================

#[derive(Clone)]
pub struct MemUserRepo {
    store: MemStore,
}

impl MemUserRepo {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepo for MemUserRepo {
    async fn list(&self) -> StorageResult<Vec<User>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(db.users.values().cloned(), |u| {
            u.created_at
        }))
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<User>> {
        Ok(self.store.read()?.users.get(&id).cloned())
    }

    async fn insert(&self, user: &User) -> StorageResult<()> {
        let mut db = self.store.write()?;
        if db.users.values().any(|u| u.email == user.email) {
            return Err(unique("users_email_key"));
        }
        db.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let mut db = self.store.write()?;
        if db
            .users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(unique("users_email_key"));
        }
        db.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let mut db = self.store.write()?;
        if db.users.remove(&id).is_none() {
            return Ok(false);
        }

        // Cascades mirror the schema: profiles, authors, and comments go
        // with the user; blogs of a cascaded author keep the row but lose
        // the reference.
        db.profiles.retain(|_, p| p.user_id != id);
        db.comments.retain(|_, c| c.user_id != id);

        let author_ids: Vec<Uuid> = db
            .authors
            .values()
            .filter(|a| a.user_id == id)
            .map(|a| a.id)
            .collect();
        for author_id in author_ids {
            db.authors.remove(&author_id);
            for blog in db.blogs.values_mut() {
                if blog.author_id == Some(author_id) {
                    blog.author_id = None;
                }
            }
        }

        Ok(true)
    }
}

// =============================================================================
// Profiles
// =============================================================================

#[derive(Clone)]
pub struct MemProfileRepo {
    store: MemStore,
}

impl MemProfileRepo {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepo for MemProfileRepo {
    async fn list(&self) -> StorageResult<Vec<Profile>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(db.profiles.values().cloned(), |p| {
            p.created_at
        }))
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Profile>> {
        Ok(self.store.read()?.profiles.get(&id).cloned())
    }

    async fn get_by_user(&self, user_id: Uuid) -> StorageResult<Option<Profile>> {
        let db = self.store.read()?;
        Ok(db
            .profiles
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, profile: &Profile) -> StorageResult<()> {
        let mut db = self.store.write()?;
        if !db.users.contains_key(&profile.user_id) {
            return Err(foreign_key("profiles_user_id_fkey"));
        }
        if db.profiles.values().any(|p| p.user_id == profile.user_id) {
            return Err(unique("profiles_user_id_key"));
        }
        db.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> StorageResult<()> {
        let mut db = self.store.write()?;
        db.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        Ok(self.store.write()?.profiles.remove(&id).is_some())
    }
}

// =============================================================================
// Authors
// =============================================================================

#[derive(Clone)]
pub struct MemAuthorRepo {
    store: MemStore,
}

impl MemAuthorRepo {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthorRepo for MemAuthorRepo {
    async fn list(&self) -> StorageResult<Vec<Author>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(db.authors.values().cloned(), |a| {
            a.created_at
        }))
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Author>> {
        Ok(self.store.read()?.authors.get(&id).cloned())
    }

    async fn get_by_user(&self, user_id: Uuid) -> StorageResult<Option<Author>> {
        let db = self.store.read()?;
        Ok(db.authors.values().find(|a| a.user_id == user_id).cloned())
    }

    async fn insert(&self, author: &Author) -> StorageResult<()> {
        let mut db = self.store.write()?;
        if !db.users.contains_key(&author.user_id) {
            return Err(foreign_key("authors_user_id_fkey"));
        }
        if db.authors.values().any(|a| a.user_id == author.user_id) {
            return Err(unique("authors_user_id_key"));
        }
        db.authors.insert(author.id, author.clone());
        Ok(())
    }

    async fn update(&self, author: &Author) -> StorageResult<()> {
        let mut db = self.store.write()?;
        db.authors.insert(author.id, author.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let mut db = self.store.write()?;
        if db.authors.remove(&id).is_none() {
            return Ok(false);
        }
        for blog in db.blogs.values_mut() {
            if blog.author_id == Some(id) {
                blog.author_id = None;
            }
        }
        Ok(true)
    }
}

// =============================================================================
// Blogs
// =============================================================================

#[derive(Clone)]
pub struct MemBlogRepo {
    store: MemStore,
}

impl MemBlogRepo {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }

    fn check_blog_refs(db: &MemDb, blog: &Blog, category_ids: &[Uuid]) -> StorageResult<()> {
        if let Some(author_id) = blog.author_id {
            if !db.authors.contains_key(&author_id) {
                return Err(foreign_key("blogs_author_id_fkey"));
            }
        }
        for category_id in category_ids {
            if !db.categories.contains_key(category_id) {
                return Err(foreign_key("blog_categories_category_id_fkey"));
            }
        }
        Ok(())
    }

    fn check_slug_unique(db: &MemDb, blog: &Blog) -> StorageResult<()> {
        if let Some(slug) = &blog.slug {
            if db
                .blogs
                .values()
                .any(|b| b.id != blog.id && b.slug.as_deref() == Some(slug))
            {
                return Err(unique("blogs_slug_key"));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BlogRepo for MemBlogRepo {
    async fn list(&self) -> StorageResult<Vec<Blog>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(db.blogs.values().cloned(), |b| {
            b.created_at
        }))
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Blog>> {
        Ok(self.store.read()?.blogs.get(&id).cloned())
    }

    async fn list_by_author(&self, author_id: Uuid) -> StorageResult<Vec<Blog>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(
            db.blogs
                .values()
                .filter(|b| b.author_id == Some(author_id))
                .cloned(),
            |b| b.created_at,
        ))
    }

    async fn insert(&self, blog: &Blog, category_ids: &[Uuid]) -> StorageResult<()> {
        let mut db = self.store.write()?;
        Self::check_slug_unique(&db, blog)?;
        Self::check_blog_refs(&db, blog, category_ids)?;

        db.blogs.insert(blog.id, blog.clone());
        for category_id in category_ids {
            db.blog_categories.insert((blog.id, *category_id));
        }
        Ok(())
    }

    async fn update(&self, blog: &Blog, category_ids: Option<&[Uuid]>) -> StorageResult<()> {
        let mut db = self.store.write()?;
        Self::check_slug_unique(&db, blog)?;
        Self::check_blog_refs(&db, blog, category_ids.unwrap_or_default())?;

        db.blogs.insert(blog.id, blog.clone());
        if let Some(category_ids) = category_ids {
            db.blog_categories.retain(|(blog_id, _)| *blog_id != blog.id);
            for category_id in category_ids {
                db.blog_categories.insert((blog.id, *category_id));
            }
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let mut db = self.store.write()?;
        if db.blogs.remove(&id).is_none() {
            return Ok(false);
        }
        db.comments.retain(|_, c| c.blog_id != id);
        db.blog_categories.retain(|(blog_id, _)| *blog_id != id);
        Ok(true)
    }

    async fn categories_of(&self, blog_id: Uuid) -> StorageResult<Vec<Category>> {
        let db = self.store.read()?;
        let mut categories: Vec<Category> = db
            .blog_categories
            .iter()
            .filter(|(b, _)| *b == blog_id)
            .filter_map(|(_, c)| db.categories.get(c).cloned())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_by_category(&self, category_id: Uuid) -> StorageResult<Vec<Blog>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(
            db.blog_categories
                .iter()
                .filter(|(_, c)| *c == category_id)
                .filter_map(|(b, _)| db.blogs.get(b).cloned()),
            |b| b.created_at,
        ))
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Clone)]
pub struct MemCategoryRepo {
    store: MemStore,
}

impl MemCategoryRepo {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepo for MemCategoryRepo {
    async fn list(&self) -> StorageResult<Vec<Category>> {
        let db = self.store.read()?;
        let mut categories: Vec<Category> = db.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Category>> {
        Ok(self.store.read()?.categories.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[Uuid]) -> StorageResult<Vec<Category>> {
        let db = self.store.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| db.categories.get(id).cloned())
            .collect())
    }

    async fn insert(&self, category: &Category) -> StorageResult<()> {
        let mut db = self.store.write()?;
        if db.categories.values().any(|c| c.name == category.name) {
            return Err(unique("categories_name_key"));
        }
        if db.categories.values().any(|c| c.slug == category.slug) {
            return Err(unique("categories_slug_key"));
        }
        db.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> StorageResult<()> {
        let mut db = self.store.write()?;
        if db
            .categories
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(unique("categories_name_key"));
        }
        if db
            .categories
            .values()
            .any(|c| c.id != category.id && c.slug == category.slug)
        {
            return Err(unique("categories_slug_key"));
        }
        db.categories.insert(category.id, category.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        let mut db = self.store.write()?;
        if db.categories.remove(&id).is_none() {
            return Ok(false);
        }
        db.blog_categories.retain(|(_, category_id)| *category_id != id);
        Ok(true)
    }
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Clone)]
pub struct MemCommentRepo {
    store: MemStore,
}

impl MemCommentRepo {
    pub fn new(store: MemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepo for MemCommentRepo {
    async fn list(&self) -> StorageResult<Vec<Comment>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(db.comments.values().cloned(), |c| {
            c.created_at
        }))
    }

    async fn get(&self, id: Uuid) -> StorageResult<Option<Comment>> {
        Ok(self.store.read()?.comments.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> StorageResult<Vec<Comment>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(
            db.comments
                .values()
                .filter(|c| c.user_id == user_id)
                .cloned(),
            |c| c.created_at,
        ))
    }

    async fn list_by_blog(&self, blog_id: Uuid) -> StorageResult<Vec<Comment>> {
        let db = self.store.read()?;
        Ok(sorted_by_created(
            db.comments
                .values()
                .filter(|c| c.blog_id == blog_id)
                .cloned(),
            |c| c.created_at,
        ))
    }

    async fn insert(&self, comment: &Comment) -> StorageResult<()> {
        let mut db = self.store.write()?;
        if !db.users.contains_key(&comment.user_id) {
            return Err(foreign_key("comments_user_id_fkey"));
        }
        if !db.blogs.contains_key(&comment.blog_id) {
            return Err(foreign_key("comments_blog_id_fkey"));
        }
        db.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> StorageResult<()> {
        let mut db = self.store.write()?;
        db.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<bool> {
        Ok(self.store.write()?.comments.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    fn user() -> User {
        User::new(
            format!("{}@test.io", Uuid::new_v4()),
            "secret1".to_string(),
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let storage = Storage::in_memory();
        let first = User::new("dup@test.io".to_string(), "secret1".to_string(), None, None);
        let second = User::new("dup@test.io".to_string(), "secret2".to_string(), None, None);

        storage.users.insert(&first).await.unwrap();
        let err = storage.users.insert(&second).await.unwrap_err();
        assert!(matches!(err, StorageError::UniqueViolation { constraint } if constraint == "users_email_key"));
    }

    #[tokio::test]
    async fn test_profile_requires_user_and_is_unique_per_user() {
        let storage = Storage::in_memory();

        let orphan = Profile::new(Uuid::new_v4(), None, None, None);
        assert!(matches!(
            storage.profiles.insert(&orphan).await.unwrap_err(),
            StorageError::ForeignKeyViolation { .. }
        ));

        let user = user();
        storage.users.insert(&user).await.unwrap();

        let profile = Profile::new(user.id, Some("Ada".to_string()), None, None);
        storage.profiles.insert(&profile).await.unwrap();

        let second = Profile::new(user.id, None, None, None);
        assert!(matches!(
            storage.profiles.insert(&second).await.unwrap_err(),
            StorageError::UniqueViolation { constraint } if constraint == "profiles_user_id_key"
        ));
    }

    #[tokio::test]
    async fn test_author_delete_nulls_blog_reference() {
        let storage = Storage::in_memory();
        let user = user();
        storage.users.insert(&user).await.unwrap();

        let author = Author::new(user.id, "Writes things".to_string(), None);
        storage.authors.insert(&author).await.unwrap();

        let blog = Blog::new(
            "Post".to_string(),
            "Body".to_string(),
            None,
            None,
            false,
            Some(author.id),
        );
        storage.blogs.insert(&blog, &[]).await.unwrap();

        assert!(storage.authors.delete(author.id).await.unwrap());
        let reloaded = storage.blogs.get(blog.id).await.unwrap().unwrap();
        assert_eq!(reloaded.author_id, None);
    }

    #[tokio::test]
    async fn test_user_delete_cascades() {
        let storage = Storage::in_memory();
        let user = user();
        storage.users.insert(&user).await.unwrap();

        let profile = Profile::new(user.id, None, None, None);
        storage.profiles.insert(&profile).await.unwrap();

        let author = Author::new(user.id, "Bio".to_string(), None);
        storage.authors.insert(&author).await.unwrap();

        let blog = Blog::new(
            "Post".to_string(),
            "Body".to_string(),
            None,
            None,
            false,
            Some(author.id),
        );
        storage.blogs.insert(&blog, &[]).await.unwrap();

        let comment = Comment::new(user.id, blog.id, "Nice".to_string(), false);
        storage.comments.insert(&comment).await.unwrap();

        assert!(storage.users.delete(user.id).await.unwrap());

        assert!(storage.profiles.get(profile.id).await.unwrap().is_none());
        assert!(storage.authors.get(author.id).await.unwrap().is_none());
        assert!(storage.comments.get(comment.id).await.unwrap().is_none());
        // The blog survives with its author reference cleared.
        let reloaded = storage.blogs.get(blog.id).await.unwrap().unwrap();
        assert_eq!(reloaded.author_id, None);
    }

    #[tokio::test]
    async fn test_blog_category_replace_and_clear() {
        let storage = Storage::in_memory();

        let rust = Category::new("Rust".to_string(), "rust".to_string(), None);
        let web = Category::new("Web".to_string(), "web".to_string(), None);
        storage.categories.insert(&rust).await.unwrap();
        storage.categories.insert(&web).await.unwrap();

        let blog = Blog::new(
            "Post".to_string(),
            "Body".to_string(),
            None,
            None,
            false,
            None,
        );
        storage.blogs.insert(&blog, &[rust.id]).await.unwrap();
        assert_eq!(storage.blogs.categories_of(blog.id).await.unwrap().len(), 1);

        // None leaves associations untouched
        storage.blogs.update(&blog, None).await.unwrap();
        assert_eq!(storage.blogs.categories_of(blog.id).await.unwrap().len(), 1);

        // Replace wholesale
        storage
            .blogs
            .update(&blog, Some(&[rust.id, web.id]))
            .await
            .unwrap();
        assert_eq!(storage.blogs.categories_of(blog.id).await.unwrap().len(), 2);

        // Empty list clears
        storage.blogs.update(&blog, Some(&[])).await.unwrap();
        assert!(storage.blogs.categories_of(blog.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blog_unknown_category_rejected_and_nothing_persisted() {
        let storage = Storage::in_memory();
        let blog = Blog::new(
            "Post".to_string(),
            "Body".to_string(),
            None,
            None,
            false,
            None,
        );

        let err = storage
            .blogs
            .insert(&blog, &[Uuid::new_v4()])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::ForeignKeyViolation { .. }));
        assert!(storage.blogs.get(blog.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blog_delete_cascades_comments_and_links() {
        let storage = Storage::in_memory();
        let user = user();
        storage.users.insert(&user).await.unwrap();

        let cat = Category::new("Rust".to_string(), "rust".to_string(), None);
        storage.categories.insert(&cat).await.unwrap();

        let blog = Blog::new(
            "Post".to_string(),
            "Body".to_string(),
            None,
            None,
            false,
            None,
        );
        storage.blogs.insert(&blog, &[cat.id]).await.unwrap();

        let comment = Comment::new(user.id, blog.id, "Nice".to_string(), false);
        storage.comments.insert(&comment).await.unwrap();

        assert!(storage.blogs.delete(blog.id).await.unwrap());
        assert!(storage.comments.get(comment.id).await.unwrap().is_none());
        assert!(
            storage
                .blogs
                .list_by_category(cat.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_category_name_and_slug_unique() {
        let storage = Storage::in_memory();
        let cat = Category::new("Rust".to_string(), "rust".to_string(), None);
        storage.categories.insert(&cat).await.unwrap();

        let same_name = Category::new("Rust".to_string(), "rust-lang".to_string(), None);
        assert!(matches!(
            storage.categories.insert(&same_name).await.unwrap_err(),
            StorageError::UniqueViolation { constraint } if constraint == "categories_name_key"
        ));

        let same_slug = Category::new("Rust Lang".to_string(), "rust".to_string(), None);
        assert!(matches!(
            storage.categories.insert(&same_slug).await.unwrap_err(),
            StorageError::UniqueViolation { constraint } if constraint == "categories_slug_key"
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let storage = Storage::in_memory();
        assert!(!storage.users.delete(Uuid::new_v4()).await.unwrap());
        assert!(!storage.blogs.delete(Uuid::new_v4()).await.unwrap());
    }
}
