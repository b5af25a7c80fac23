//! Blog service
//!
//! Owns the category-association semantics: a present `category_ids`
//! replaces the associations wholesale (empty list clears them), an
//! absent field leaves them untouched. The row write and the association
//! replacement happen in one storage-level unit of work.

use std::collections::HashSet;

use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::entities::{AuthorWithUser, Blog, BlogWithRelations, CreateBlog, UpdateBlog};
use crate::storage::Storage;

#[derive(Clone)]
pub struct BlogService {
    storage: Storage,
}

impl BlogService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<BlogWithRelations>> {
        let blogs = self.storage.blogs.list().await?;
        let mut out = Vec::with_capacity(blogs.len());
        for blog in blogs {
            out.push(self.with_relations(blog).await?);
        }
        Ok(out)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<BlogWithRelations>> {
        match self.storage.blogs.get(id).await? {
            Some(blog) => Ok(Some(self.with_relations(blog).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, payload: CreateBlog) -> ApiResult<Blog> {
        let CreateBlog {
            title,
            content,
            slug,
            excerpt,
            published,
            author_id,
            category_ids,
        } = payload;
        let category_ids = dedupe(category_ids.unwrap_or_default());

        if let Some(author_id) = author_id {
            self.check_author(author_id).await?;
        }
        self.check_categories(&category_ids).await?;

        let blog = Blog::new(
            title,
            content,
            slug,
            excerpt,
            published.unwrap_or(false),
            author_id,
        );
        match self.storage.blogs.insert(&blog, &category_ids).await {
            Ok(()) => Ok(blog),
            Err(e) => Err(map_write_error(e)),
        }
    }

    pub async fn update(&self, id: Uuid, payload: UpdateBlog) -> ApiResult<Option<Blog>> {
        let Some(mut blog) = self.storage.blogs.get(id).await? else {
            return Ok(None);
        };

        let mut payload = payload;
        let category_ids = payload.category_ids.take().map(dedupe);

        if let Some(author_id) = payload.author_id {
            self.check_author(author_id).await?;
        }
        if let Some(category_ids) = &category_ids {
            self.check_categories(category_ids).await?;
        }

        blog.apply(payload);
        match self
            .storage
            .blogs
            .update(&blog, category_ids.as_deref())
            .await
        {
            Ok(()) => Ok(Some(blog)),
            Err(e) => Err(map_write_error(e)),
        }
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.storage.blogs.delete(id).await?)
    }

    async fn check_author(&self, author_id: Uuid) -> ApiResult<()> {
        if self.storage.authors.get(author_id).await?.is_none() {
            return Err(ApiError::ReferenceNotFound {
                message: "Invalid author ID provided".to_string(),
            });
        }
        Ok(())
    }

    async fn check_categories(&self, category_ids: &[Uuid]) -> ApiResult<()> {
        if category_ids.is_empty() {
            return Ok(());
        }
        let found = self.storage.categories.get_many(category_ids).await?;
        if found.len() != category_ids.len() {
            return Err(ApiError::ReferenceNotFound {
                message: "Invalid category IDs provided".to_string(),
            });
        }
        Ok(())
    }

    async fn with_relations(&self, blog: Blog) -> ApiResult<BlogWithRelations> {
        let author = match blog.author_id {
            Some(author_id) => match self.storage.authors.get(author_id).await? {
                Some(author) => {
                    let user = self
                        .storage
                        .users
                        .get(author.user_id)
                        .await?
                        .ok_or_else(|| {
                            ApiError::Internal(format!(
                                "author {} references missing user",
                                author.id
                            ))
                        })?;
                    Some(AuthorWithUser { author, user })
                }
                None => None,
            },
            None => None,
        };
        let comments = self.storage.comments.list_by_blog(blog.id).await?;
        let categories = self.storage.blogs.categories_of(blog.id).await?;
        Ok(BlogWithRelations {
            blog,
            author,
            comments,
            categories,
        })
    }
}

fn dedupe(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

fn map_write_error(err: StorageError) -> ApiError {
    match err {
        StorageError::UniqueViolation { .. } => ApiError::Conflict {
            message: "A blog with this slug already exists".to_string(),
        },
        StorageError::ForeignKeyViolation { constraint } if constraint.contains("category") => {
            ApiError::ReferenceNotFound {
                message: "Invalid category IDs provided".to_string(),
            }
        }
        StorageError::ForeignKeyViolation { .. } => ApiError::ReferenceNotFound {
            message: "Invalid author ID provided".to_string(),
        },
        e => e.into(),
    }
}
