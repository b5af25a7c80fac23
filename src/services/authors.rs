//! Author service — one author identity per user.

use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::entities::{Author, AuthorWithRelations, CreateAuthor, UpdateAuthor};
use crate::storage::Storage;

#[derive(Clone)]
pub struct AuthorService {
    storage: Storage,
}

impl AuthorService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<AuthorWithRelations>> {
        let authors = self.storage.authors.list().await?;
        let mut out = Vec::with_capacity(authors.len());
        for author in authors {
            out.push(self.with_relations(author).await?);
        }
        Ok(out)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<AuthorWithRelations>> {
        match self.storage.authors.get(id).await? {
            Some(author) => Ok(Some(self.with_relations(author).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, payload: CreateAuthor) -> ApiResult<Author> {
        if self.storage.users.get(payload.user_id).await?.is_none() {
            return Err(ApiError::ReferenceNotFound {
                message: "Invalid user ID provided".to_string(),
            });
        }
        if self
            .storage
            .authors
            .get_by_user(payload.user_id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict {
                message: "An author with this user already exists".to_string(),
            });
        }

        let author = Author::new(payload.user_id, payload.biography, payload.pen_name);
        match self.storage.authors.insert(&author).await {
            Ok(()) => Ok(author),
            Err(StorageError::UniqueViolation { .. }) => Err(ApiError::Conflict {
                message: "An author with this user already exists".to_string(),
            }),
            Err(StorageError::ForeignKeyViolation { .. }) => Err(ApiError::ReferenceNotFound {
                message: "Invalid user ID provided".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(&self, id: Uuid, payload: UpdateAuthor) -> ApiResult<Option<Author>> {
        let Some(mut author) = self.storage.authors.get(id).await? else {
            return Ok(None);
        };
        author.apply(payload);
        self.storage.authors.update(&author).await?;
        Ok(Some(author))
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.storage.authors.delete(id).await?)
    }

    async fn with_relations(&self, author: Author) -> ApiResult<AuthorWithRelations> {
        let user = self
            .storage
            .users
            .get(author.user_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!("author {} references missing user", author.id))
            })?;
        let blogs = self.storage.blogs.list_by_author(author.id).await?;
        Ok(AuthorWithRelations {
            author,
            user,
            blogs,
        })
    }
}
