//! Comment service — every comment belongs to a user and a blog.

use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::entities::{Comment, CommentWithRelations, CreateComment, UpdateComment};
use crate::storage::Storage;

#[derive(Clone)]
pub struct CommentService {
    storage: Storage,
}

impl CommentService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<CommentWithRelations>> {
        let comments = self.storage.comments.list().await?;
        let mut out = Vec::with_capacity(comments.len());
        for comment in comments {
            out.push(self.with_relations(comment).await?);
        }
        Ok(out)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<CommentWithRelations>> {
        match self.storage.comments.get(id).await? {
            Some(comment) => Ok(Some(self.with_relations(comment).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, payload: CreateComment) -> ApiResult<Comment> {
        let user_exists = self.storage.users.get(payload.user_id).await?.is_some();
        let blog_exists = self.storage.blogs.get(payload.blog_id).await?.is_some();
        if !user_exists || !blog_exists {
            return Err(ApiError::ReferenceNotFound {
                message: "Invalid user ID or blog ID provided".to_string(),
            });
        }

        let comment = Comment::new(
            payload.user_id,
            payload.blog_id,
            payload.content,
            payload.is_approved.unwrap_or(false),
        );
        match self.storage.comments.insert(&comment).await {
            Ok(()) => Ok(comment),
            Err(StorageError::ForeignKeyViolation { .. }) => Err(ApiError::ReferenceNotFound {
                message: "Invalid user ID or blog ID provided".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(&self, id: Uuid, payload: UpdateComment) -> ApiResult<Option<Comment>> {
        let Some(mut comment) = self.storage.comments.get(id).await? else {
            return Ok(None);
        };
        comment.apply(payload);
        self.storage.comments.update(&comment).await?;
        Ok(Some(comment))
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.storage.comments.delete(id).await?)
    }

    async fn with_relations(&self, comment: Comment) -> ApiResult<CommentWithRelations> {
        let user = self
            .storage
            .users
            .get(comment.user_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!("comment {} references missing user", comment.id))
            })?;
        let blog = self
            .storage
            .blogs
            .get(comment.blog_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!("comment {} references missing blog", comment.id))
            })?;
        Ok(CommentWithRelations {
            comment,
            user,
            blog,
        })
    }
}
