//! Comment entity model — belongs to both a user and a blog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Blog, User};
use crate::core::validation::validators::{boolean, string_length, uuid_string};
use crate::core::validation::{Schema, Validate};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub blog_id: Uuid,
    pub content: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(user_id: Uuid, blog_id: Uuid, content: String, is_approved: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            blog_id,
            content,
            is_approved,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateComment) {
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(is_approved) = update.is_approved {
            self.is_approved = is_approved;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A comment with its user and blog.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithRelations {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: User,
    pub blog: Blog,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub user_id: Uuid,
    pub blog_id: Uuid,
    pub content: String,
    pub is_approved: Option<bool>,
}

impl Validate for CreateComment {
    fn schema() -> Schema {
        Schema::new()
            .required("content", string_length(1, 2000))
            .required("userId", uuid_string())
            .required("blogId", uuid_string())
            .optional("isApproved", boolean())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComment {
    pub content: Option<String>,
    pub is_approved: Option<bool>,
}

impl Validate for UpdateComment {
    fn schema() -> Schema {
        Schema::new()
            .optional("content", string_length(1, 2000))
            .optional("isApproved", boolean())
    }
}
