//! Author entity model — the writing identity attached to a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Blog, User};
use crate::core::validation::validators::{max_length, string_length, uuid_string};
use crate::core::validation::{Schema, Validate};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub user_id: Uuid,
    pub pen_name: Option<String>,
    pub biography: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    pub fn new(user_id: Uuid, biography: String, pen_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            pen_name,
            biography,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateAuthor) {
        if let Some(biography) = update.biography {
            self.biography = biography;
        }
        if let Some(pen_name) = update.pen_name {
            self.pen_name = Some(pen_name);
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// An author with its user, as embedded in blog responses.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithUser {
    #[serde(flatten)]
    pub author: Author,
    pub user: User,
}

/// An author with all eagerly resolved relations.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithRelations {
    #[serde(flatten)]
    pub author: Author,
    pub user: User,
    pub blogs: Vec<Blog>,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    pub user_id: Uuid,
    pub biography: String,
    pub pen_name: Option<String>,
}

impl Validate for CreateAuthor {
    fn schema() -> Schema {
        Schema::new()
            .required("userId", uuid_string())
            .required("biography", string_length(1, 5000))
            .optional("penName", max_length(100))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    pub biography: Option<String>,
    pub pen_name: Option<String>,
}

impl Validate for UpdateAuthor {
    fn schema() -> Schema {
        Schema::new()
            .optional("biography", string_length(1, 5000))
            .optional("penName", max_length(100))
    }
}
