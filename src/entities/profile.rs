//! Profile entity model — at most one per user, owning the foreign key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::User;
use crate::core::validation::validators::{max_length, url, uuid_string};
use crate::core::validation::{Schema, Validate};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        user_id: Uuid,
        full_name: Option<String>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            full_name,
            bio,
            avatar_url,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateProfile) {
        if let Some(full_name) = update.full_name {
            self.full_name = Some(full_name);
        }
        if let Some(bio) = update.bio {
            self.bio = Some(bio);
        }
        if let Some(avatar_url) = update.avatar_url {
            self.avatar_url = Some(avatar_url);
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A profile with its owning user.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileWithUser {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: User,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl Validate for CreateProfile {
    fn schema() -> Schema {
        Schema::new()
            .required("userId", uuid_string())
            .optional("fullName", max_length(100))
            .optional("bio", max_length(1000))
            .optional("avatarUrl", url())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl Validate for UpdateProfile {
    fn schema() -> Schema {
        Schema::new()
            .optional("fullName", max_length(100))
            .optional("bio", max_length(1000))
            .optional("avatarUrl", url())
    }
}
