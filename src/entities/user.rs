//! User entity model
//!
//! Users own at most one [`Profile`] and one [`Author`] record each, and
//! any number of comments. The password column is accepted on input but
//! never serialized in responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Author, Comment, Profile};
use crate::core::validation::validators::{email, string_length};
use crate::core::validation::{Schema, Validate};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        password: String,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update: only provided fields overwrite existing values.
    pub fn apply(&mut self, update: UpdateUser) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(first_name) = update.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = update.last_name {
            self.last_name = Some(last_name);
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A user with its eagerly resolved relations.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRelations {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<Profile>,
    pub author: Option<Author>,
    pub comments: Vec<Comment>,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Validate for CreateUser {
    fn schema() -> Schema {
        Schema::new()
            .required("email", email())
            .required("password", string_length(6, 100))
            .optional("firstName", string_length(1, 100))
            .optional("lastName", string_length(1, 20))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Validate for UpdateUser {
    fn schema() -> Schema {
        Schema::new()
            .optional("email", email())
            .optional("password", string_length(6, 100))
            .optional("firstName", string_length(1, 100))
            .optional("lastName", string_length(1, 20))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_id_and_timestamps() {
        let user = User::new("a@b.io".to_string(), "secret1".to_string(), None, None);
        assert!(!user.id.is_nil());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut user = User::new(
            "a@b.io".to_string(),
            "secret1".to_string(),
            Some("Ada".to_string()),
            Some("Lovelace".to_string()),
        );

        user.apply(UpdateUser {
            email: Some("new@b.io".to_string()),
            ..Default::default()
        });

        assert_eq!(user.email, "new@b.io");
        assert_eq!(user.password, "secret1");
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_password_not_serialized() {
        let user = User::new("a@b.io".to_string(), "secret1".to_string(), None, None);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@b.io");
    }
}
