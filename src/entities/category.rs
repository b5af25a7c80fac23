//! Category entity model — name and slug are both unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Blog;
use crate::core::validation::validators::{max_length, slug, string_length};
use crate::core::validation::{Schema, Validate};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, slug: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(slug) = update.slug {
            self.slug = slug;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A category with the blogs it is attached to.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithBlogs {
    #[serde(flatten)]
    pub category: Category,
    pub blogs: Vec<Blog>,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl Validate for CreateCategory {
    fn schema() -> Schema {
        Schema::new()
            .required("name", string_length(1, 100))
            .required("slug", slug(120))
            .optional("description", max_length(500))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl Validate for UpdateCategory {
    fn schema() -> Schema {
        Schema::new()
            .optional("name", string_length(1, 100))
            .optional("slug", slug(120))
            .optional("description", max_length(500))
    }
}
