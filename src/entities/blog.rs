//! Blog entity model
//!
//! A blog post optionally belongs to an author (the reference is nulled
//! when the author is deleted) and carries an n:n category association.
//! `category_ids` on the payloads drives that association: a present list
//! replaces it wholesale, an empty list clears it, an absent field leaves
//! it untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{AuthorWithUser, Category, Comment};
use crate::core::validation::validators::{
    boolean, max_length, slug, string_length, uuid_array, uuid_string,
};
use crate::core::validation::{Schema, Validate};

#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Uuid,
    pub author_id: Option<Uuid>,
    pub slug: Option<String>,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub excerpt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(
        title: String,
        content: String,
        slug: Option<String>,
        excerpt: Option<String>,
        published: bool,
        author_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            slug,
            title,
            content,
            published,
            excerpt,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update to the row fields. The category association
    /// is not a row field; the service handles `category_ids` separately.
    pub fn apply(&mut self, update: UpdateBlog) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(slug) = update.slug {
            self.slug = Some(slug);
        }
        if let Some(excerpt) = update.excerpt {
            self.excerpt = Some(excerpt);
        }
        if let Some(published) = update.published {
            self.published = published;
        }
        if let Some(author_id) = update.author_id {
            self.author_id = Some(author_id);
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A blog with its eagerly resolved relations.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogWithRelations {
    #[serde(flatten)]
    pub blog: Blog,
    pub author: Option<AuthorWithUser>,
    pub comments: Vec<Comment>,
    pub categories: Vec<Category>,
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlog {
    pub title: String,
    pub content: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub published: Option<bool>,
    pub author_id: Option<Uuid>,
    pub category_ids: Option<Vec<Uuid>>,
}

impl Validate for CreateBlog {
    fn schema() -> Schema {
        Schema::new()
            .required("title", string_length(1, 200))
            .required("content", string_length(1, 50_000))
            .optional("slug", slug(120))
            .optional("excerpt", max_length(500))
            .optional("published", boolean())
            .optional("authorId", uuid_string())
            .optional("categoryIds", uuid_array())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub published: Option<bool>,
    pub author_id: Option<Uuid>,
    pub category_ids: Option<Vec<Uuid>>,
}

impl Validate for UpdateBlog {
    fn schema() -> Schema {
        Schema::new()
            .optional("title", string_length(1, 200))
            .optional("content", string_length(1, 50_000))
            .optional("slug", slug(120))
            .optional("excerpt", max_length(500))
            .optional("published", boolean())
            .optional("authorId", uuid_string())
            .optional("categoryIds", uuid_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_leaves_absent_fields_untouched() {
        let mut blog = Blog::new(
            "First post".to_string(),
            "Hello".to_string(),
            Some("first-post".to_string()),
            None,
            false,
            None,
        );

        blog.apply(UpdateBlog {
            published: Some(true),
            ..Default::default()
        });

        assert!(blog.published);
        assert_eq!(blog.title, "First post");
        assert_eq!(blog.slug.as_deref(), Some("first-post"));
    }

    #[test]
    fn test_apply_does_not_consume_category_ids() {
        let mut update = UpdateBlog {
            title: Some("Renamed".to_string()),
            category_ids: Some(vec![Uuid::new_v4()]),
            ..Default::default()
        };
        let category_ids = update.category_ids.take();

        let mut blog = Blog::new(
            "First post".to_string(),
            "Hello".to_string(),
            None,
            None,
            false,
            None,
        );
        blog.apply(update);

        assert_eq!(blog.title, "Renamed");
        assert_eq!(category_ids.map(|ids| ids.len()), Some(1));
    }
}
