//! Category service — name and slug are both unique.

use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::entities::{Category, CategoryWithBlogs, CreateCategory, UpdateCategory};
use crate::storage::Storage;

#[derive(Clone)]
pub struct CategoryService {
    storage: Storage,
}

impl CategoryService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<CategoryWithBlogs>> {
        let categories = self.storage.categories.list().await?;
        let mut out = Vec::with_capacity(categories.len());
        for category in categories {
            out.push(self.with_blogs(category).await?);
        }
        Ok(out)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<CategoryWithBlogs>> {
        match self.storage.categories.get(id).await? {
            Some(category) => Ok(Some(self.with_blogs(category).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, payload: CreateCategory) -> ApiResult<Category> {
        let category = Category::new(payload.name, payload.slug, payload.description);
        match self.storage.categories.insert(&category).await {
            Ok(()) => Ok(category),
            Err(StorageError::UniqueViolation { .. }) => Err(ApiError::Conflict {
                message: "A category with this name or slug already exists".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCategory) -> ApiResult<Option<Category>> {
        let Some(mut category) = self.storage.categories.get(id).await? else {
            return Ok(None);
        };
        category.apply(payload);
        match self.storage.categories.update(&category).await {
            Ok(()) => Ok(Some(category)),
            Err(StorageError::UniqueViolation { .. }) => Err(ApiError::Conflict {
                message: "A category with this name or slug already exists".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.storage.categories.delete(id).await?)
    }

    async fn with_blogs(&self, category: Category) -> ApiResult<CategoryWithBlogs> {
        let blogs = self.storage.blogs.list_by_category(category.id).await?;
        Ok(CategoryWithBlogs { category, blogs })
    }
}
