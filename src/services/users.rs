//! User service

use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::entities::{CreateUser, UpdateUser, User, UserWithRelations};
use crate::storage::Storage;

#[derive(Clone)]
pub struct UserService {
    storage: Storage,
}

impl UserService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<UserWithRelations>> {
        let users = self.storage.users.list().await?;
        let mut out = Vec::with_capacity(users.len());
        for user in users {
            out.push(self.with_relations(user).await?);
        }
        Ok(out)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<UserWithRelations>> {
        match self.storage.users.get(id).await? {
            Some(user) => Ok(Some(self.with_relations(user).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, payload: CreateUser) -> ApiResult<User> {
        let user = User::new(
            payload.email,
            payload.password,
            payload.first_name,
            payload.last_name,
        );
        match self.storage.users.insert(&user).await {
            Ok(()) => Ok(user),
            Err(StorageError::UniqueViolation { .. }) => Err(ApiError::Conflict {
                message: "A user with this email already exists".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(&self, id: Uuid, payload: UpdateUser) -> ApiResult<Option<User>> {
        let Some(mut user) = self.storage.users.get(id).await? else {
            return Ok(None);
        };
        user.apply(payload);
        match self.storage.users.update(&user).await {
            Ok(()) => Ok(Some(user)),
            Err(StorageError::UniqueViolation { .. }) => Err(ApiError::Conflict {
                message: "A user with this email already exists".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.storage.users.delete(id).await?)
    }

    async fn with_relations(&self, user: User) -> ApiResult<UserWithRelations> {
        let profile = self.storage.profiles.get_by_user(user.id).await?;
        let author = self.storage.authors.get_by_user(user.id).await?;
        let comments = self.storage.comments.list_by_user(user.id).await?;
        Ok(UserWithRelations {
            user,
            profile,
            author,
            comments,
        })
    }
}
