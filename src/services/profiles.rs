//! Profile service
//!
//! Enforces the one-profile-per-user rule. The pre-flight lookups exist
//! for friendly error messages; the storage constraints (`UNIQUE
//! (user_id)` + FK) make the insert itself race-safe.

use uuid::Uuid;

use crate::core::error::{ApiError, ApiResult, StorageError};
use crate::entities::{CreateProfile, Profile, ProfileWithUser, UpdateProfile};
use crate::storage::Storage;

#[derive(Clone)]
pub struct ProfileService {
    storage: Storage,
}

impl ProfileService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn find_all(&self) -> ApiResult<Vec<ProfileWithUser>> {
        let profiles = self.storage.profiles.list().await?;
        let mut out = Vec::with_capacity(profiles.len());
        for profile in profiles {
            out.push(self.with_user(profile).await?);
        }
        Ok(out)
    }

    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<ProfileWithUser>> {
        match self.storage.profiles.get(id).await? {
            Some(profile) => Ok(Some(self.with_user(profile).await?)),
            None => Ok(None),
        }
    }

    /// The profile belonging to a user, for `GET /users/{id}/profile`.
    /// Distinguishes "no such user" from "user has no profile".
    pub async fn find_for_user(&self, user_id: Uuid) -> ApiResult<ProfileWithUser> {
        let Some(user) = self.storage.users.get(user_id).await? else {
            return Err(ApiError::NotFound { resource: "User" });
        };
        let Some(profile) = self.storage.profiles.get_by_user(user_id).await? else {
            return Err(ApiError::NotFound { resource: "Profile" });
        };
        Ok(ProfileWithUser { profile, user })
    }

    pub async fn create(&self, payload: CreateProfile) -> ApiResult<Profile> {
        if self.storage.users.get(payload.user_id).await?.is_none() {
            return Err(ApiError::ReferenceNotFound {
                message: "Invalid user ID provided".to_string(),
            });
        }
        if self
            .storage
            .profiles
            .get_by_user(payload.user_id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict {
                message: "User already has a profile".to_string(),
            });
        }

        let profile = Profile::new(
            payload.user_id,
            payload.full_name,
            payload.bio,
            payload.avatar_url,
        );
        match self.storage.profiles.insert(&profile).await {
            Ok(()) => Ok(profile),
            Err(StorageError::UniqueViolation { .. }) => Err(ApiError::Conflict {
                message: "User already has a profile".to_string(),
            }),
            Err(StorageError::ForeignKeyViolation { .. }) => Err(ApiError::ReferenceNotFound {
                message: "Invalid user ID provided".to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(&self, id: Uuid, payload: UpdateProfile) -> ApiResult<Option<Profile>> {
        let Some(mut profile) = self.storage.profiles.get(id).await? else {
            return Ok(None);
        };
        profile.apply(payload);
        self.storage.profiles.update(&profile).await?;
        Ok(Some(profile))
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        Ok(self.storage.profiles.delete(id).await?)
    }

    async fn with_user(&self, profile: Profile) -> ApiResult<ProfileWithUser> {
        let user = self
            .storage
            .users
            .get(profile.user_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!("profile {} references missing user", profile.id))
            })?;
        Ok(ProfileWithUser { profile, user })
    }
}
