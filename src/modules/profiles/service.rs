use tracing::instrument;
use uuid::Uuid;

use blogmesh_core::{AppError, Identity, authorize_mutation, ensure_owner};
use blogmesh_models::profiles::{Profile, ProfileDto};

use super::repository::ProfileRepository;

fn profile_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Profile not found"))
}

pub struct ProfileService;

impl ProfileService {
    #[instrument(skip(profiles), fields(db.operation = "SELECT", db.table = "profiles"))]
    pub async fn get_profile_by_user(
        profiles: &dyn ProfileRepository,
        user_id: Uuid,
    ) -> Result<Profile, AppError> {
        profiles
            .find_by_user(user_id)
            .await?
            .ok_or_else(profile_not_found)
    }

    /// Create-or-update keyed by the caller's id.
    #[instrument(skip(profiles, dto), fields(db.operation = "UPSERT", db.table = "profiles"))]
    pub async fn upsert_profile(
        profiles: &dyn ProfileRepository,
        caller: &Identity,
        dto: ProfileDto,
    ) -> Result<Profile, AppError> {
        let mut profile = profiles
            .find_by_user(caller.id)
            .await?
            .unwrap_or_else(|| Profile::empty(caller.id));

        profile.apply(dto);
        profiles.upsert(&profile).await
    }

    /// Updates the profile of `user_id`, which must be the caller.
    #[instrument(skip(profiles, dto), fields(db.operation = "UPDATE", db.table = "profiles"))]
    pub async fn update_profile(
        profiles: &dyn ProfileRepository,
        caller: &Identity,
        user_id: Uuid,
        dto: ProfileDto,
    ) -> Result<Profile, AppError> {
        ensure_owner(user_id, caller, "update this profile")?;

        let mut profile = Self::get_profile_by_user(profiles, user_id).await?;
        authorize_mutation(&profile, caller, "update this profile")?;

        profile.apply(dto);
        profiles.upsert(&profile).await
    }

    #[instrument(skip(profiles), fields(db.operation = "DELETE", db.table = "profiles"))]
    pub async fn delete_profile(
        profiles: &dyn ProfileRepository,
        caller: &Identity,
    ) -> Result<(), AppError> {
        profiles.delete_by_user(caller.id).await?;
        Ok(())
    }
}
