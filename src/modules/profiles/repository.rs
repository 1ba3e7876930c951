use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use blogmesh_core::AppError;
use blogmesh_models::profiles::Profile;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;
    /// Inserts the profile, or overwrites the editable fields of the one
    /// already stored for `profile.user_id`. Never creates a second profile
    /// for the same user.
    async fn upsert(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, AppError>;
}

const PROFILE_COLUMNS: &str =
    "id, user_id, bio, location, website, social, interests, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgProfileRepository {
    db: PgPool,
}

impl PgProfileRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(profile)
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"INSERT INTO profiles (id, user_id, bio, location, website, social, interests, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
               ON CONFLICT (user_id) DO UPDATE SET
                   bio = EXCLUDED.bio,
                   location = EXCLUDED.location,
                   website = EXCLUDED.website,
                   social = EXCLUDED.social,
                   interests = EXCLUDED.interests,
                   updated_at = EXCLUDED.updated_at
               RETURNING {PROFILE_COLUMNS}"#
        ))
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.bio)
        .bind(&profile.location)
        .bind(&profile.website)
        .bind(Json(&profile.social))
        .bind(&profile.interests)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
