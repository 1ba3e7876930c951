use axum::{
    Json,
    extract::State,
};
use tracing::instrument;
use uuid::Uuid;

use blogmesh_core::AppError;
use blogmesh_models::common::{ErrorResponse, MessageResponse};
use blogmesh_models::profiles::{Profile, ProfileDto};

use crate::middleware::auth::AuthUser;
use crate::state::ProfileState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::ProfileService;

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    responses(
        (status = 200, description = "Caller's profile", body = Profile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    tag = "Profiles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn get_my_profile(
    State(state): State<ProfileState>,
    auth_user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileService::get_profile_by_user(state.profiles.as_ref(), auth_user.id()).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    request_body = ProfileDto,
    responses(
        (status = 200, description = "Profile created or updated", body = Profile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Profiles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn upsert_profile(
    State(state): State<ProfileState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ProfileDto>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileService::upsert_profile(state.profiles.as_ref(), &auth_user.0, dto).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{user_id}",
    params(("user_id" = Uuid, Path, description = "Owner's user ID")),
    request_body = ProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not the caller's profile", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    tag = "Profiles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn update_profile(
    State(state): State<ProfileState>,
    auth_user: AuthUser,
    ValidatedPath(user_id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<ProfileDto>,
) -> Result<Json<Profile>, AppError> {
    let profile =
        ProfileService::update_profile(state.profiles.as_ref(), &auth_user.0, user_id, dto).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/profiles/user/{user_id}",
    params(("user_id" = Uuid, Path, description = "Owner's user ID")),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_profile_by_user(
    State(state): State<ProfileState>,
    ValidatedPath(user_id): ValidatedPath<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileService::get_profile_by_user(state.profiles.as_ref(), user_id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    delete,
    path = "/api/profiles",
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Profiles",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn delete_profile(
    State(state): State<ProfileState>,
    auth_user: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    ProfileService::delete_profile(state.profiles.as_ref(), &auth_user.0).await?;
    Ok(Json(MessageResponse::new("Profile deleted")))
}
