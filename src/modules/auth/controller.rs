use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use tracing::instrument;

use blogmesh_auth::VerifyResponse;
use blogmesh_core::AppError;
use blogmesh_models::common::ErrorResponse;
use blogmesh_models::users::{AuthResponse, LoginRequest, RegisterRequest};

use crate::middleware::auth::bearer_token;
use crate::state::AuthState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "User already exists or malformed body", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AuthState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AuthService::register(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AuthState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = AuthService::login(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Verify a bearer token and return the identity it is bound to
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token valid"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn verify(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, AppError> {
    let token = bearer_token(&headers).ok_or_else(AppError::unauthenticated)?;
    let response = AuthService::verify(state.users.as_ref(), token, &state.jwt_config).await?;
    Ok(Json(response))
}
