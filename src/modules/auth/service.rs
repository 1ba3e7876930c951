use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use blogmesh_auth::{VerifiedUser, VerifyResponse, create_access_token, verify_token};
use blogmesh_config::JwtConfig;
use blogmesh_core::{AppError, hash_password, verify_password};
use blogmesh_models::users::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
use blogmesh_observability::{track_login, track_token_issued, track_user_registered};

use super::repository::{UserRepository, user_exists_error};

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials".to_string())
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(users, dto, jwt_config), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn register(
        users: &dyn UserRepository,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = dto.email.trim().to_lowercase();
        let username = dto.username.trim().to_string();

        if users.exists(&email, &username).await? {
            return Err(user_exists_error());
        }

        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: hash_password(&dto.password)?,
            created_at: Utc::now(),
        };
        let user = users.insert(&user).await?;

        let token = create_access_token(user.id, &user.username, jwt_config)?;
        track_user_registered();
        track_token_issued();

        Ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })
    }

    #[instrument(skip(users, dto, jwt_config), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let email = dto.email.trim().to_lowercase();

        let Some(user) = users.find_by_email(&email).await? else {
            track_login(false);
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_login(false);
            return Err(invalid_credentials());
        }

        let token = create_access_token(user.id, &user.username, jwt_config)?;
        track_login(true);
        track_token_issued();

        Ok(AuthResponse {
            token,
            user: UserResponse::from(&user),
        })
    }

    /// Resolves a token to the user it was issued for.
    ///
    /// Checks signature and expiry, then that the user still exists.
    #[instrument(skip_all, fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn verify(
        users: &dyn UserRepository,
        token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<VerifyResponse, AppError> {
        let claims = verify_token(token, jwt_config)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::unauthenticated())?;

        let user = users
            .find_by_id(user_id)
            .await?
            .ok_or_else(AppError::unauthenticated)?;

        Ok(VerifyResponse {
            user: Some(VerifiedUser {
                id: user.id,
                username: user.username,
                email: Some(user.email),
            }),
        })
    }
}
