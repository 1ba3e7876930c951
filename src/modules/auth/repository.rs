use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use blogmesh_core::AppError;
use blogmesh_models::users::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user. Duplicate email or username is a 400.
    async fn insert(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn exists(&self, email: &str, username: &str) -> Result<bool, AppError>;
}

pub fn user_exists_error() -> AppError {
    AppError::bad_request(anyhow::anyhow!("User already exists"))
}

#[derive(Clone, Debug)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, username, email, password_hash, created_at)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, username, email, password_hash, created_at"#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return user_exists_error();
            }
            AppError::database(e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn exists(&self, email: &str, username: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR username = $2)",
        )
        .bind(email)
        .bind(username)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }
}
