use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use blogmesh_core::AppError;
use blogmesh_models::comments::Comment;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, comment: &Comment) -> Result<Comment, AppError>;
    /// Comments on `blog_id`, newest first.
    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, AppError>;
    async fn update(&self, comment: &Comment) -> Result<Option<Comment>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const COMMENT_COLUMNS: &str = "id, content, blog, author, author_name, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgCommentRepository {
    db: PgPool,
}

impl PgCommentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn insert(&self, comment: &Comment) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"INSERT INTO comments (id, content, blog, author, author_name, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {COMMENT_COLUMNS}"#
        ))
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.blog)
        .bind(comment.author)
        .bind(&comment.author_name)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(comment)
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE blog = $1 ORDER BY created_at DESC"
        ))
        .bind(blog_id)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(comment)
    }

    async fn update(&self, comment: &Comment) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"UPDATE comments SET content = $2, updated_at = $3
               WHERE id = $1
               RETURNING {COMMENT_COLUMNS}"#
        ))
        .bind(comment.id)
        .bind(&comment.content)
        .bind(comment.updated_at)
        .fetch_optional(&self.db)
        .await?;

        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
