use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use blogmesh_core::AppError;
use blogmesh_models::blogs::Blog;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert(&self, blog: &Blog) -> Result<Blog, AppError>;
    /// All blogs, newest first.
    async fn find_all(&self) -> Result<Vec<Blog>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, AppError>;
    /// Writes the editable fields of `blog`. Returns `None` if it vanished.
    async fn update(&self, blog: &Blog) -> Result<Option<Blog>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

const BLOG_COLUMNS: &str = "id, title, content, author, author_name, tags, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgBlogRepository {
    db: PgPool,
}

impl PgBlogRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn insert(&self, blog: &Blog) -> Result<Blog, AppError> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"INSERT INTO blogs (id, title, content, author, author_name, tags, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING {BLOG_COLUMNS}"#
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(blog.author)
        .bind(&blog.author_name)
        .bind(&blog.tags)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .fetch_one(&self.db)
        .await?;

        Ok(blog)
    }

    async fn find_all(&self) -> Result<Vec<Blog>, AppError> {
        let blogs = sqlx::query_as::<_, Blog>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(blogs)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, AppError> {
        let blog = sqlx::query_as::<_, Blog>(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(blog)
    }

    async fn update(&self, blog: &Blog) -> Result<Option<Blog>, AppError> {
        let blog = sqlx::query_as::<_, Blog>(&format!(
            r#"UPDATE blogs SET title = $2, content = $3, tags = $4, updated_at = $5
               WHERE id = $1
               RETURNING {BLOG_COLUMNS}"#
        ))
        .bind(blog.id)
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(&blog.tags)
        .bind(blog.updated_at)
        .fetch_optional(&self.db)
        .await?;

        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
