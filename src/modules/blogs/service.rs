use tracing::instrument;
use uuid::Uuid;

use blogmesh_core::{AppError, Identity, authorize_mutation};
use blogmesh_models::blogs::{Blog, BlogDto};

use super::repository::BlogRepository;

fn blog_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Blog not found"))
}

pub struct BlogService;

impl BlogService {
    #[instrument(skip(blogs, dto), fields(db.operation = "INSERT", db.table = "blogs"))]
    pub async fn create_blog(
        blogs: &dyn BlogRepository,
        author: &Identity,
        dto: BlogDto,
    ) -> Result<Blog, AppError> {
        blogs.insert(&Blog::new(dto, author)).await
    }

    #[instrument(skip(blogs), fields(db.operation = "SELECT", db.table = "blogs"))]
    pub async fn get_blogs(blogs: &dyn BlogRepository) -> Result<Vec<Blog>, AppError> {
        blogs.find_all().await
    }

    #[instrument(skip(blogs), fields(db.operation = "SELECT", db.table = "blogs"))]
    pub async fn get_blog(blogs: &dyn BlogRepository, id: Uuid) -> Result<Blog, AppError> {
        blogs.find_by_id(id).await?.ok_or_else(blog_not_found)
    }

    /// Loads the blog, checks the caller owns it, then writes the update.
    #[instrument(skip(blogs, dto), fields(db.operation = "UPDATE", db.table = "blogs"))]
    pub async fn update_blog(
        blogs: &dyn BlogRepository,
        caller: &Identity,
        id: Uuid,
        dto: BlogDto,
    ) -> Result<Blog, AppError> {
        let mut blog = Self::get_blog(blogs, id).await?;
        authorize_mutation(&blog, caller, "update this blog")?;

        blog.apply(dto);
        blogs.update(&blog).await?.ok_or_else(blog_not_found)
    }

    #[instrument(skip(blogs), fields(db.operation = "DELETE", db.table = "blogs"))]
    pub async fn delete_blog(
        blogs: &dyn BlogRepository,
        caller: &Identity,
        id: Uuid,
    ) -> Result<(), AppError> {
        let blog = Self::get_blog(blogs, id).await?;
        authorize_mutation(&blog, caller, "delete this blog")?;

        if !blogs.delete(id).await? {
            return Err(blog_not_found());
        }
        Ok(())
    }
}
