use tracing::instrument;
use uuid::Uuid;

use blogmesh_core::{AppError, Identity, authorize_mutation};
use blogmesh_models::comments::{Comment, CreateCommentDto, UpdateCommentDto};

use super::directory::BlogDirectory;
use super::repository::CommentRepository;

fn comment_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Comment not found"))
}

pub struct CommentService;

impl CommentService {
    #[instrument(skip(comments), fields(db.operation = "SELECT", db.table = "comments"))]
    pub async fn get_comments_for_blog(
        comments: &dyn CommentRepository,
        blog_id: Uuid,
    ) -> Result<Vec<Comment>, AppError> {
        comments.find_by_blog(blog_id).await
    }

    /// Creates a comment after confirming the blog exists.
    #[instrument(skip(comments, blogs, dto), fields(db.operation = "INSERT", db.table = "comments", blog.id = %dto.blog_id))]
    pub async fn create_comment(
        comments: &dyn CommentRepository,
        blogs: &dyn BlogDirectory,
        author: &Identity,
        dto: CreateCommentDto,
    ) -> Result<Comment, AppError> {
        if !blogs.blog_exists(dto.blog_id).await {
            return Err(AppError::not_found(anyhow::anyhow!("Blog not found")));
        }

        comments.insert(&Comment::new(dto, author)).await
    }

    #[instrument(skip(comments, dto), fields(db.operation = "UPDATE", db.table = "comments"))]
    pub async fn update_comment(
        comments: &dyn CommentRepository,
        caller: &Identity,
        id: Uuid,
        dto: UpdateCommentDto,
    ) -> Result<Comment, AppError> {
        let mut comment = comments.find_by_id(id).await?.ok_or_else(comment_not_found)?;
        authorize_mutation(&comment, caller, "update this comment")?;

        comment.apply(dto);
        comments.update(&comment).await?.ok_or_else(comment_not_found)
    }

    #[instrument(skip(comments), fields(db.operation = "DELETE", db.table = "comments"))]
    pub async fn delete_comment(
        comments: &dyn CommentRepository,
        caller: &Identity,
        id: Uuid,
    ) -> Result<(), AppError> {
        let comment = comments.find_by_id(id).await?.ok_or_else(comment_not_found)?;
        authorize_mutation(&comment, caller, "delete this comment")?;

        if !comments.delete(id).await? {
            return Err(comment_not_found());
        }
        Ok(())
    }
}
