use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use blogmesh_core::AppError;
use blogmesh_models::comments::{Comment, CreateCommentDto, UpdateCommentDto};
use blogmesh_models::common::{ErrorResponse, MessageResponse};

use crate::middleware::auth::AuthUser;
use crate::state::CommentState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::CommentService;

#[utoipa::path(
    get,
    path = "/api/comments/blog/{blog_id}",
    params(("blog_id" = Uuid, Path, description = "Blog ID")),
    responses((status = 200, description = "Comments on the blog, newest first", body = Vec<Comment>)),
    tag = "Comments"
)]
#[instrument(skip(state))]
pub async fn get_comments_for_blog(
    State(state): State<CommentState>,
    ValidatedPath(blog_id): ValidatedPath<Uuid>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = CommentService::get_comments_for_blog(state.comments.as_ref(), blog_id).await?;
    Ok(Json(comments))
}

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn create_comment(
    State(state): State<CommentState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = CommentService::create_comment(
        state.comments.as_ref(),
        state.blog_directory.as_ref(),
        &auth_user.0,
        dto,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not the author", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn update_comment(
    State(state): State<CommentState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCommentDto>,
) -> Result<Json<Comment>, AppError> {
    let comment =
        CommentService::update_comment(state.comments.as_ref(), &auth_user.0, id, dto).await?;
    Ok(Json(comment))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not the author", body = ErrorResponse),
        (status = 404, description = "Comment not found", body = ErrorResponse)
    ),
    tag = "Comments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn delete_comment(
    State(state): State<CommentState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    CommentService::delete_comment(state.comments.as_ref(), &auth_user.0, id).await?;
    Ok(Json(MessageResponse::new("Comment deleted")))
}
