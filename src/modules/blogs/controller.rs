use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use blogmesh_core::AppError;
use blogmesh_models::blogs::{Blog, BlogDto};
use blogmesh_models::common::{ErrorResponse, MessageResponse};

use crate::middleware::auth::AuthUser;
use crate::state::BlogState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::BlogService;

#[utoipa::path(
    get,
    path = "/api/blogs",
    responses((status = 200, description = "All blogs, newest first", body = Vec<Blog>)),
    tag = "Blogs"
)]
#[instrument(skip(state))]
pub async fn get_blogs(State(state): State<BlogState>) -> Result<Json<Vec<Blog>>, AppError> {
    let blogs = BlogService::get_blogs(state.blogs.as_ref()).await?;
    Ok(Json(blogs))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = Blog),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    ),
    tag = "Blogs"
)]
#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<BlogState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<Blog>, AppError> {
    let blog = BlogService::get_blog(state.blogs.as_ref(), id).await?;
    Ok(Json(blog))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = BlogDto,
    responses(
        (status = 201, description = "Blog created", body = Blog),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Blogs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn create_blog(
    State(state): State<BlogState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<BlogDto>,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    let blog = BlogService::create_blog(state.blogs.as_ref(), &auth_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    params(("id" = Uuid, Path, description = "Blog ID")),
    request_body = BlogDto,
    responses(
        (status = 200, description = "Blog updated", body = Blog),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not the author", body = ErrorResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    ),
    tag = "Blogs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.id()))]
pub async fn update_blog(
    State(state): State<BlogState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<BlogDto>,
) -> Result<Json<Blog>, AppError> {
    let blog = BlogService::update_blog(state.blogs.as_ref(), &auth_user.0, id, dto).await?;
    Ok(Json(blog))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not the author", body = ErrorResponse),
        (status = 404, description = "Blog not found", body = ErrorResponse)
    ),
    tag = "Blogs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.id()))]
pub async fn delete_blog(
    State(state): State<BlogState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    BlogService::delete_blog(state.blogs.as_ref(), &auth_user.0, id).await?;
    Ok(Json(MessageResponse::new("Blog deleted successfully")))
}
