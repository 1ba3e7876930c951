use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::CommentState;

use super::controller::{create_comment, delete_comment, get_comments_for_blog, update_comment};

pub fn init_comments_router() -> Router<CommentState> {
    Router::new()
        .route("/", post(create_comment))
        .route("/blog/{blog_id}", get(get_comments_for_blog))
        .route("/{id}", put(update_comment).delete(delete_comment))
}
