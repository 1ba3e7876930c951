use axum::{Router, routing::get};

use crate::state::BlogState;

use super::controller::{create_blog, delete_blog, get_blog, get_blogs, update_blog};

pub fn init_blogs_router() -> Router<BlogState> {
    Router::new()
        .route("/", get(get_blogs).post(create_blog))
        .route("/{id}", get(get_blog).put(update_blog).delete(delete_blog))
}
