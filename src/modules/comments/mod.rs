pub mod controller;
pub mod directory;
pub mod repository;
pub mod router;
pub mod service;

pub use directory::{BlogDirectory, HttpBlogDirectory};
pub use repository::{CommentRepository, PgCommentRepository};
pub use router::init_comments_router;
