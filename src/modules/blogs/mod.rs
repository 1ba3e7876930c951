pub mod controller;
pub mod repository;
pub mod router;
pub mod service;

pub use repository::{BlogRepository, PgBlogRepository};
pub use router::init_blogs_router;
