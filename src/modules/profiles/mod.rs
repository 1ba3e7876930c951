pub mod controller;
pub mod repository;
pub mod router;
pub mod service;

pub use repository::{PgProfileRepository, ProfileRepository};
pub use router::init_profiles_router;
