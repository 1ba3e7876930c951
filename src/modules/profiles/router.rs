use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::ProfileState;

use super::controller::{
    delete_profile, get_my_profile, get_profile_by_user, update_profile, upsert_profile,
};

pub fn init_profiles_router() -> Router<ProfileState> {
    Router::new()
        .route("/", post(upsert_profile).delete(delete_profile))
        .route("/me", get(get_my_profile))
        .route("/user/{user_id}", get(get_profile_by_user))
        .route("/{user_id}", put(update_profile))
}
