use axum::{Router, routing::post};

use crate::state::AuthState;

use super::controller::{login, register, verify};

pub fn init_auth_router() -> Router<AuthState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", post(verify))
}
