use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use blogmesh_config::CorsConfig;
use blogmesh_observability::{
    PrometheusHandle, logging_middleware, metrics_middleware, metrics_route,
};

use crate::health::init_health_router;
use crate::modules::auth::init_auth_router;
use crate::modules::blogs::init_blogs_router;
use crate::modules::comments::init_comments_router;
use crate::modules::profiles::init_profiles_router;
use crate::state::{AuthState, BlogState, CommentState, ProfileState};

pub fn cors_layer(cors_config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Adds `/metrics` (when a recorder is installed), CORS, request metrics and
/// request logging.
pub fn with_common_layers(
    router: Router,
    cors_config: &CorsConfig,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let router = match metrics {
        Some(handle) => router.merge(metrics_route(handle)),
        None => router,
    };

    router
        .layer(cors_layer(cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

pub fn init_auth_app(state: AuthState, metrics: Option<PrometheusHandle>) -> Router {
    let cors_config = state.cors_config.clone();
    let router = Router::new()
        .nest("/api/auth", init_auth_router())
        .merge(init_health_router())
        .with_state(state);

    with_common_layers(router, &cors_config, metrics)
}

pub fn init_blog_app(state: BlogState, metrics: Option<PrometheusHandle>) -> Router {
    let cors_config = state.cors_config.clone();
    let router = Router::new()
        .nest("/api/blogs", init_blogs_router())
        .merge(init_health_router())
        .with_state(state);

    with_common_layers(router, &cors_config, metrics)
}

pub fn init_comment_app(state: CommentState, metrics: Option<PrometheusHandle>) -> Router {
    let cors_config = state.cors_config.clone();
    let router = Router::new()
        .nest("/api/comments", init_comments_router())
        .merge(init_health_router())
        .with_state(state);

    with_common_layers(router, &cors_config, metrics)
}

pub fn init_profile_app(state: ProfileState, metrics: Option<PrometheusHandle>) -> Router {
    let cors_config = state.cors_config.clone();
    let router = Router::new()
        .nest("/api/profiles", init_profiles_router())
        .merge(init_health_router())
        .with_state(state);

    with_common_layers(router, &cors_config, metrics)
}
