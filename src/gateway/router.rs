use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use blogmesh_observability::PrometheusHandle;

use crate::docs::ApiDoc;
use crate::router::with_common_layers;
use crate::state::GatewayState;

use super::health::{gateway_health, gateway_ready};
use super::proxy::proxy;

pub fn init_gateway_router(state: GatewayState, metrics: Option<PrometheusHandle>) -> Router {
    let cors_config = state.cors_config.clone();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(gateway_health))
        .route("/ready", get(gateway_ready))
        .fallback(proxy)
        .with_state(state);

    with_common_layers(router, &cors_config, metrics)
}
