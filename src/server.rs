//! Process bootstrap: builds one service's state from the environment and
//! serves its router.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use blogmesh_auth::RemoteTokenVerifier;
use blogmesh_config::{
    AuthClientConfig, CorsConfig, GatewayConfig, JwtConfig, ServerConfig, ServiceEndpoint,
    ServiceUrls, peer_timeout_from_env,
};
use blogmesh_db::init_db_pool;
use blogmesh_observability::{init_metrics, init_tracing};

use crate::cli::Command;
use crate::gateway::{HealthAggregator, init_gateway_router, proxy_client};
use crate::health::PgReadiness;
use crate::modules::auth::PgUserRepository;
use crate::modules::blogs::PgBlogRepository;
use crate::modules::comments::{HttpBlogDirectory, PgCommentRepository};
use crate::modules::profiles::PgProfileRepository;
use crate::router::{init_auth_app, init_blog_app, init_comment_app, init_profile_app};
use crate::state::{
    AuthState, BlogState, CommentState, GatewayState, ProfileState, Readiness, Verifier,
};

pub async fn run(command: Command) -> anyhow::Result<()> {
    let service = command.service_name();
    let _log_guard = init_tracing(service);

    let app = match command {
        Command::Migrate => return migrate().await,
        Command::Gateway => {
            let config = GatewayConfig::from_env();
            let client = proxy_client().context("Failed to build proxy client")?;
            let health = HealthAggregator::from_config(&config)
                .context("Failed to build readiness client")?;

            init_gateway_router(
                GatewayState {
                    config: Arc::new(config),
                    client,
                    health,
                    cors_config: CorsConfig::from_env(),
                },
                init_metrics(),
            )
        }
        Command::Auth => {
            let db = init_db_pool().await.context("Failed to connect to database")?;
            init_auth_app(
                AuthState {
                    users: Arc::new(PgUserRepository::new(db.clone())),
                    jwt_config: JwtConfig::from_env(),
                    cors_config: CorsConfig::from_env(),
                    readiness: Readiness::new(service, PgReadiness::new(db)),
                },
                init_metrics(),
            )
        }
        Command::Blog => {
            let db = init_db_pool().await.context("Failed to connect to database")?;
            init_blog_app(
                BlogState {
                    blogs: Arc::new(PgBlogRepository::new(db.clone())),
                    verifier: remote_verifier()?,
                    cors_config: CorsConfig::from_env(),
                    readiness: Readiness::new(service, PgReadiness::new(db)),
                },
                init_metrics(),
            )
        }
        Command::Comment => {
            let db = init_db_pool().await.context("Failed to connect to database")?;
            let blog_service = ServiceEndpoint::new("blog-service", ServiceUrls::from_env().blog);
            let directory = HttpBlogDirectory::new(blog_service, peer_timeout_from_env())
                .context("Failed to build blog lookup client")?;

            init_comment_app(
                CommentState {
                    comments: Arc::new(PgCommentRepository::new(db.clone())),
                    blog_directory: Arc::new(directory),
                    verifier: remote_verifier()?,
                    cors_config: CorsConfig::from_env(),
                    readiness: Readiness::new(service, PgReadiness::new(db)),
                },
                init_metrics(),
            )
        }
        Command::Profile => {
            let db = init_db_pool().await.context("Failed to connect to database")?;
            init_profile_app(
                ProfileState {
                    profiles: Arc::new(PgProfileRepository::new(db.clone())),
                    verifier: remote_verifier()?,
                    cors_config: CorsConfig::from_env(),
                    readiness: Readiness::new(service, PgReadiness::new(db)),
                },
                init_metrics(),
            )
        }
    };

    serve(service, ServerConfig::from_env(command.default_port()), app).await
}

fn remote_verifier() -> anyhow::Result<Verifier> {
    let config = AuthClientConfig::from_env();
    info!(
        auth_service_url = %config.auth_service_url,
        timeout_ms = %config.verify_timeout.as_millis(),
        "Verifying tokens against auth service"
    );
    let verifier = RemoteTokenVerifier::new(&config).context("Failed to build verify client")?;
    Ok(Verifier::new(verifier))
}

async fn serve(service: &str, server: ServerConfig, app: Router) -> anyhow::Result<()> {
    let address = server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(service = %service, address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!(service = %service, "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn migrate() -> anyhow::Result<()> {
    let db = init_db_pool().await.context("Failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations applied");
    Ok(())
}
