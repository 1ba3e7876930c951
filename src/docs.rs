use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use blogmesh_models::blogs::{Blog, BlogDto};
use blogmesh_models::comments::{Comment, CreateCommentDto, UpdateCommentDto};
use blogmesh_models::common::{ErrorResponse, MessageResponse};
use blogmesh_models::health::{
    AggregatedHealth, DatabaseState, HealthStatus, LivenessResponse, ReadinessResponse,
    ServiceHealth,
};
use blogmesh_models::profiles::{Profile, ProfileDto, SocialLinks};
use blogmesh_models::users::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};

/// Combined document for every service reachable through the gateway.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::gateway::health::gateway_health,
        crate::gateway::health::gateway_ready,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::verify,
        crate::modules::blogs::controller::get_blogs,
        crate::modules::blogs::controller::get_blog,
        crate::modules::blogs::controller::create_blog,
        crate::modules::blogs::controller::update_blog,
        crate::modules::blogs::controller::delete_blog,
        crate::modules::comments::controller::get_comments_for_blog,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::update_comment,
        crate::modules::comments::controller::delete_comment,
        crate::modules::profiles::controller::get_my_profile,
        crate::modules::profiles::controller::upsert_profile,
        crate::modules::profiles::controller::update_profile,
        crate::modules::profiles::controller::get_profile_by_user,
        crate::modules::profiles::controller::delete_profile,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UserResponse,
            Blog,
            BlogDto,
            Comment,
            CreateCommentDto,
            UpdateCommentDto,
            Profile,
            ProfileDto,
            SocialLinks,
            MessageResponse,
            ErrorResponse,
            HealthStatus,
            LivenessResponse,
            ReadinessResponse,
            DatabaseState,
            ServiceHealth,
            AggregatedHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Gateway", description = "Gateway liveness and aggregated readiness"),
        (name = "Authentication", description = "Registration, login and token verification"),
        (name = "Blogs", description = "Blog posts"),
        (name = "Comments", description = "Comments on blog posts"),
        (name = "Profiles", description = "User profiles")
    ),
    info(
        title = "Blogmesh API",
        version = "0.1.0",
        description = "Blog platform served by an edge gateway in front of auth, blog, comment and profile services.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_service() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/ready",
            "/api/auth/verify",
            "/api/blogs/{id}",
            "/api/comments/blog/{blog_id}",
            "/api/profiles/me",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
