mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use blogmesh::blogmesh_auth::{RemoteTokenVerifier, VERIFY_PATH};
use blogmesh::blogmesh_config::CorsConfig;
use blogmesh::router::init_blog_app;
use blogmesh::state::{BlogState, Readiness, Verifier};
use blogmesh::test_utils::{InMemoryBlogRepository, StaticReadiness, blog_state};
use common::{ALICE_TOKEN, BOB_TOKEN, empty_request, json_request, send, users};
use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn blog_body(title: &str) -> Value {
    json!({
        "title": title,
        "content": "This is the content of the blog post.",
        "tags": ["rust", "axum"]
    })
}

#[tokio::test]
async fn test_create_without_token_is_unauthenticated() {
    let users = users();
    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = init_blog_app(blog_state(blogs.clone(), users.verifier.clone()), None);

    let (status, body) = send(&app, json_request("POST", "/api/blogs", None, blog_body("Hello world"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");
    assert!(blogs.is_empty().await);
    assert_eq!(users.verifier.calls(), 0);
}

#[tokio::test]
async fn test_update_and_delete_without_token_are_unauthenticated() {
    let users = users();
    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = init_blog_app(blog_state(blogs.clone(), users.verifier.clone()), None);

    let (_, created) = send(
        &app,
        json_request("POST", "/api/blogs", Some(ALICE_TOKEN), blog_body("Kept title")),
    )
    .await;
    let id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let uri = format!("/api/blogs/{}", id);
    let calls = users.verifier.calls();

    let (status, body) = send(&app, json_request("PUT", &uri, None, blog_body("Anonymous edit"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");

    let (status, body) = send(&app, empty_request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");

    assert_eq!(users.verifier.calls(), calls);
    assert_eq!(blogs.get(id).await.unwrap().title, "Kept title");
}

#[tokio::test]
async fn test_invalid_token_is_unauthenticated() {
    let users = users();
    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = init_blog_app(blog_state(blogs.clone(), users.verifier.clone()), None);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/blogs", Some("forged"), blog_body("Hello world")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");
    assert!(blogs.is_empty().await);
}

#[tokio::test]
async fn test_owner_updates_and_other_user_is_forbidden() {
    let users = users();
    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = init_blog_app(blog_state(blogs.clone(), users.verifier.clone()), None);

    let (status, created) = send(
        &app,
        json_request("POST", "/api/blogs", Some(ALICE_TOKEN), blog_body("First title")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["author"], users.alice.id.to_string());
    assert_eq!(created["author_name"], "alice");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/blogs/{}", id),
            Some(ALICE_TOKEN),
            blog_body("Second title"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Second title");

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/blogs/{}", id),
            Some(BOB_TOKEN),
            blog_body("Hijacked title"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to update this blog");

    let (status, current) = send(&app, empty_request("GET", &format!("/api/blogs/{}", id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["title"], "Second title");
    assert_eq!(current["author"], users.alice.id.to_string());
}

#[tokio::test]
async fn test_delete_requires_ownership() {
    let users = users();
    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = init_blog_app(blog_state(blogs.clone(), users.verifier.clone()), None);

    let (_, created) = send(
        &app,
        json_request("POST", "/api/blogs", Some(ALICE_TOKEN), blog_body("Doomed post")),
    )
    .await;
    let id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let uri = format!("/api/blogs/{}", id);

    let (status, _) = send(&app, empty_request("DELETE", &uri, Some(BOB_TOKEN))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(blogs.get(id).await.is_some());

    let (status, body) = send(&app, empty_request("DELETE", &uri, Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blog deleted successfully");

    let (status, body) = send(&app, empty_request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog not found");
}

#[tokio::test]
async fn test_mutating_missing_blog_is_not_found() {
    let users = users();
    let app = init_blog_app(
        blog_state(Arc::new(InMemoryBlogRepository::default()), users.verifier.clone()),
        None,
    );
    let uri = format!("/api/blogs/{}", Uuid::new_v4());

    let (status, _) = send(&app, json_request("PUT", &uri, Some(ALICE_TOKEN), blog_body("Whatever"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, empty_request("DELETE", &uri, Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let users = users();
    let app = init_blog_app(
        blog_state(Arc::new(InMemoryBlogRepository::default()), users.verifier.clone()),
        None,
    );

    let (status, body) = send(&app, empty_request("GET", "/api/blogs/not-a-uuid", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid id");

    let (status, body) = send(&app, empty_request("DELETE", "/api/blogs/not-a-uuid", Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid id");
}

#[tokio::test]
async fn test_list_is_public_and_newest_first() {
    let users = users();
    let app = init_blog_app(
        blog_state(Arc::new(InMemoryBlogRepository::default()), users.verifier.clone()),
        None,
    );

    send(&app, json_request("POST", "/api/blogs", Some(ALICE_TOKEN), blog_body("Older post"))).await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    send(&app, json_request("POST", "/api/blogs", Some(BOB_TOKEN), blog_body("Newer post"))).await;

    let (status, body) = send(&app, empty_request("GET", "/api/blogs", None)).await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newer post", "Older post"]);
}

#[tokio::test]
async fn test_validation_errors() {
    let users = users();
    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = init_blog_app(blog_state(blogs.clone(), users.verifier.clone()), None);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/blogs", Some(ALICE_TOKEN), blog_body("Hi")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Title must be 3-200 characters");

    let (status, body) = send(
        &app,
        json_request("POST", "/api/blogs", Some(ALICE_TOKEN), blog_body("   ab   ")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Title must be 3-200 characters");

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/blogs",
            Some(ALICE_TOKEN),
            json!({"title": "Hello world", "content": "Long enough content"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "tags is required");

    assert!(blogs.is_empty().await);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let users = users();
    let readiness = StaticReadiness::new(true);
    let app = init_blog_app(
        BlogState {
            blogs: Arc::new(InMemoryBlogRepository::default()),
            verifier: Verifier(users.verifier.clone()),
            cors_config: CorsConfig::default(),
            readiness: Readiness::new("blog-service", readiness.clone()),
        },
        None,
    );

    let (status, body) = send(&app, empty_request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "OK", "service": "blog-service"}));

    let (status, body) = send(&app, empty_request("GET", "/ready", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "connected");

    readiness.set(false);

    let (status, body) = send(&app, empty_request("GET", "/ready", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "ERROR");
    assert_eq!(body["database"], "disconnected");

    let (status, _) = send(&app, empty_request("GET", "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
}

fn remote_blog_app(auth_url: &str, timeout: Duration, blogs: Arc<InMemoryBlogRepository>) -> axum::Router {
    let verifier = RemoteTokenVerifier::with_timeout(auth_url, timeout).unwrap();
    init_blog_app(
        BlogState {
            blogs,
            verifier: Verifier::new(verifier),
            cors_config: CorsConfig::default(),
            readiness: Readiness::new("blog-service", StaticReadiness::new(true)),
        },
        None,
    )
}

#[tokio::test]
async fn test_remote_verification_resolves_identity() {
    let auth = MockServer::start().await;
    let user_id = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"_id": user_id, "username": "carol", "email": "carol@example.com"}
        })))
        .expect(1)
        .mount(&auth)
        .await;

    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = remote_blog_app(&auth.uri(), Duration::from_secs(2), blogs.clone());

    let (status, body) = send(
        &app,
        json_request("POST", "/api/blogs", Some("real-token"), blog_body("Remote post")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"], user_id.to_string());
    assert_eq!(body["author_name"], "carol");
}

#[tokio::test]
async fn test_unreachable_auth_service_is_unauthenticated() {
    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = remote_blog_app("http://127.0.0.1:1", Duration::from_millis(500), blogs.clone());

    let (status, body) = send(
        &app,
        json_request("POST", "/api/blogs", Some("some-token"), blog_body("Lost post")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");
    assert!(blogs.is_empty().await);
}

#[tokio::test]
async fn test_slow_auth_service_is_bounded() {
    let auth = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(VERIFY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"user": {"_id": Uuid::new_v4(), "username": "slow"}}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&auth)
        .await;

    let blogs = Arc::new(InMemoryBlogRepository::default());
    let app = remote_blog_app(&auth.uri(), Duration::from_millis(200), blogs.clone());

    let started = std::time::Instant::now();
    let (status, _) = send(
        &app,
        json_request("POST", "/api/blogs", Some("some-token"), blog_body("Slow post")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(blogs.is_empty().await);
}
