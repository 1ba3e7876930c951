mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use blogmesh::router::init_comment_app;
use blogmesh::test_utils::{InMemoryCommentRepository, StaticBlogDirectory, comment_state};
use common::{ALICE_TOKEN, BOB_TOKEN, empty_request, json_request, send, users};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_comment_on_existing_blog() {
    let users = users();
    let blog_id = Uuid::new_v4();
    let comments = Arc::new(InMemoryCommentRepository::default());
    let app = init_comment_app(
        comment_state(
            comments.clone(),
            StaticBlogDirectory::default().with_blog(blog_id),
            users.verifier.clone(),
        ),
        None,
    );

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/comments",
            Some(BOB_TOKEN),
            json!({"content": "  Nice post!  ", "blog_id": blog_id}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "Nice post!");
    assert_eq!(body["blog"], blog_id.to_string());
    assert_eq!(body["author"], users.bob.id.to_string());
    assert_eq!(body["author_name"], "bob");
    assert_eq!(comments.len().await, 1);
}

#[tokio::test]
async fn test_comment_on_missing_blog_is_not_found() {
    let users = users();
    let comments = Arc::new(InMemoryCommentRepository::default());
    let app = init_comment_app(
        comment_state(comments.clone(), StaticBlogDirectory::default(), users.verifier.clone()),
        None,
    );

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/comments",
            Some(ALICE_TOKEN),
            json!({"content": "Hello", "blog_id": Uuid::new_v4()}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog not found");
    assert!(comments.is_empty().await);
}

#[tokio::test]
async fn test_comment_requires_authentication() {
    let users = users();
    let blog_id = Uuid::new_v4();
    let comments = Arc::new(InMemoryCommentRepository::default());
    let app = init_comment_app(
        comment_state(
            comments.clone(),
            StaticBlogDirectory::default().with_blog(blog_id),
            users.verifier.clone(),
        ),
        None,
    );

    let (status, body) = send(
        &app,
        json_request("POST", "/api/comments", None, json!({"content": "Hi", "blog_id": blog_id})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");
    assert!(comments.is_empty().await);
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let users = users();
    let blog_id = Uuid::new_v4();
    let comments = Arc::new(InMemoryCommentRepository::default());
    let app = init_comment_app(
        comment_state(
            comments.clone(),
            StaticBlogDirectory::default().with_blog(blog_id),
            users.verifier.clone(),
        ),
        None,
    );

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/comments",
            Some(ALICE_TOKEN),
            json!({"content": "    ", "blog_id": blog_id}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(comments.is_empty().await);
}

#[tokio::test]
async fn test_list_comments_for_blog_newest_first() {
    let users = users();
    let blog_id = Uuid::new_v4();
    let other_blog = Uuid::new_v4();
    let app = init_comment_app(
        comment_state(
            Arc::new(InMemoryCommentRepository::default()),
            StaticBlogDirectory::default()
                .with_blog(blog_id)
                .with_blog(other_blog),
            users.verifier.clone(),
        ),
        None,
    );

    for (token, content, blog) in [
        (ALICE_TOKEN, "first", blog_id),
        (BOB_TOKEN, "elsewhere", other_blog),
        (BOB_TOKEN, "second", blog_id),
    ] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/comments",
                Some(token),
                json!({"content": content, "blog_id": blog}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/api/comments/blog/{}", blog_id), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["second", "first"]);
}

#[tokio::test]
async fn test_only_author_can_edit_or_delete() {
    let users = users();
    let blog_id = Uuid::new_v4();
    let comments = Arc::new(InMemoryCommentRepository::default());
    let app = init_comment_app(
        comment_state(
            comments.clone(),
            StaticBlogDirectory::default().with_blog(blog_id),
            users.verifier.clone(),
        ),
        None,
    );

    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/api/comments",
            Some(ALICE_TOKEN),
            json!({"content": "Original", "blog_id": blog_id}),
        ),
    )
    .await;
    let id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let uri = format!("/api/comments/{}", id);

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(BOB_TOKEN), json!({"content": "Edited by bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized to update this comment");
    assert_eq!(comments.get(id).await.unwrap().content, "Original");

    let (status, body) = send(
        &app,
        json_request("PUT", &uri, Some(ALICE_TOKEN), json!({"content": "Edited"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Edited");

    let (status, _) = send(&app, empty_request("DELETE", &uri, Some(BOB_TOKEN))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(comments.get(id).await.is_some());

    let (status, body) = send(&app, empty_request("DELETE", &uri, Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Comment deleted");
    assert!(comments.is_empty().await);

    let (status, body) = send(&app, empty_request("DELETE", &uri, Some(ALICE_TOKEN))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Comment not found");
}

#[tokio::test]
async fn test_edit_and_delete_without_token_are_unauthenticated() {
    let users = users();
    let blog_id = Uuid::new_v4();
    let comments = Arc::new(InMemoryCommentRepository::default());
    let app = init_comment_app(
        comment_state(
            comments.clone(),
            StaticBlogDirectory::default().with_blog(blog_id),
            users.verifier.clone(),
        ),
        None,
    );

    let (_, created) = send(
        &app,
        json_request(
            "POST",
            "/api/comments",
            Some(ALICE_TOKEN),
            json!({"content": "Original", "blog_id": blog_id}),
        ),
    )
    .await;
    let id: Uuid = created["id"].as_str().unwrap().parse().unwrap();
    let uri = format!("/api/comments/{}", id);
    let calls = users.verifier.calls();

    let (status, body) = send(&app, json_request("PUT", &uri, None, json!({"content": "Edited"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");

    let (status, body) = send(&app, empty_request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Not authenticated");

    assert_eq!(users.verifier.calls(), calls);
    assert_eq!(comments.get(id).await.unwrap().content, "Original");
}
