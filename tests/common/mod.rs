#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use blogmesh::blogmesh_core::Identity;
use blogmesh::test_utils::StaticTokenVerifier;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

pub struct Users {
    pub alice: Identity,
    pub bob: Identity,
    pub verifier: Arc<StaticTokenVerifier>,
}

/// Two users with their bearer tokens registered in a static verifier.
pub fn users() -> Users {
    let alice = Identity::new(Uuid::new_v4(), "alice");
    let bob = Identity::new(Uuid::new_v4(), "bob");
    let verifier = StaticTokenVerifier::new()
        .with_token(ALICE_TOKEN, alice.clone())
        .with_token(BOB_TOKEN, bob.clone());

    Users {
        alice,
        bob,
        verifier: Arc::new(verifier),
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Sends `request` and returns the status and JSON body (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", address)
}
