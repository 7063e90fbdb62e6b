#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tourbook_api::config::ServerConfig;
use tourbook_api::router::build_app_router;
use tourbook_api::state::AppState;
use tourbook_db::MemoryCatalogStore;
use tourbook_storage::{BlobStore, MemoryBlobStore};

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build a test `ServerConfig` with safe defaults and no admin token.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 8 * 1024 * 1024,
        admin_token: None,
    }
}

/// The router plus handles on the in-memory backends, so tests can seed
/// data and inject failures.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCatalogStore>,
    pub blobs: Arc<MemoryBlobStore>,
}

impl TestApp {
    /// Store a small blob directly and return its public URL.
    pub async fn blobs_put(&self, key: &str) -> String {
        self.blobs.put(key, vec![1, 2, 3], "image/png").await.unwrap()
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over in-memory stores.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let store = Arc::new(MemoryCatalogStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let state = AppState {
        store: store.clone(),
        blobs: blobs.clone(),
        config: Arc::new(config.clone()),
    };
    TestApp {
        router: build_app_router(state, &config),
        store,
        blobs,
    }
}

/// Send a request through the router without a TCP listener.
pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None)).await
}

pub async fn delete(app: &TestApp, uri: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, None)).await
}

pub async fn post_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(body))).await
}

pub async fn put_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(body))).await
}

pub async fn patch_json(app: &TestApp, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::PATCH, uri, Some(body))).await
}

pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Same as [`request`] with a bearer token attached.
pub fn authed(method: Method, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a resource and return its JSON body, asserting 201.
pub async fn create(app: &TestApp, uri: &str, body: Value) -> Value {
    let response = post_json(app, uri, body).await;
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, axum::http::StatusCode::CREATED, "create {uri}: {json}");
    json
}

/// A minimal valid tour body.
pub fn tour_body(name: &str, category: &str, price: f64) -> Value {
    serde_json::json!({
        "name": name,
        "description": format!("{name} description"),
        "duration": "1 day",
        "price": price,
        "category": category,
        "tourType": "Day trip",
        "difficulty": "easy",
        "status": "active"
    })
}

/// `data:` URI for a small PNG-typed payload.
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";
