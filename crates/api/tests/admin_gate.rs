//! The bearer-token gate in front of `/api/v1/admin`.

mod common;

use axum::http::{Method, StatusCode};
use common::{authed, body_json, get, send, test_config, ADMIN_TOKEN};
use tourbook_api::config::ServerConfig;

fn gated_config() -> ServerConfig {
    ServerConfig {
        admin_token: Some(ADMIN_TOKEN.to_string()),
        ..test_config()
    }
}

#[tokio::test]
async fn admin_routes_require_token_when_configured() {
    let app = common::build_test_app_with(gated_config());

    let response = get(&app, "/api/v1/admin/tours").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let response = send(&app, authed(Method::GET, "/api/v1/admin/tours", "wrong")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, authed(Method::GET, "/api/v1/admin/tours", ADMIN_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, authed(Method::GET, "/api/v1/admin/inclusions", ADMIN_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_routes_stay_open() {
    let app = common::build_test_app_with(gated_config());
    assert_eq!(get(&app, "/api/v1/tours").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/api/v1/categories").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/health").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn gate_is_open_without_a_token() {
    let app = common::build_test_app();
    assert_eq!(get(&app, "/api/v1/admin/media").await.status(), StatusCode::OK);
}
