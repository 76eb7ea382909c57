//! Authentication and authorization integration tests.

use axum::http::StatusCode;
use std::time::Duration;

use super::common::{
    complete_asset_body, create_test_router, form_request, get_request, json_request, login,
    send_request, DISABLED_PASSWORD, DISABLED_USER, TEST_PASSWORD, TEST_USER,
};

#[tokio::test]
async fn test_login_issues_bearer_token() {
    let (app, _state) = create_test_router().await;
    let token = login(app, TEST_USER, TEST_PASSWORD).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let (app, _state) = create_test_router().await;

    let (status, body) = send_request(
        app,
        form_request("/token", &[("username", TEST_USER), ("password", "nope")]),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_user_indistinguishable_from_wrong_password() {
    let (app, _state) = create_test_router().await;

    let (unknown_status, unknown_body) = send_request(
        app.clone(),
        form_request("/token", &[("username", "nobody"), ("password", "nope")]),
    )
    .await;
    let (wrong_status, wrong_body) = send_request(
        app,
        form_request("/token", &[("username", TEST_USER), ("password", "nope")]),
    )
    .await;

    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body["code"], wrong_body["code"]);
    assert_eq!(unknown_body["message"], wrong_body["message"]);
}

#[tokio::test]
async fn test_protected_route_without_token_rejected() {
    let (app, _state) = create_test_router().await;

    let (status, body) = send_request(app, get_request("/api/v1/assets/1", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token_rejected() {
    let (app, _state) = create_test_router().await;

    let (status, _body) =
        send_request(app, get_request("/api/v1/assets/1", Some("not.a.token"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (app, state) = create_test_router().await;

    // A zero-ttl token is already expired the moment it is issued.
    let token = state.tokens.issue(TEST_USER, Duration::ZERO).unwrap();
    let (status, _body) =
        send_request(app, get_request("/api/v1/assets/1", Some(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_deleted_identity_rejected() {
    let (app, state) = create_test_router().await;

    // Valid signature, but the subject resolves to nobody.
    let token = state.tokens.issue("ghost", state.token_ttl).unwrap();
    let (status, _body) =
        send_request(app, get_request("/api/v1/assets/1", Some(&token))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_disabled_account_can_login_but_not_act() {
    let (app, _state) = create_test_router().await;

    // Authentication itself succeeds for a disabled account.
    let token = login(app.clone(), DISABLED_USER, DISABLED_PASSWORD).await;

    // Authorization is then denied, distinctly from 401.
    let (status, body) =
        send_request(app, get_request("/api/v1/assets/1", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "ACCOUNT_DISABLED");
}

#[tokio::test]
async fn test_auth_runs_before_entity_logic() {
    let (app, _state) = create_test_router().await;

    // Even a create for a duplicate id fails with 401 first when no token
    // is presented.
    let (status, _body) = send_request(
        app,
        json_request(
            axum::http::Method::POST,
            "/api/v1/assets",
            None,
            &complete_asset_body(1),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let (app, _state) = create_test_router().await;

    let (status, body) = send_request(app, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
