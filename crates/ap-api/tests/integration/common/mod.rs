//! Common test utilities for integration tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use ap_api::{routes, AppState};
use ap_core::{hash_password, User, UserStore};

/// Known credentials provisioned into every test router.
pub const TEST_USER: &str = "alice";
pub const TEST_PASSWORD: &str = "Wonderland-9";

/// A provisioned but disabled account.
pub const DISABLED_USER: &str = "mallory";
pub const DISABLED_PASSWORD: &str = "LockedOut-9";

/// Builds a router over fresh in-memory stores with two provisioned
/// identities: an enabled one and a disabled one.
pub async fn create_test_router() -> (Router, AppState) {
    let state = AppState::in_memory(b"integration-test-secret");

    let alice = User::new(TEST_USER, hash_password(TEST_PASSWORD).unwrap());
    state.users.insert(&alice).await.unwrap();

    let mut mallory = User::new(DISABLED_USER, hash_password(DISABLED_PASSWORD).unwrap());
    mallory.disabled = true;
    state.users.insert(&mallory).await.unwrap();

    (routes::create_router(state.clone()), state)
}

/// Builds a GET request without a body.
pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Builds a DELETE request without a body.
pub fn delete_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::DELETE).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Builds a JSON request with the given method and body.
pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Builds a form-encoded POST request.
pub fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap()
}

/// Sends a request and returns the status with the JSON body (or `Null`
/// for empty bodies).
pub async fn send_request(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Logs in with the given credentials and returns the bearer token.
pub async fn login(app: Router, username: &str, password: &str) -> String {
    let (status, body) = send_request(
        app,
        form_request("/token", &[("username", username), ("password", password)]),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login should succeed: {body}");
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

/// A complete asset creation body.
pub fn complete_asset_body(asset_id: i64) -> Value {
    serde_json::json!({
        "asset_id": asset_id,
        "name": format!("Asset{asset_id}"),
        "asset_type": "Pump",
        "location": "Plant 3",
        "purchase_date": "2-3-2024",
        "initial_cost": 4200.0,
        "operational_status": "Operational",
    })
}

/// A complete metric creation body.
pub fn complete_metric_body(asset_id: i64, failure_rate: f64) -> Value {
    serde_json::json!({
        "asset_id": asset_id,
        "uptime": 95.0,
        "downtime": 5.0,
        "maintenance_cost": 300.0,
        "failure_rate": failure_rate,
        "efficiency": 88.0,
    })
}
