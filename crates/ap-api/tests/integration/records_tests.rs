//! Record CRUD integration tests for both entity kinds.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::common::{
    complete_asset_body, complete_metric_body, create_test_router, delete_request, get_request,
    json_request, login, send_request, TEST_PASSWORD, TEST_USER,
};

#[tokio::test]
async fn test_create_then_read_asset_round_trip() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let body = complete_asset_body(1);
    let (status, created) = send_request(
        app.clone(),
        json_request(Method::POST, "/api/v1/assets", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");

    let (status, read_back) =
        send_request(app, get_request("/api/v1/assets/1", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    // Every supplied field comes back identically; nothing extra leaks.
    assert_eq!(read_back, body);
}

#[tokio::test]
async fn test_create_duplicate_asset_conflicts() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let body = complete_asset_body(1);
    let (status, _) = send_request(
        app.clone(),
        json_request(Method::POST, "/api/v1/assets", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send_request(
        app,
        json_request(Method::POST, "/api/v1/assets", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_incomplete_asset_rejected() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let mut body = complete_asset_body(1);
    body.as_object_mut().unwrap().remove("location");

    let (status, error) = send_request(
        app.clone(),
        json_request(Method::POST, "/api/v1/assets", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "UNPROCESSABLE_ENTITY");

    // An explicit null does not count as present either.
    let mut body = complete_asset_body(2);
    body["location"] = serde_json::Value::Null;
    let (status, _) = send_request(
        app,
        json_request(Method::POST, "/api/v1/assets", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_asset_nonpositive_id_rejected() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let body = complete_asset_body(0);
    let (status, _) = send_request(
        app,
        json_request(Method::POST, "/api/v1/assets", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_read_missing_asset_not_found() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let (status, body) =
        send_request(app, get_request("/api/v1/assets/99", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_asset_merges_supplied_fields() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let (status, _) = send_request(
        app.clone(),
        json_request(
            Method::POST,
            "/api/v1/assets",
            Some(&token),
            &complete_asset_body(1),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let patch = json!({ "operational_status": "Non-operational" });
    let (status, _) = send_request(
        app.clone(),
        json_request(Method::PUT, "/api/v1/assets/1", Some(&token), &patch),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, read_back) =
        send_request(app, get_request("/api/v1/assets/1", Some(&token))).await;
    assert_eq!(read_back["operational_status"], "Non-operational");
    // Fields not in the patch keep their stored values.
    assert_eq!(read_back["name"], "Asset1");
    assert_eq!(read_back["initial_cost"], 4200.0);
}

#[tokio::test]
async fn test_update_missing_asset_is_a_no_op() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let patch = json!({ "name": "ghost" });
    let (status, _) = send_request(
        app.clone(),
        json_request(Method::PUT, "/api/v1/assets/42", Some(&token), &patch),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The no-op created nothing.
    let (status, _) =
        send_request(app, get_request("/api/v1/assets/42", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_asset_is_idempotent() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let (status, _) = send_request(
        app.clone(),
        json_request(
            Method::POST,
            "/api/v1/assets",
            Some(&token),
            &complete_asset_body(1),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) =
        send_request(app.clone(), delete_request("/api/v1/assets/1", Some(&token))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Deleting the now-missing record still succeeds.
    let (status, _) =
        send_request(app.clone(), delete_request("/api/v1/assets/1", Some(&token))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        send_request(app, get_request("/api/v1/assets/1", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metric_crud_cycle() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    // No asset record is required for a metric to be accepted.
    let body = complete_metric_body(7, 0.8);
    let (status, _) = send_request(
        app.clone(),
        json_request(Method::POST, "/api/v1/metrics", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, read_back) =
        send_request(app.clone(), get_request("/api/v1/metrics/7", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read_back, body);

    // One metric record per asset id.
    let (status, _) = send_request(
        app.clone(),
        json_request(
            Method::POST,
            "/api/v1/metrics",
            Some(&token),
            &complete_metric_body(7, 1.5),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let patch = json!({ "failure_rate": 2.5 });
    let (status, _) = send_request(
        app.clone(),
        json_request(Method::PUT, "/api/v1/metrics/7", Some(&token), &patch),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, updated) =
        send_request(app.clone(), get_request("/api/v1/metrics/7", Some(&token))).await;
    assert_eq!(updated["failure_rate"], 2.5);
    assert_eq!(updated["uptime"], 95.0);

    let (status, _) =
        send_request(app.clone(), delete_request("/api/v1/metrics/7", Some(&token))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        send_request(app, get_request("/api/v1/metrics/7", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_incomplete_metric_rejected() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let mut body = complete_metric_body(1, 0.4);
    body.as_object_mut().unwrap().remove("efficiency");

    let (status, _) = send_request(
        app,
        json_request(Method::POST, "/api/v1/metrics", Some(&token), &body),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
