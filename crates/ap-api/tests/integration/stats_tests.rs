//! Summary statistics endpoint integration tests.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::common::{
    create_test_router, get_request, json_request, login, send_request, TEST_PASSWORD, TEST_USER,
};

#[tokio::test]
async fn test_stats_requires_token() {
    let (app, _state) = create_test_router().await;
    let (status, _) = send_request(app, get_request("/api/v1/stats", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stats_empty_collection_yields_zero_report() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    let (status, report) =
        send_request(app, get_request("/api/v1/stats", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report,
        json!({
            "avg_downtime": 0.0,
            "avg_uptime": 0.0,
            "total_maintenance_cost": 0.0,
            "failure_rate_threshold": 0.0,
            "high_failure_assets": [],
        })
    );
}

#[tokio::test]
async fn test_stats_small_collection_flags_all_positive_rates() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    for (id, rate) in [(1, 0.7), (2, 0.0), (3, 1.3)] {
        let body = json!({
            "asset_id": id,
            "uptime": 90.0,
            "downtime": 10.0,
            "maintenance_cost": 120.0,
            "failure_rate": rate,
            "efficiency": 85.0,
        });
        let (status, _) = send_request(
            app.clone(),
            json_request(Method::POST, "/api/v1/metrics", Some(&token), &body),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) =
        send_request(app, get_request("/api/v1/stats", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    // Fewer than 20 records: threshold 0, every strictly positive rate is
    // flagged, the zero-rate record is not.
    assert_eq!(report["failure_rate_threshold"], 0.0);
    assert_eq!(report["avg_downtime"], 10.0);
    assert_eq!(report["avg_uptime"], 90.0);
    assert_eq!(report["total_maintenance_cost"], 360.0);

    let flagged: Vec<i64> = report["high_failure_assets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["asset_id"].as_i64().unwrap())
        .collect();
    assert_eq!(flagged, vec![1, 3]);
}

#[tokio::test]
async fn test_stats_twenty_records_threshold_is_maximum() {
    let (app, _state) = create_test_router().await;
    let token = login(app.clone(), TEST_USER, TEST_PASSWORD).await;

    // Rates 5, 1, then eighteen 0.1s: with 20 records the top-5% subset is
    // the single highest rate, so the threshold is the maximum and no
    // record is strictly above it.
    let mut rates = vec![5.0, 1.0];
    rates.extend(std::iter::repeat(0.1).take(18));

    for (i, rate) in rates.iter().enumerate() {
        let body = json!({
            "asset_id": (i + 1) as i64,
            "uptime": 90.0,
            "downtime": 10.0,
            "maintenance_cost": 50.0,
            "failure_rate": rate,
            "efficiency": 85.0,
        });
        let (status, _) = send_request(
            app.clone(),
            json_request(Method::POST, "/api/v1/metrics", Some(&token), &body),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) =
        send_request(app, get_request("/api/v1/stats", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(report["failure_rate_threshold"], 5.0);
    assert_eq!(report["high_failure_assets"], json!([]));
    assert_eq!(report["total_maintenance_cost"], 1000.0);
}
