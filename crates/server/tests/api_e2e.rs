//! HTTP-level tests driving the router in-process

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use forecast_server::{app, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use algorithm_facade::ForecastConfig;

fn test_app() -> axum::Router {
    let config = ForecastConfig::new()
        .with_units(8, 4)
        .with_epochs(10)
        .with_seed(3);
    app(AppState::new(config).unwrap())
}

async fn post_forecast(body: &str) -> (StatusCode, Vec<u8>) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/forecast")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn forecast_returns_requested_steps() {
    let (status, body) = post_forecast(r#"{"series":[1,2,3,4,5,6,7,8,9,10],"steps":2}"#).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    let forecast = body["forecast"].as_array().unwrap();
    assert_eq!(forecast.len(), 2);
    assert!(forecast.iter().all(|v| v.as_f64().unwrap().is_finite()));
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn forecast_defaults_to_three_steps() {
    let (status, body) = post_forecast(r#"{"series":[5.0,3.0,4.0,6.0,5.5,4.5]}"#).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["forecast"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn forecast_zero_steps_is_empty() {
    let (status, body) = post_forecast(r#"{"series":[1,2,3,4,5],"steps":0}"#).await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({"forecast": []}));
}

#[tokio::test]
async fn forecast_short_series_is_unprocessable() {
    let (status, body) = post_forecast(r#"{"series":[1,2,3],"steps":2}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body["error"],
        "Insufficient data: need at least 4 points, got 3"
    );
}

#[tokio::test]
async fn forecast_huge_steps_is_unprocessable() {
    let (status, body) =
        post_forecast(r#"{"series":[1,2,3,4,5,6,7,8,9,10],"steps":1000000000000}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body["error"],
        "Invalid parameter 'steps': must be at most 1000, got 1000000000000"
    );
}

#[tokio::test]
async fn forecast_steps_at_limit_is_accepted() {
    let config = ForecastConfig::new()
        .with_units(4, 2)
        .with_epochs(2)
        .with_max_steps(5)
        .with_seed(3);
    let response = app(AppState::new(config).unwrap())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/forecast")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"series":[1,2,3,4,5],"steps":5}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["forecast"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn forecast_missing_series_is_client_error() {
    let (status, _) = post_forecast(r#"{"steps":2}"#).await;
    assert!(status.is_client_error(), "unexpected status {status}");
}

#[tokio::test]
async fn forecast_malformed_json_is_client_error() {
    let (status, _) = post_forecast("{not json").await;
    assert!(status.is_client_error(), "unexpected status {status}");
}

#[tokio::test]
async fn forecast_rejects_get() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/forecast")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn health_endpoints_report_alive() {
    for uri in ["/health", "/health/live"] {
        let (status, body) = get_json(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "alive");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}

#[tokio::test]
async fn readiness_runs_algorithm_check() {
    let (status, body) = get_json("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"][1]["name"], "algorithms");
    assert_eq!(body["checks"][1]["status"], "healthy");
}
