//! API integration tests driving the router in-process over the memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};
use tower::ServiceExt;

use nextbeer_analytics::{
    api,
    models::claims::{Claims, ADMIN_ROLE},
    repository::{MemoryScanStore, ScanStore},
    services::{clock::FixedClock, Services},
    AppConfig, AppState,
};

const SECRET: &str = "integration-secret";

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid timestamp")
}

/// Router over a memory store seeded with `scans`, clock frozen at `now`
async fn app(now: NaiveDateTime, scans: &[NaiveDateTime]) -> (Router, Arc<MemoryScanStore>) {
    let store = Arc::new(MemoryScanStore::new());
    for t in scans {
        store.append(*t).await.expect("seed scan");
    }

    let mut config = AppConfig::default();
    config.auth.jwt_secret = SECRET.to_string();

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::with_store(store.clone(), Arc::new(FixedClock(now)))),
    };
    (api::create_router(state), store)
}

fn token(role: &str) -> String {
    Claims::new("owner@nextbeer", role, 1)
        .create_token(SECRET)
        .expect("token")
}

fn post_json(uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(t) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(t) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    builder.body(Body::empty()).expect("request")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = app(at(2024, 3, 1, 12, 0), &[]).await;
    let (status, body) = send(app.clone(), get("/api/v1/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(app, get("/api/v1/ready", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_track_scan_is_public() {
    let (app, store) = app(at(2024, 3, 1, 12, 0), &[]).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/qr-track")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/qr-track")
        .body(Body::empty())
        .expect("request");
    send(app, request).await;

    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_dashboard_requires_token() {
    let (app, _) = app(at(2024, 3, 1, 12, 0), &[]).await;

    let (status, body) = send(
        app.clone(),
        post_json("/api/v1/dashboard/stats", json!({"rangeType": "LAST_WEEK"}), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2);

    let (status, _) = send(app, get("/api/v1/dashboard/chart/hourly-today", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_requires_admin() {
    let (app, _) = app(at(2024, 3, 1, 12, 0), &[]).await;
    let staff = token("STAFF");

    let (status, _) = send(app, get("/api/v1/dashboard/chart/hourly-today", Some(&staff))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_dashboard_stats_custom() {
    let scans = [at(2024, 1, 10, 9, 0), at(2024, 1, 12, 23, 59), at(2024, 1, 13, 0, 0)];
    let (app, _) = app(at(2024, 6, 1, 12, 0), &scans).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(
        app,
        post_json(
            "/api/v1/dashboard/stats",
            json!({"rangeType": "CUSTOM", "startDate": "2024-01-10", "endDate": "2024-01-12"}),
            Some(&admin),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "totalScans": 2,
            "startDate": "2024-01-10",
            "endDate": "2024-01-12",
            "rangeType": "CUSTOM"
        })
    );
}

#[tokio::test]
async fn test_chart_custom_is_zero_filled() {
    let scans = [at(2024, 1, 11, 9, 0), at(2024, 1, 11, 10, 0)];
    let (app, _) = app(at(2024, 6, 1, 12, 0), &scans).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(
        app,
        post_json(
            "/api/v1/dashboard/chart",
            json!({"rangeType": "CUSTOM", "startDate": "2024-01-10", "endDate": "2024-01-12"}),
            Some(&admin),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"date": "2024-01-10", "scans": 0},
            {"date": "2024-01-11", "scans": 2},
            {"date": "2024-01-12", "scans": 0}
        ])
    );
}

#[tokio::test]
async fn test_chart_custom_missing_end_date() {
    let (app, _) = app(at(2024, 6, 1, 12, 0), &[]).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(
        app,
        post_json(
            "/api/v1/dashboard/chart",
            json!({"rangeType": "CUSTOM", "startDate": "2024-01-10"}),
            Some(&admin),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_unknown_range_type() {
    let (app, _) = app(at(2024, 6, 1, 12, 0), &[]).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(
        app,
        post_json("/api/v1/dashboard/stats", json!({"rangeType": "LAST_DECADE"}), Some(&admin)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("LAST_DECADE"));
}

#[tokio::test]
async fn test_hourly_today() {
    let scans = [
        at(2024, 3, 1, 8, 0),
        at(2024, 3, 1, 8, 30),
        at(2024, 3, 1, 14, 0),
        at(2024, 2, 29, 8, 0),
    ];
    let (app, _) = app(at(2024, 3, 1, 20, 0), &scans).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(app, get("/api/v1/dashboard/chart/hourly-today", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);

    let points = body.as_array().expect("array");
    assert_eq!(points.len(), 24);
    for (i, point) in points.iter().enumerate() {
        assert_eq!(point["hour"], i);
    }
    assert_eq!(points[8]["scans"], 2);
    assert_eq!(points[14]["scans"], 1);
    assert_eq!(points[9]["scans"], 0);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = app(at(2024, 3, 1, 12, 0), &[]).await;
    let (status, body) = send(app, get("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/dashboard/stats"].is_object());
}

#[tokio::test]
async fn test_impossible_custom_date_is_bad_value() {
    let (app, _) = app(at(2024, 6, 1, 12, 0), &[]).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(
        app,
        post_json(
            "/api/v1/dashboard/chart",
            json!({"rangeType": "CUSTOM", "startDate": "2024-02-30", "endDate": "2024-03-02"}),
            Some(&admin),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
    assert_eq!(body["error"], "BadValue");
    assert!(body["message"].as_str().unwrap_or_default().contains("startDate"));
}

#[tokio::test]
async fn test_non_string_range_type_is_bad_value() {
    let (app, _) = app(at(2024, 6, 1, 12, 0), &[]).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(
        app,
        post_json("/api/v1/dashboard/stats", json!({"rangeType": 5}), Some(&admin)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_unparseable_body_is_bad_value() {
    let (app, _) = app(at(2024, 6, 1, 12, 0), &[]).await;
    let admin = token(ADMIN_ROLE);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/dashboard/stats")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .body(Body::from("{\"rangeType\":"))
        .expect("request");
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 18);
}

#[tokio::test]
async fn test_oversized_custom_range_rejected() {
    let (app, _) = app(at(2024, 6, 1, 12, 0), &[]).await;
    let admin = token(ADMIN_ROLE);

    let (status, body) = send(
        app,
        post_json(
            "/api/v1/dashboard/chart",
            json!({"rangeType": "CUSTOM", "startDate": "0001-01-01", "endDate": "9999-12-31"}),
            Some(&admin),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}
