mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::memory::MemoryStore;
use common::mocks::StubSource;
use common::{month_record, send, setup_test_app, year_record};
use tower::ServiceExt;

fn app_with(store: MemoryStore, fiscal_years: &[&str]) -> common::TestApp {
    setup_test_app(store, StubSource::new(), fiscal_years, Duration::ZERO)
}

#[tokio::test]
async fn test_health() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    let (status, body) = send(&app.router, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "ok");
    assert_eq!(body["data"], serde_json::json!({}));
}

#[tokio::test]
async fn test_district_year_range_preserves_order_and_skips_missing() {
    let store = MemoryStore::new();
    store.insert("1810_FY2023-2024", year_record("1810", "2023-2024", 20.0));
    store.insert("1810_FY2022-2023", year_record("1810", "2022-2023", 10.0));
    store.insert("1810_FY2024-2025", year_record("1810", "2024-2025", 30.0));
    let app = app_with(store, &["2024-2025"]);

    let (status, body) = send(
        &app.router,
        "GET",
        "/district/1810?type=year&startyear=2022&endyear=2024",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["fin_year"], "2022-2023");
    assert_eq!(data[1]["fin_year"], "2023-2024");
    assert_eq!(data[0]["type"], "year");
    assert!(data[0].get("month").is_none());
}

#[tokio::test]
async fn test_district_missing_key_is_omitted() {
    let store = MemoryStore::new();
    store.insert("1810_FY2023-2024", year_record("1810", "2023-2024", 20.0));
    let app = app_with(store, &["2024-2025"]);

    let (status, body) =
        send(&app.router, "GET", "/district/1810?startyear=2022&endyear=2024").await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["fin_year"], "2023-2024");
}

#[tokio::test]
async fn test_district_month_range_in_calendar_order() {
    let store = MemoryStore::new();
    store.insert("1810_FY2022-2023_Mar", month_record("1810", "2022-2023", "Mar", 3.0));
    store.insert("1810_FY2022-2023_Jan", month_record("1810", "2022-2023", "Jan", 1.0));
    store.insert("1810_FY2022-2023", year_record("1810", "2022-2023", 4.0));
    let app = app_with(store, &["2024-2025"]);

    let (status, body) = send(
        &app.router,
        "GET",
        "/district/1810?type=Month&startyear=2022&endyear=2023",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["month"], "Jan");
    assert_eq!(data[1]["month"], "Mar");
    assert_eq!(data[1]["type"], "month");
}

#[tokio::test]
async fn test_district_missing_years_rejected_without_store_access() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    for uri in [
        "/district/1810",
        "/district/1810?startyear=2022",
        "/district/1810?endyear=2024&type=bogus",
    ] {
        let (status, body) = send(&app.router, "GET", uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "startyear and endyear required (integers)");
    }

    assert_eq!(app.store.reads(), 0);
}

#[tokio::test]
async fn test_district_invalid_years_rejected() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    for uri in [
        "/district/1810?startyear=twenty&endyear=2024",
        "/district/1810?startyear=2025&endyear=2024",
    ] {
        let (status, body) = send(&app.router, "GET", uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "invalid startyear/endyear");
    }

    assert_eq!(app.store.reads(), 0);
}

#[tokio::test]
async fn test_district_span_over_limit_rejected() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    for uri in [
        "/district/1810?type=month&startyear=0&endyear=200000",
        "/district/1810?startyear=-2147483648&endyear=2147483647",
        "/district/1810?startyear=1974&endyear=2025",
    ] {
        let (status, body) = send(&app.router, "GET", uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "invalid startyear/endyear");
    }
    assert_eq!(app.store.reads(), 0);

    let (status, _) = send(&app.router, "GET", "/district/1810?startyear=1975&endyear=2025").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.store.reads(), 1);
}

#[tokio::test]
async fn test_malformed_query_uses_error_envelope() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    for uri in [
        "/district/1810?startyear=2022&startyear=2023&endyear=2024",
        "/state/all?state_name=maharashtra&state_name=maharashtra",
    ] {
        let (status, body) = send(&app.router, "GET", uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert!(
            body["message"].as_str().unwrap().contains("duplicate field"),
            "{uri}: {body}"
        );
        assert!(body["data"].is_null());
    }

    assert_eq!(app.store.reads(), 0);
}

#[tokio::test]
async fn test_district_unknown_type_rejected() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    let (status, body) = send(
        &app.router,
        "GET",
        "/district/1810?type=weekly&startyear=2022&endyear=2024",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.store.reads(), 0);
}

#[tokio::test]
async fn test_district_empty_range_returns_no_rows() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    let (status, body) =
        send(&app.router, "GET", "/district/1810?startyear=2024&endyear=2024").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "no rows found");
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_state_all_rejects_other_states() {
    let store = MemoryStore::new();
    store.insert("1810_FY2024-2025", year_record("1810", "2024-2025", 1.0));
    let app = app_with(store, &["2024-2025"]);

    let (status, body) = send(&app.router, "GET", "/state/all?state_name=Gujarat").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "only maharashtra supported in MVP");
    assert_eq!(app.store.reads(), 0);
}

#[tokio::test]
async fn test_state_all_requires_state_name() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    let (status, body) = send(&app.router, "GET", "/state/all?fy=2024-2025").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "state_name required");
}

#[tokio::test]
async fn test_state_all_requires_fy_when_none_configured() {
    let app = app_with(MemoryStore::new(), &[]);

    let (status, body) = send(&app.router, "GET", "/state/all?state_name=maharashtra").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "fy required");
}

#[tokio::test]
async fn test_state_all_defaults_to_newest_fiscal_year_in_district_order() {
    let store = MemoryStore::new();
    store.insert("1810_FY2024-2025", year_record("1810", "2024-2025", 2.0));
    store.insert("1802_FY2024-2025", year_record("1802", "2024-2025", 1.0));
    store.insert("1802_FY2023-2024", year_record("1802", "2023-2024", 9.0));
    let app = app_with(store, &["2024-2025", "2023-2024"]);

    let (status, body) = send(&app.router, "GET", "/state/all?state_name=MAHARASHTRA").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ok");
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["district_code"], "1802");
    assert_eq!(data[1]["district_code"], "1810");
    assert!(data.iter().all(|r| r["fin_year"] == "2024-2025"));
}

#[tokio::test]
async fn test_state_all_explicit_fy() {
    let store = MemoryStore::new();
    store.insert("1802_FY2023-2024", year_record("1802", "2023-2024", 9.0));
    let app = app_with(store, &["2024-2025"]);

    let (status, body) = send(
        &app.router,
        "GET",
        "/state/all?state_name=Maharashtra&fy=2023-2024",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["approved_labour_budget"], 9.0);
}

#[tokio::test]
async fn test_state_all_empty_cache() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    let (status, body) = send(&app.router, "GET", "/state/all?state_name=maharashtra").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "no rows found");
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_store_failure_is_generic_internal_error() {
    let store = MemoryStore::new();
    store.fail_reads(true);
    let app = app_with(store, &["2024-2025"]);

    let (status, body) = send(&app.router, "GET", "/state/all?state_name=maharashtra").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "internal error");

    let (status, body) =
        send(&app.router, "GET", "/district/1810?startyear=2022&endyear=2024").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "internal error");
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/state/all")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let app = app_with(MemoryStore::new(), &["2024-2025"]);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
