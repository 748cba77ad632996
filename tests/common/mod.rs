pub mod memory;
pub mod mocks;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bharat_digital::bharat_config::{CorsConfig, ScheduleConfig};
use bharat_digital::bharat_models::{AggregateRecord, PeriodType};
use bharat_digital::router::init_router;
use bharat_digital::scheduler::Pipeline;
use bharat_digital::state::AppState;
use http_body_util::BodyExt;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use memory::MemoryStore;
use mocks::StubSource;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub source: Arc<StubSource>,
    pub pipeline: Arc<Pipeline>,
    pub shutdown: CancellationToken,
}

#[allow(dead_code)]
pub fn setup_test_app(
    store: MemoryStore,
    source: StubSource,
    fiscal_years: &[&str],
    fy_delay: Duration,
) -> TestApp {
    let store = Arc::new(store);
    let source = Arc::new(source);
    let fiscal_years: Vec<String> = fiscal_years.iter().map(|fy| fy.to_string()).collect();

    let pipeline = Arc::new(Pipeline::new(
        source.clone(),
        store.clone(),
        "MAHARASHTRA",
        fiscal_years.clone(),
        fy_delay,
    ));
    let schedule_config = ScheduleConfig {
        fiscal_years,
        fy_delay,
        run_on_startup: false,
        ..ScheduleConfig::default()
    };
    let shutdown = CancellationToken::new();

    let state = AppState::new(
        store.clone(),
        pipeline.clone(),
        schedule_config,
        CorsConfig::default(),
        shutdown.clone(),
    );

    TestApp {
        router: init_router(state),
        store,
        source,
        pipeline,
        shutdown,
    }
}

#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, body)
}

#[allow(dead_code)]
pub fn year_record(code: &str, fin_year: &str, budget: f64) -> AggregateRecord {
    AggregateRecord {
        approved_labour_budget: budget,
        ..AggregateRecord::year(code, &format!("District {code}"), fin_year)
    }
}

#[allow(dead_code)]
pub fn month_record(code: &str, fin_year: &str, month: &str, budget: f64) -> AggregateRecord {
    AggregateRecord {
        month: Some(month.to_string()),
        period_type: PeriodType::Month,
        ..year_record(code, fin_year, budget)
    }
}
