use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_status, trigger_run};

pub fn init_cron_router() -> Router<AppState> {
    Router::new()
        .route("/trigger", post(trigger_run))
        .route("/status", get(get_status))
}
