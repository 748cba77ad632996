pub mod controller;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(controller::health))
}
