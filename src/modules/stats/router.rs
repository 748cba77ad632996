use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_district, get_state_all};

pub fn init_stats_router() -> Router<AppState> {
    Router::new()
        .route("/state/all", get(get_state_all))
        .route("/district/{districtcode}", get(get_district))
}
