pub mod dataflows;
pub mod error;
pub mod extract;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::infrastructure::AppState;
use crate::services::Dataplane;

pub fn api_router(dataplane: Dataplane) -> Router {
    api_router_with_state(AppState::new(dataplane))
}

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Data Plane Signaling
        .route("/v1/dataflows/prepare", post(dataflows::prepare))
        .route("/v1/dataflows/start", post(dataflows::start))
        .route("/v1/dataflows/:flow_id/started", post(dataflows::started))
        .route("/v1/dataflows/:flow_id/completed", post(dataflows::completed))
        .route("/v1/dataflows/:flow_id/terminate", post(dataflows::terminate))
        .route("/v1/dataflows/:flow_id/status", get(dataflows::status))
        .with_state(state)
}
