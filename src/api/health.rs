use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::services::Dataplane;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check(State(dataplane): State<Dataplane>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "dataplane",
        "dataplaneId": dataplane.id(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
