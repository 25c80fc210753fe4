//! Data Plane Signaling endpoints, mounted under `/v1/dataflows`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::extract::{JsonOrDefault, ValidJson};
use crate::domain::DomainError;
use crate::models::{
    DataFlowPrepareMessage, DataFlowStartMessage, DataFlowStartedNotificationMessage,
    DataFlowState, DataFlowStatusResponseMessage, DataFlowTerminateMessage,
};
use crate::services::Dataplane;

#[utoipa::path(
    post,
    path = "/v1/dataflows/prepare",
    request_body = DataFlowPrepareMessage,
    responses(
        (status = 200, description = "Data flow prepared", body = DataFlowResponseMessage),
        (status = 202, description = "Preparation continues asynchronously", body = DataFlowResponseMessage),
        (status = 400, description = "Malformed message")
    )
)]
pub async fn prepare(
    State(dataplane): State<Dataplane>,
    ValidJson(message): ValidJson<DataFlowPrepareMessage>,
) -> Result<impl IntoResponse, DomainError> {
    let response = dataplane.prepare(message).await?;
    let status = if response.state == DataFlowState::Preparing {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

#[utoipa::path(
    post,
    path = "/v1/dataflows/start",
    request_body = DataFlowStartMessage,
    responses(
        (status = 200, description = "Data flow started", body = DataFlowResponseMessage),
        (status = 202, description = "Start continues asynchronously", body = DataFlowResponseMessage),
        (status = 400, description = "Malformed message")
    )
)]
pub async fn start(
    State(dataplane): State<Dataplane>,
    ValidJson(message): ValidJson<DataFlowStartMessage>,
) -> Result<impl IntoResponse, DomainError> {
    let response = dataplane.start(message).await?;
    let status = if response.state == DataFlowState::Starting {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

#[utoipa::path(
    post,
    path = "/v1/dataflows/{flow_id}/started",
    request_body = DataFlowStartedNotificationMessage,
    params(("flow_id" = String, Path, description = "Data flow id")),
    responses(
        (status = 200, description = "Start notification accepted"),
        (status = 400, description = "Malformed message"),
        (status = 404, description = "Unknown data flow"),
        (status = 409, description = "Data flow already finished")
    )
)]
pub async fn started(
    State(dataplane): State<Dataplane>,
    Path(flow_id): Path<String>,
    JsonOrDefault(message): JsonOrDefault<DataFlowStartedNotificationMessage>,
) -> Result<StatusCode, DomainError> {
    dataplane.started(&flow_id, message).await?;
    Ok(StatusCode::OK)
}

// Accepts any content type, the body is ignored.
#[utoipa::path(
    post,
    path = "/v1/dataflows/{flow_id}/completed",
    params(("flow_id" = String, Path, description = "Data flow id")),
    responses(
        (status = 200, description = "Completion accepted"),
        (status = 404, description = "Unknown data flow"),
        (status = 409, description = "Data flow already finished")
    )
)]
pub async fn completed(
    State(dataplane): State<Dataplane>,
    Path(flow_id): Path<String>,
) -> Result<StatusCode, DomainError> {
    dataplane.completed(&flow_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/v1/dataflows/{flow_id}/terminate",
    request_body = DataFlowTerminateMessage,
    params(("flow_id" = String, Path, description = "Data flow id")),
    responses(
        (status = 200, description = "Data flow terminated"),
        (status = 400, description = "Malformed message"),
        (status = 404, description = "Unknown data flow"),
        (status = 409, description = "Data flow already finished")
    )
)]
pub async fn terminate(
    State(dataplane): State<Dataplane>,
    Path(flow_id): Path<String>,
    JsonOrDefault(message): JsonOrDefault<DataFlowTerminateMessage>,
) -> Result<StatusCode, DomainError> {
    dataplane.terminate(&flow_id, message).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/v1/dataflows/{flow_id}/status",
    params(("flow_id" = String, Path, description = "Data flow id")),
    responses(
        (status = 200, description = "Current state", body = DataFlowStatusResponseMessage),
        (status = 404, description = "Unknown data flow")
    )
)]
pub async fn status(
    State(dataplane): State<Dataplane>,
    Path(flow_id): Path<String>,
) -> Result<Json<DataFlowStatusResponseMessage>, DomainError> {
    Ok(Json(dataplane.status(&flow_id).await?))
}
