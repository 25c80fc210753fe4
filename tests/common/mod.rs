#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Router,
};
use dataplane_sdk::models::{
    DataFlowPrepareMessage, DataFlowStartMessage, DataFlowStartedNotificationMessage,
    DataFlowTerminateMessage,
};
use dataplane_sdk::server::{self, RunningServer};
use dataplane_sdk::{DataAddress, Dataplane};
use std::time::Duration;

pub fn prepare_message(
    process_id: &str,
    transfer_type: &str,
    callback_address: Option<String>,
) -> DataFlowPrepareMessage {
    DataFlowPrepareMessage {
        message_id: Some("theMessageId".to_string()),
        participant_id: Some("theParticipantId".to_string()),
        counter_party_id: Some("theCounterPartyId".to_string()),
        dataspace_context: Some("theDataspaceContext".to_string()),
        process_id: process_id.to_string(),
        agreement_id: Some("theAgreementId".to_string()),
        dataset_id: Some("theDatasetId".to_string()),
        callback_address,
        transfer_type: transfer_type.to_string(),
        ..Default::default()
    }
}

pub fn start_message(
    process_id: &str,
    transfer_type: &str,
    callback_address: Option<String>,
    data_address: Option<DataAddress>,
) -> DataFlowStartMessage {
    DataFlowStartMessage {
        message_id: Some("theMessageId".to_string()),
        participant_id: Some("theParticipantId".to_string()),
        counter_party_id: Some("theCounterPartyId".to_string()),
        dataspace_context: Some("theDataspaceContext".to_string()),
        process_id: process_id.to_string(),
        agreement_id: Some("theAgreementId".to_string()),
        dataset_id: Some("theDatasetId".to_string()),
        callback_address,
        transfer_type: transfer_type.to_string(),
        data_address,
        ..Default::default()
    }
}

/// Poll `check` until it holds or `timeout` elapses
pub async fn eventually<F>(timeout: Duration, mut check: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if check() {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("condition not met within {:?}", timeout);
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

pub fn count_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Consumer and provider data planes served side by side, like two
/// participants' deployments.
pub struct DataPlanes {
    server: RunningServer,
}

impl DataPlanes {
    pub async fn start(consumer: &Dataplane, provider: &Dataplane) -> Self {
        let app = Router::new()
            .nest("/consumer/data-plane", server::build_router(consumer.clone()))
            .nest("/provider/data-plane", server::build_router(provider.clone()));
        let server = server::start_server(app, ([127, 0, 0, 1], 0).into())
            .await
            .expect("Failed to start data planes");
        Self { server }
    }

    pub fn consumer_url(&self) -> String {
        format!("{}/consumer/data-plane", self.server.base_url())
    }

    pub fn provider_url(&self) -> String {
        format!("{}/provider/data-plane", self.server.base_url())
    }

    pub async fn stop(self) {
        self.server.stop().await;
    }
}

#[derive(Clone)]
struct ControlPlaneState {
    http: reqwest::Client,
    consumer_url: String,
}

/// Simulates the control planes of both participants.
/// Completion reported by the provider for `provider_<id>` is relayed to the
/// consumer data plane as completion of `consumer_<id>`.
pub struct ControlPlane {
    http: reqwest::Client,
    consumer_url: String,
    provider_url: String,
    server: RunningServer,
}

impl ControlPlane {
    pub async fn start(data_planes: &DataPlanes) -> Self {
        let http = reqwest::Client::new();
        let state = ControlPlaneState {
            http: http.clone(),
            consumer_url: data_planes.consumer_url(),
        };

        let app = Router::new()
            .route(
                "/provider/control-plane/transfers/:id/dataflow/completed",
                post(provider_completed),
            )
            .route(
                "/consumer/control-plane/transfers/:id/dataflow/completed",
                post(|| async { StatusCode::OK }),
            )
            .route(
                "/consumer/control-plane/transfers/:id/dataflow/errored",
                post(|| async { StatusCode::OK }),
            )
            .route(
                "/provider/control-plane/transfers/:id/dataflow/errored",
                post(|| async { StatusCode::OK }),
            )
            .with_state(state);

        let server = server::start_server(app, ([127, 0, 0, 1], 0).into())
            .await
            .expect("Failed to start control plane");

        Self {
            http,
            consumer_url: data_planes.consumer_url(),
            provider_url: data_planes.provider_url(),
            server,
        }
    }

    pub fn consumer_callback_address(&self) -> String {
        format!("{}/consumer/control-plane", self.server.base_url())
    }

    pub fn provider_callback_address(&self) -> String {
        format!("{}/provider/control-plane", self.server.base_url())
    }

    pub async fn consumer_prepare(&self, message: &DataFlowPrepareMessage) -> reqwest::Response {
        self.http
            .post(format!("{}/v1/dataflows/prepare", self.consumer_url))
            .json(message)
            .send()
            .await
            .expect("consumer prepare failed")
    }

    pub async fn consumer_started(
        &self,
        flow_id: &str,
        message: &DataFlowStartedNotificationMessage,
    ) -> reqwest::Response {
        self.http
            .post(format!("{}/v1/dataflows/{}/started", self.consumer_url, flow_id))
            .json(message)
            .send()
            .await
            .expect("consumer started failed")
    }

    pub async fn consumer_status(&self, flow_id: &str) -> reqwest::Response {
        self.http
            .get(format!("{}/v1/dataflows/{}/status", self.consumer_url, flow_id))
            .send()
            .await
            .expect("consumer status failed")
    }

    pub async fn provider_start(&self, message: &DataFlowStartMessage) -> reqwest::Response {
        self.http
            .post(format!("{}/v1/dataflows/start", self.provider_url))
            .json(message)
            .send()
            .await
            .expect("provider start failed")
    }

    pub async fn provider_status(&self, flow_id: &str) -> reqwest::Response {
        self.http
            .get(format!("{}/v1/dataflows/{}/status", self.provider_url, flow_id))
            .send()
            .await
            .expect("provider status failed")
    }

    pub async fn provider_terminate(
        &self,
        flow_id: &str,
        message: &DataFlowTerminateMessage,
    ) -> reqwest::Response {
        self.http
            .post(format!("{}/v1/dataflows/{}/terminate", self.provider_url, flow_id))
            .json(message)
            .send()
            .await
            .expect("provider terminate failed")
    }

    pub async fn stop(self) {
        self.server.stop().await;
    }
}

async fn provider_completed(
    State(state): State<ControlPlaneState>,
    Path(id): Path<String>,
) -> StatusCode {
    let Some(process_id) = id.strip_prefix("provider_") else {
        return StatusCode::OK;
    };

    let url = format!(
        "{}/v1/dataflows/consumer_{}/completed",
        state.consumer_url, process_id
    );
    match state.http.post(url).send().await {
        Ok(res) if res.status().is_success() => StatusCode::OK,
        Ok(res) => res.status(),
        Err(_) => StatusCode::BAD_GATEWAY,
    }
}
