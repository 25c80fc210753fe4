mod common;

use common::prepare_message;
use dataplane_sdk::{DataFlowState, Dataplane, DomainError, RetryPolicy};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(10),
    }
}

async fn prepared_dataplane(callback: String) -> Dataplane {
    let dataplane = Dataplane::builder()
        .id("provider")
        .retry_policy(fast_retry())
        .build();
    dataplane
        .prepare(prepare_message("dataFlowId", "Something-PUSH", Some(callback)))
        .await
        .unwrap();
    dataplane
}

#[tokio::test]
async fn test_notify_completed_fails_when_data_flow_does_not_exist() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&control_plane)
        .await;

    let dataplane = Dataplane::builder().build();

    let result = dataplane.notify_completed("dataFlowId").await;

    assert_eq!(result.unwrap_err(), DomainError::NotFound);
}

#[tokio::test]
async fn test_notify_completed_fails_when_control_plane_is_not_available() {
    // Nothing listens on a port we bound and released
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let callback = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let dataplane = prepared_dataplane(callback).await;

    let result = dataplane.notify_completed("dataFlowId").await;

    assert!(matches!(result, Err(DomainError::ControlPlane(_))));
    let status = dataplane.status("dataFlowId").await.unwrap();
    assert_eq!(status.state, DataFlowState::Prepared);
}

#[tokio::test]
async fn test_notify_completed_fails_when_control_plane_responds_with_error() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&control_plane)
        .await;

    let dataplane = prepared_dataplane(control_plane.uri()).await;

    let result = dataplane.notify_completed("dataFlowId").await;

    assert!(matches!(result, Err(DomainError::ControlPlane(_))));
    let status = dataplane.status("dataFlowId").await.unwrap();
    assert_ne!(status.state, DataFlowState::Completed);
}

#[tokio::test]
async fn test_notify_completed_does_not_retry_client_errors() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&control_plane)
        .await;

    let dataplane = prepared_dataplane(control_plane.uri()).await;

    let result = dataplane.notify_completed("dataFlowId").await;

    assert!(matches!(result, Err(DomainError::ControlPlane(_))));
}

#[tokio::test]
async fn test_notify_completed_transitions_to_completed() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transfers/dataFlowId/dataflow/completed"))
        .and(body_partial_json(serde_json::json!({ "dataflowId": "dataFlowId" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&control_plane)
        .await;

    let dataplane = prepared_dataplane(control_plane.uri()).await;

    dataplane.notify_completed("dataFlowId").await.unwrap();

    let status = dataplane.status("dataFlowId").await.unwrap();
    assert_eq!(status.state, DataFlowState::Completed);
}

#[tokio::test]
async fn test_notify_completed_retries_until_control_plane_accepts() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&control_plane)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&control_plane)
        .await;

    let dataplane = prepared_dataplane(control_plane.uri()).await;

    dataplane.notify_completed("dataFlowId").await.unwrap();

    let status = dataplane.status("dataFlowId").await.unwrap();
    assert_eq!(status.state, DataFlowState::Completed);
}

#[tokio::test]
async fn test_notify_completed_appends_to_callback_path() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/provider/control-plane/transfers/dataFlowId/dataflow/completed"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&control_plane)
        .await;

    let callback = format!("{}/provider/control-plane", control_plane.uri());
    let dataplane = prepared_dataplane(callback).await;

    dataplane.notify_completed("dataFlowId").await.unwrap();
}

#[tokio::test]
async fn test_notify_errored_terminates_flow_with_error() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transfers/dataFlowId/dataflow/errored"))
        .and(body_partial_json(serde_json::json!({ "error": "disk full" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&control_plane)
        .await;

    let dataplane = prepared_dataplane(control_plane.uri()).await;

    dataplane.notify_errored("dataFlowId", "disk full").await.unwrap();

    let flow = dataplane.find("dataFlowId").await.unwrap();
    assert_eq!(flow.state(), DataFlowState::Terminated);
    assert_eq!(flow.error.as_deref(), Some("disk full"));
}

#[tokio::test]
async fn test_notify_completed_after_completion_is_rejected() {
    let control_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&control_plane)
        .await;

    let dataplane = prepared_dataplane(control_plane.uri()).await;
    dataplane.notify_completed("dataFlowId").await.unwrap();

    let result = dataplane.notify_completed("dataFlowId").await;

    assert!(matches!(result, Err(DomainError::InvalidState(_))));
}
