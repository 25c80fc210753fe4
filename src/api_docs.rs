use crate::api;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::dataflows::prepare,
        api::dataflows::start,
        api::dataflows::started,
        api::dataflows::completed,
        api::dataflows::terminate,
        api::dataflows::status,
    ),
    components(
        schemas(
            models::DataAddress,
            models::EndpointProperty,
            models::DataFlowState,
            models::DataFlowPrepareMessage,
            models::DataFlowStartMessage,
            models::DataFlowStartedNotificationMessage,
            models::DataFlowTerminateMessage,
            models::DataFlowResponseMessage,
            models::DataFlowStatusResponseMessage,
        )
    ),
    tags(
        (name = "dataplane", description = "Data Plane Signaling API")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_signaling_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/v1/dataflows/prepare"));
        assert!(paths.iter().any(|p| p.as_str() == "/v1/dataflows/{flow_id}/status"));
    }
}
