//! Data Plane Signaling wire messages

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;

use super::{DataAddress, DataFlowState};

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowPrepareMessage {
    pub message_id: Option<String>,
    pub participant_id: Option<String>,
    pub counter_party_id: Option<String>,
    pub dataspace_context: Option<String>,
    pub process_id: String,
    pub agreement_id: Option<String>,
    pub dataset_id: Option<String>,
    pub callback_address: Option<String>,
    /// e.g. `HttpData-PULL`
    pub transfer_type: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: HashMap<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowStartMessage {
    pub message_id: Option<String>,
    pub participant_id: Option<String>,
    pub counter_party_id: Option<String>,
    pub dataspace_context: Option<String>,
    pub process_id: String,
    pub agreement_id: Option<String>,
    pub dataset_id: Option<String>,
    pub callback_address: Option<String>,
    pub transfer_type: String,
    /// Destination prepared by the consumer, for push transfers
    pub data_address: Option<DataAddress>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: HashMap<String, Value>,
}

/// Sent to the consumer once the provider has started
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowStartedNotificationMessage {
    pub data_address: Option<DataAddress>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DataFlowTerminateMessage {
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowResponseMessage {
    pub dataplane_id: String,
    pub data_address: Option<DataAddress>,
    pub state: DataFlowState,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowStatusResponseMessage {
    pub dataflow_id: String,
    pub state: DataFlowState,
}
