use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use url::Url;
use utoipa::ToSchema;

use super::{DataAddress, DataFlowPrepareMessage, DataFlowStartMessage, TransferType};
use crate::domain::DomainError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataFlowState {
    Initiating,
    Preparing,
    Prepared,
    Starting,
    Started,
    Completed,
    Terminated,
}

impl DataFlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFlowState::Initiating => "INITIATING",
            DataFlowState::Preparing => "PREPARING",
            DataFlowState::Prepared => "PREPARED",
            DataFlowState::Starting => "STARTING",
            DataFlowState::Started => "STARTED",
            DataFlowState::Completed => "COMPLETED",
            DataFlowState::Terminated => "TERMINATED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DataFlowState::Completed | DataFlowState::Terminated)
    }
}

impl fmt::Display for DataFlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single transfer, keyed by the control plane's process id
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlow {
    pub id: String,
    state: DataFlowState,
    pub transfer_type: TransferType,
    pub data_address: Option<DataAddress>,
    pub callback_address: Option<Url>,
    pub participant_id: Option<String>,
    pub counter_party_id: Option<String>,
    pub dataspace_context: Option<String>,
    pub agreement_id: Option<String>,
    pub dataset_id: Option<String>,
    pub labels: Vec<String>,
    pub metadata: HashMap<String, Value>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DataFlow {
    pub fn new(id: impl Into<String>, transfer_type: TransferType) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            state: DataFlowState::Initiating,
            transfer_type,
            data_address: None,
            callback_address: None,
            participant_id: None,
            counter_party_id: None,
            dataspace_context: None,
            agreement_id: None,
            dataset_id: None,
            labels: Vec::new(),
            metadata: HashMap::new(),
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_prepare(message: &DataFlowPrepareMessage) -> Result<Self, DomainError> {
        let mut flow = Self::new(message.process_id.clone(), message.transfer_type.parse()?);
        flow.callback_address = parse_callback(message.callback_address.as_deref())?;
        flow.participant_id = message.participant_id.clone();
        flow.counter_party_id = message.counter_party_id.clone();
        flow.dataspace_context = message.dataspace_context.clone();
        flow.agreement_id = message.agreement_id.clone();
        flow.dataset_id = message.dataset_id.clone();
        flow.labels = message.labels.clone();
        flow.metadata = message.metadata.clone();
        Ok(flow)
    }

    pub fn from_start(message: &DataFlowStartMessage) -> Result<Self, DomainError> {
        let mut flow = Self::new(message.process_id.clone(), message.transfer_type.parse()?);
        flow.callback_address = parse_callback(message.callback_address.as_deref())?;
        flow.data_address = message.data_address.clone();
        flow.participant_id = message.participant_id.clone();
        flow.counter_party_id = message.counter_party_id.clone();
        flow.dataspace_context = message.dataspace_context.clone();
        flow.agreement_id = message.agreement_id.clone();
        flow.dataset_id = message.dataset_id.clone();
        flow.labels = message.labels.clone();
        flow.metadata = message.metadata.clone();
        Ok(flow)
    }

    pub fn state(&self) -> DataFlowState {
        self.state
    }

    pub fn is_push(&self) -> bool {
        self.transfer_type.is_push()
    }

    pub fn is_pull(&self) -> bool {
        self.transfer_type.is_pull()
    }

    pub fn transition_to_preparing(&mut self) -> Result<(), DomainError> {
        self.transition(DataFlowState::Preparing)
    }

    pub fn transition_to_prepared(&mut self) -> Result<(), DomainError> {
        self.transition(DataFlowState::Prepared)
    }

    pub fn transition_to_starting(&mut self) -> Result<(), DomainError> {
        self.transition(DataFlowState::Starting)
    }

    pub fn transition_to_started(&mut self) -> Result<(), DomainError> {
        self.transition(DataFlowState::Started)
    }

    pub fn transition_to_completed(&mut self) -> Result<(), DomainError> {
        self.transition(DataFlowState::Completed)
    }

    pub fn transition_to_terminated(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        self.transition(DataFlowState::Terminated)?;
        self.error = reason;
        Ok(())
    }

    // Terminal states are final; everything else may move freely.
    fn transition(&mut self, next: DataFlowState) -> Result<(), DomainError> {
        if self.state.is_terminal() {
            return Err(DomainError::InvalidState(format!(
                "data flow {} is {} and cannot move to {}",
                self.id, self.state, next
            )));
        }
        self.state = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn parse_callback(raw: Option<&str>) -> Result<Option<Url>, DomainError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => Url::parse(s)
            .map(Some)
            .map_err(|e| DomainError::Validation(format!("invalid callbackAddress '{}': {}", s, e))),
    }
}
