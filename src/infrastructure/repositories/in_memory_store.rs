//! In-memory implementation of DataFlowStore

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DataFlowStore, DomainError};
use crate::models::DataFlow;

/// DashMap-backed store. Data flows are lost on restart.
#[derive(Default)]
pub struct InMemoryDataFlowStore {
    flows: DashMap<String, DataFlow>,
}

impl InMemoryDataFlowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

#[async_trait]
impl DataFlowStore for InMemoryDataFlowStore {
    async fn save(&self, data_flow: DataFlow) -> Result<(), DomainError> {
        self.flows.insert(data_flow.id.clone(), data_flow);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<DataFlow>, DomainError> {
        Ok(self.flows.get(id).map(|entry| entry.value().clone()))
    }
}
