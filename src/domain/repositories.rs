//! Repository trait definitions
//!
//! These traits define the contract for data flow persistence.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::DataFlow;

/// Repository trait for DataFlow entity
#[async_trait]
pub trait DataFlowStore: Send + Sync {
    /// Insert or replace a data flow, keyed by its id
    async fn save(&self, data_flow: DataFlow) -> Result<(), DomainError>;

    /// Find a data flow by id
    async fn find_by_id(&self, id: &str) -> Result<Option<DataFlow>, DomainError>;
}
