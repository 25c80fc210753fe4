//! Data plane SDK core
//!
//! A `Dataplane` owns the data flow store, the registered lifecycle hooks and
//! the control plane client. The signaling API and embedding code both call
//! into it; the HTTP layer holds no logic of its own.

use std::sync::Arc;
use std::time::Duration;

use super::control_plane::{ControlPlaneClient, RetryPolicy};
use crate::domain::{DataFlowStore, DomainError};
use crate::infrastructure::InMemoryDataFlowStore;
use crate::models::{
    DataAddress, DataFlow, DataFlowPrepareMessage, DataFlowResponseMessage, DataFlowStartMessage,
    DataFlowStartedNotificationMessage, DataFlowState, DataFlowStatusResponseMessage,
    DataFlowTerminateMessage,
};

/// Lifecycle hook. Receives the data flow and returns it, possibly modified
/// (data address set, state moved to PREPARING/STARTING for async work).
pub type Hook = Arc<dyn Fn(DataFlow) -> Result<DataFlow, DomainError> + Send + Sync>;

#[derive(Clone, Default)]
struct Hooks {
    on_prepare: Option<Hook>,
    on_start: Option<Hook>,
    on_started: Option<Hook>,
    on_completed: Option<Hook>,
    on_terminate: Option<Hook>,
}

struct Inner {
    id: String,
    store: Arc<dyn DataFlowStore>,
    control_plane: ControlPlaneClient,
    hooks: Hooks,
}

/// Cheap to clone; all clones share the same store and hooks
#[derive(Clone)]
pub struct Dataplane {
    inner: Arc<Inner>,
}

#[derive(Default)]
pub struct DataplaneBuilder {
    id: Option<String>,
    store: Option<Arc<dyn DataFlowStore>>,
    retry: RetryPolicy,
    http: Option<reqwest::Client>,
    hooks: Hooks,
}

impl DataplaneBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn store(mut self, store: Arc<dyn DataFlowStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn on_prepare<F>(mut self, hook: F) -> Self
    where
        F: Fn(DataFlow) -> Result<DataFlow, DomainError> + Send + Sync + 'static,
    {
        self.hooks.on_prepare = Some(Arc::new(hook));
        self
    }

    pub fn on_start<F>(mut self, hook: F) -> Self
    where
        F: Fn(DataFlow) -> Result<DataFlow, DomainError> + Send + Sync + 'static,
    {
        self.hooks.on_start = Some(Arc::new(hook));
        self
    }

    pub fn on_started<F>(mut self, hook: F) -> Self
    where
        F: Fn(DataFlow) -> Result<DataFlow, DomainError> + Send + Sync + 'static,
    {
        self.hooks.on_started = Some(Arc::new(hook));
        self
    }

    pub fn on_completed<F>(mut self, hook: F) -> Self
    where
        F: Fn(DataFlow) -> Result<DataFlow, DomainError> + Send + Sync + 'static,
    {
        self.hooks.on_completed = Some(Arc::new(hook));
        self
    }

    pub fn on_terminate<F>(mut self, hook: F) -> Self
    where
        F: Fn(DataFlow) -> Result<DataFlow, DomainError> + Send + Sync + 'static,
    {
        self.hooks.on_terminate = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Dataplane {
        let id = self.id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryDataFlowStore::new()));
        let http = self.http.unwrap_or_else(default_http_client);

        Dataplane {
            inner: Arc::new(Inner {
                id,
                store,
                control_plane: ControlPlaneClient::new(http, self.retry),
                hooks: self.hooks,
            }),
        }
    }
}

fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

impl Dataplane {
    pub fn builder() -> DataplaneBuilder {
        DataplaneBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Consumer side: get ready to receive data
    pub async fn prepare(
        &self,
        message: DataFlowPrepareMessage,
    ) -> Result<DataFlowResponseMessage, DomainError> {
        validate_process_id(&message.process_id)?;
        let flow = DataFlow::from_prepare(&message)?;

        let mut flow = self.run_hook(self.inner.hooks.on_prepare.as_ref(), flow)?;
        if flow.state() != DataFlowState::Preparing {
            flow.transition_to_prepared()?;
        }

        // Push: the consumer hands its destination back to the control plane
        let data_address = if flow.is_push() {
            flow.data_address.clone()
        } else {
            None
        };
        let response = self.response(&flow, data_address);

        tracing::info!(flow_id = %flow.id, state = %flow.state(), "data flow prepare handled");
        self.inner.store.save(flow).await?;
        Ok(response)
    }

    /// Provider side: begin the transfer
    pub async fn start(
        &self,
        message: DataFlowStartMessage,
    ) -> Result<DataFlowResponseMessage, DomainError> {
        validate_process_id(&message.process_id)?;
        let flow = DataFlow::from_start(&message)?;

        let mut flow = self.run_hook(self.inner.hooks.on_start.as_ref(), flow)?;
        if flow.state() != DataFlowState::Starting {
            flow.transition_to_started()?;
        }

        // Pull: the provider exposes its source to the consumer
        let data_address = if flow.is_pull() {
            flow.data_address.clone()
        } else {
            None
        };
        let response = self.response(&flow, data_address);

        tracing::info!(flow_id = %flow.id, state = %flow.state(), "data flow start handled");
        self.inner.store.save(flow).await?;
        Ok(response)
    }

    /// Consumer side: the provider has started, possibly with a source address
    pub async fn started(
        &self,
        flow_id: &str,
        message: DataFlowStartedNotificationMessage,
    ) -> Result<(), DomainError> {
        let mut flow = self.load_active(flow_id).await?;
        if let Some(address) = message.data_address {
            flow.data_address = Some(address);
        }

        let mut flow = self.run_hook(self.inner.hooks.on_started.as_ref(), flow)?;
        flow.transition_to_started()?;

        tracing::info!(flow_id = %flow.id, "data flow started");
        self.inner.store.save(flow).await
    }

    /// The transfer finished on the other side
    pub async fn completed(&self, flow_id: &str) -> Result<(), DomainError> {
        let flow = self.load_active(flow_id).await?;

        let mut flow = self.run_hook(self.inner.hooks.on_completed.as_ref(), flow)?;
        flow.transition_to_completed()?;

        tracing::info!(flow_id = %flow.id, "data flow completed");
        self.inner.store.save(flow).await
    }

    pub async fn terminate(
        &self,
        flow_id: &str,
        message: DataFlowTerminateMessage,
    ) -> Result<(), DomainError> {
        let flow = self.load_active(flow_id).await?;

        let mut flow = self.run_hook(self.inner.hooks.on_terminate.as_ref(), flow)?;
        flow.transition_to_terminated(message.reason)?;

        tracing::info!(flow_id = %flow.id, reason = ?flow.error, "data flow terminated");
        self.inner.store.save(flow).await
    }

    pub async fn status(&self, flow_id: &str) -> Result<DataFlowStatusResponseMessage, DomainError> {
        let flow = self.load(flow_id).await?;
        Ok(DataFlowStatusResponseMessage {
            dataflow_id: flow.id.clone(),
            state: flow.state(),
        })
    }

    /// Full data flow as stored, for embedding code
    pub async fn find(&self, flow_id: &str) -> Result<DataFlow, DomainError> {
        self.load(flow_id).await
    }

    /// Tell the control plane this transfer is done, then mark it COMPLETED.
    /// The state is left untouched when the control plane cannot be reached.
    pub async fn notify_completed(&self, flow_id: &str) -> Result<(), DomainError> {
        let flow = self.load_active(flow_id).await?;
        let callback = callback_of(&flow)?;

        self.inner
            .control_plane
            .notify_completed(&callback, flow_id)
            .await?;

        // Reload: the flow may have moved while the callback was in flight
        let mut flow = self.load_active(flow_id).await?;
        flow.transition_to_completed()?;
        tracing::info!(flow_id = %flow.id, "control plane notified of completion");
        self.inner.store.save(flow).await
    }

    /// Tell the control plane this transfer failed, then mark it TERMINATED
    pub async fn notify_errored(&self, flow_id: &str, error: &str) -> Result<(), DomainError> {
        let flow = self.load_active(flow_id).await?;
        let callback = callback_of(&flow)?;

        self.inner
            .control_plane
            .notify_errored(&callback, flow_id, error)
            .await?;

        let mut flow = self.load_active(flow_id).await?;
        flow.transition_to_terminated(Some(error.to_string()))?;
        tracing::warn!(flow_id = %flow.id, error, "control plane notified of error");
        self.inner.store.save(flow).await
    }

    async fn load(&self, flow_id: &str) -> Result<DataFlow, DomainError> {
        self.inner
            .store
            .find_by_id(flow_id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    async fn load_active(&self, flow_id: &str) -> Result<DataFlow, DomainError> {
        let flow = self.load(flow_id).await?;
        if flow.state().is_terminal() {
            return Err(DomainError::InvalidState(format!(
                "data flow {} is already {}",
                flow.id,
                flow.state()
            )));
        }
        Ok(flow)
    }

    fn run_hook(&self, hook: Option<&Hook>, flow: DataFlow) -> Result<DataFlow, DomainError> {
        let Some(hook) = hook else {
            return Ok(flow);
        };

        let id = flow.id.clone();
        let flow = hook(flow).map_err(|e| {
            tracing::error!(flow_id = %id, "❌ Hook failed: {}", e);
            match e {
                DomainError::Handler(msg) => DomainError::Handler(msg),
                other => DomainError::Handler(other.to_string()),
            }
        })?;

        if flow.id != id {
            return Err(DomainError::Handler(format!(
                "hook changed data flow id from {} to {}",
                id, flow.id
            )));
        }
        Ok(flow)
    }

    fn response(
        &self,
        flow: &DataFlow,
        data_address: Option<DataAddress>,
    ) -> DataFlowResponseMessage {
        DataFlowResponseMessage {
            dataplane_id: self.inner.id.clone(),
            data_address,
            state: flow.state(),
            error: flow.error.clone(),
        }
    }
}

fn validate_process_id(process_id: &str) -> Result<(), DomainError> {
    if process_id.trim().is_empty() {
        return Err(DomainError::Validation("processId must not be empty".to_string()));
    }
    Ok(())
}

fn callback_of(flow: &DataFlow) -> Result<url::Url, DomainError> {
    flow.callback_address.clone().ok_or_else(|| {
        DomainError::Validation(format!("data flow {} has no callback address", flow.id))
    })
}
