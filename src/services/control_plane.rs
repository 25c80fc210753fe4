//! Control plane callback client
//!
//! A data plane reports transfer outcomes to the control plane's callback
//! address: `{callback}/transfers/{flowId}/dataflow/{completed|errored}`.

use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use crate::domain::DomainError;

/// Retry settings for control plane callbacks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Backoff before retry number `retry` (1-based)
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }
}

#[derive(Clone)]
pub struct ControlPlaneClient {
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl ControlPlaneClient {
    pub fn new(http: reqwest::Client, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    pub async fn notify_completed(&self, callback: &Url, flow_id: &str) -> Result<(), DomainError> {
        let url = callback_url(callback, flow_id, "completed")?;
        self.post(url, json!({ "dataflowId": flow_id })).await
    }

    pub async fn notify_errored(
        &self,
        callback: &Url,
        flow_id: &str,
        error: &str,
    ) -> Result<(), DomainError> {
        let url = callback_url(callback, flow_id, "errored")?;
        self.post(url, json!({ "dataflowId": flow_id, "error": error }))
            .await
    }

    async fn post(&self, url: Url, body: Value) -> Result<(), DomainError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            if attempt > 1 {
                tokio::time::sleep(self.retry.backoff(attempt - 1)).await;
            }

            tracing::debug!(%url, attempt, "notifying control plane");

            match self.http.post(url.clone()).json(&body).send().await {
                Ok(res) if res.status().is_success() => return Ok(()),
                Ok(res) if res.status().is_client_error() => {
                    return Err(DomainError::ControlPlane(format!(
                        "{} rejected notification with status {}",
                        url,
                        res.status()
                    )));
                }
                Ok(res) => {
                    last_error = format!("{} responded with status {}", url, res.status());
                }
                Err(e) => {
                    last_error = format!("{} unreachable: {}", url, e);
                }
            }

            tracing::warn!(attempt, attempts, "⚠️ Control plane notification failed: {}", last_error);
        }

        Err(DomainError::ControlPlane(last_error))
    }
}

fn callback_url(callback: &Url, flow_id: &str, event: &str) -> Result<Url, DomainError> {
    let mut url = callback.clone();
    url.path_segments_mut()
        .map_err(|_| {
            DomainError::Validation(format!("callback address {} cannot be a base", callback))
        })?
        .pop_if_empty()
        .extend(&["transfers", flow_id, "dataflow", event]);
    Ok(url)
}
