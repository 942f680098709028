use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("lead sink address is invalid: {0}")]
    InvalidAddress(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("lead sink answered with status {0}")]
    Status(u16),
}

/// Destination for captured leads. Delivery is one-shot: implementations
/// must not retry.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn forward(&self, payload: &Value) -> Result<(), ForwardError>;
}

/// Posts leads as JSON to a webhook address. Only the status is inspected.
pub struct WebhookLeadSink {
    url: String,
    client: Client,
}

impl WebhookLeadSink {
    pub fn new(url: &str) -> Result<Self, ForwardError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ForwardError::InvalidAddress(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ForwardError::InvalidAddress(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }
        Ok(Self {
            url: url.to_string(),
            client: Client::new(),
        })
    }
}

#[async_trait]
impl LeadSink for WebhookLeadSink {
    async fn forward(&self, payload: &Value) -> Result<(), ForwardError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ForwardError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForwardError::Status(status.as_u16()));
        }
        Ok(())
    }
}

/// Builds the sink for a configured address. An invalid address is logged
/// and treated like an absent one.
pub fn sink_from_address(address: Option<&str>) -> Option<Arc<dyn LeadSink>> {
    let address = address?;
    match WebhookLeadSink::new(address) {
        Ok(sink) => {
            debug!(%address, "lead forwarding enabled");
            Some(Arc::new(sink))
        }
        Err(e) => {
            warn!(%address, error = %e, "lead forwarding disabled");
            None
        }
    }
}

/// Forwards a payload and swallows any failure after logging it.
/// Returns whether the sink accepted the payload.
pub async fn forward_best_effort(sink: &dyn LeadSink, payload: &Value) -> bool {
    match sink.forward(payload).await {
        Ok(()) => {
            info!("lead forwarded");
            true
        }
        Err(e) => {
            warn!(error = %e, "lead forward failed");
            false
        }
    }
}
