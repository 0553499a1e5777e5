//! Submitting a watch request to the host's service bus

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InvocationError;
use crate::request::WatchRequest;

/// A host service, addressed as `domain.action`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceName {
    #[serde(default = "default_domain")]
    pub domain: String,
    #[serde(default = "default_action")]
    pub action: String,
}

impl Default for ServiceName {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            action: default_action(),
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.action)
    }
}

fn default_domain() -> String {
    "wolt_watch".to_string()
}

fn default_action() -> String {
    "start".to_string()
}

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    ServiceUnavailable,
    CallFailed(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }
}

/// Access to the host's service registry and bus
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ServiceInvoker: Send + Sync {
    /// Whether the service is currently registered
    async fn has_operation(&self, service: &ServiceName) -> crate::Result<bool>;

    /// Run the service once and wait for it to finish
    async fn invoke(
        &self,
        service: &ServiceName,
        params: serde_json::Value,
    ) -> std::result::Result<(), InvocationError>;
}

/// Send the request exactly once. No retries and no local timeout.
pub async fn submit(
    request: &WatchRequest,
    service: &ServiceName,
    invoker: &dyn ServiceInvoker,
) -> SubmissionOutcome {
    match invoker.has_operation(service).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::debug!("Service {} is not registered", service);
            return SubmissionOutcome::ServiceUnavailable;
        }
        Err(e) => {
            tracing::warn!("Looking up service {} failed: {}", service, e);
            return SubmissionOutcome::CallFailed(e.to_string());
        }
    }

    tracing::debug!(
        "Calling {} for '{}' ({} min) -> {}",
        service,
        request.identifier(),
        request.timeout_minutes(),
        request.recipient()
    );

    match invoker.invoke(service, request.to_params()).await {
        Ok(()) => {
            tracing::info!(
                "Started watching '{}' for {} minutes",
                request.identifier(),
                request.timeout_minutes()
            );
            SubmissionOutcome::Success
        }
        Err(e) => {
            tracing::warn!("Call to {} failed: {}", service, e);
            SubmissionOutcome::CallFailed(e.message)
        }
    }
}
