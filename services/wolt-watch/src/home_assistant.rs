//! Home Assistant REST adapters for the host capabilities

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{InvocationError, WoltWatchError};
use crate::feedback::{FeedbackEvent, FeedbackSink};
use crate::io::{HttpClient, HttpResponse};
use crate::service::{ServiceInvoker, ServiceName};
use crate::targets::{EntityState, EntityStateProvider};

/// Entry of `GET /api/services`
#[derive(Debug, Deserialize)]
struct ServiceDomain {
    domain: String,
    #[serde(default)]
    services: HashMap<String, serde_json::Value>,
}

/// Client for one Home Assistant instance
pub struct HomeAssistantClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for HomeAssistantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeAssistantClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HomeAssistantClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created HomeAssistantClient for {}", base_url);
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> crate::Result<T> {
        let response = self.http.get(&self.url(path)).await?;
        if !response.is_success() {
            return Err(WoltWatchError::Host(format!(
                "GET {} returned status {}: {}",
                path, response.status, response.body
            )));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

/// Human-readable failure text from an error response
fn error_message(response: &HttpResponse) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
    match from_json {
        Some(message) => message,
        None if !response.body.trim().is_empty() => response.body.trim().to_string(),
        None => format!("Home Assistant returned status {}", response.status),
    }
}

#[async_trait]
impl EntityStateProvider for HomeAssistantClient {
    async fn list_entities(&self) -> crate::Result<Vec<EntityState>> {
        self.get_json("/api/states").await
    }
}

#[async_trait]
impl ServiceInvoker for HomeAssistantClient {
    async fn has_operation(&self, service: &ServiceName) -> crate::Result<bool> {
        let domains: Vec<ServiceDomain> = self.get_json("/api/services").await?;
        Ok(domains
            .iter()
            .any(|d| d.domain == service.domain && d.services.contains_key(&service.action)))
    }

    async fn invoke(
        &self,
        service: &ServiceName,
        params: serde_json::Value,
    ) -> std::result::Result<(), InvocationError> {
        let path = format!("/api/services/{}/{}", service.domain, service.action);
        let response = self.http.post_json(&self.url(&path), &params).await?;
        if !response.is_success() {
            return Err(InvocationError::new(error_message(&response)));
        }
        Ok(())
    }
}

/// Fires feedback on the Home Assistant event bus
pub struct EventFeedbackSink {
    client: Arc<HomeAssistantClient>,
    event_type: String,
}

impl std::fmt::Debug for EventFeedbackSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventFeedbackSink")
            .field("event_type", &self.event_type)
            .finish()
    }
}

impl EventFeedbackSink {
    pub fn new(client: Arc<HomeAssistantClient>, event_type: impl Into<String>) -> Self {
        Self {
            client,
            event_type: event_type.into(),
        }
    }
}

#[async_trait]
impl FeedbackSink for EventFeedbackSink {
    async fn notify(&self, event: &FeedbackEvent) -> crate::Result<()> {
        let path = format!("/api/events/{}", self.event_type);
        let body = serde_json::to_value(event)?;
        let response = self
            .client
            .http
            .post_json(&self.client.url(&path), &body)
            .await?;
        if !response.is_success() {
            return Err(WoltWatchError::Host(format!(
                "Firing {} returned status {}: {}",
                self.event_type, response.status, response.body
            )));
        }
        Ok(())
    }
}
