//! Notification recipients derived from host entity state

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Entity ids of mobile devices that accept notifications start with this
pub const MOBILE_NOTIFY_PREFIX: &str = "notify.mobile_app";

/// One entity as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl EntityState {
    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes
            .get("friendly_name")
            .and_then(|v| v.as_str())
            .filter(|name| !name.is_empty())
    }
}

/// A selectable recipient for the "restaurant is open" alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTarget {
    pub id: String,
    pub display_name: String,
}

/// Read-only view of the host's live entities
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait EntityStateProvider: Send + Sync {
    async fn list_entities(&self) -> crate::Result<Vec<EntityState>>;
}

/// Mobile notify entities, sorted by entity id
pub fn resolve_targets(entities: &[EntityState]) -> Vec<NotificationTarget> {
    let mut targets: Vec<NotificationTarget> = entities
        .iter()
        .filter(|e| e.entity_id.starts_with(MOBILE_NOTIFY_PREFIX))
        .map(|e| NotificationTarget {
            id: e.entity_id.clone(),
            display_name: e
                .friendly_name()
                .map(str::to_string)
                .unwrap_or_else(|| e.entity_id.clone()),
        })
        .collect();
    targets.sort_by(|a, b| a.id.cmp(&b.id));
    targets
}

/// Fetch the current entities and resolve them
pub async fn fetch_targets(
    provider: &dyn EntityStateProvider,
) -> crate::Result<Vec<NotificationTarget>> {
    let entities = provider.list_entities().await?;
    let targets = resolve_targets(&entities);
    tracing::debug!(
        "Resolved {} notification targets from {} entities",
        targets.len(),
        entities.len()
    );
    Ok(targets)
}
