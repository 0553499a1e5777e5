//! Configuration types for the wolt-watch control

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::service::ServiceName;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub home_assistant: HomeAssistantConfig,
    #[serde(default)]
    pub service: ServiceName,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// Card configuration, passed through untouched
    #[serde(default = "default_card")]
    pub card: serde_json::Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_assistant: HomeAssistantConfig::default(),
            service: ServiceName::default(),
            feedback: FeedbackConfig::default(),
            card: default_card(),
        }
    }
}

/// Connection to the Home Assistant instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeAssistantConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub token: String,
    /// Environment variable consulted when `token` is empty
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for HomeAssistantConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: String::new(),
            token_env: default_token_env(),
        }
    }
}

/// Where feedback messages go, tagged for extensibility
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackConfig {
    #[default]
    #[serde(rename = "console")]
    Console,
    #[serde(rename = "home_assistant_event")]
    HomeAssistantEvent {
        #[serde(default = "default_event_type")]
        event_type: String,
    },
}

impl FeedbackConfig {
    pub fn type_name(&self) -> &str {
        match self {
            FeedbackConfig::Console => "console",
            FeedbackConfig::HomeAssistantEvent { .. } => "home_assistant_event",
        }
    }
}

impl Config {
    /// Fill an empty token from the configured environment variable
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_with(|name| std::env::var(name).ok())
    }

    fn resolve_secrets_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> crate::Result<()> {
        if !self.home_assistant.token.is_empty() {
            return Ok(());
        }
        match lookup(&self.home_assistant.token_env) {
            Some(token) if !token.is_empty() => {
                tracing::debug!(
                    "Using Home Assistant token from ${}",
                    self.home_assistant.token_env
                );
                self.home_assistant.token = token;
                Ok(())
            }
            _ => Err(crate::WoltWatchError::Config(format!(
                "No Home Assistant token configured and ${} is not set",
                self.home_assistant.token_env
            ))),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8123".to_string()
}

fn default_token_env() -> String {
    "HASS_TOKEN".to_string()
}

fn default_event_type() -> String {
    "hass_notification".to_string()
}

fn default_card() -> serde_json::Value {
    serde_json::json!({})
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WoltWatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
