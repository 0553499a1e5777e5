//! Wolt Watch - Home Assistant control for watching Wolt restaurants
//!
//! Validates a watch request (restaurant slug, duration, notification device),
//! submits it to the `wolt_watch.start` service and reports the outcome.

pub mod card;
pub mod config;
pub mod duration;
pub mod error;
pub mod feedback;
pub mod home_assistant;
pub mod io;
pub mod registry;
pub mod request;
pub mod service;
pub mod targets;

pub use card::{StartOutcome, WatchCard};
pub use config::{load_config, Config};
pub use duration::DurationSpec;
pub use error::{InvocationError, Result, ValidationError, WoltWatchError};
pub use request::WatchRequest;
pub use service::{ServiceName, SubmissionOutcome};

use std::sync::Arc;

use crate::config::FeedbackConfig;
use crate::feedback::{ConsoleFeedbackSink, FeedbackSink};
use crate::home_assistant::{EventFeedbackSink, HomeAssistantClient};
use crate::io::ReqwestHttpClient;
use crate::registry::{CardDescriptor, CardRegistry};
use crate::targets::{fetch_targets, NotificationTarget};

/// A card wired to a Home Assistant instance
pub struct WoltWatch {
    client: Arc<HomeAssistantClient>,
    sink: Arc<dyn FeedbackSink>,
    card: WatchCard,
    registry: CardRegistry,
}

impl WoltWatch {
    /// Connect the card to the configured host and register it
    pub fn new(config: &Config) -> Result<Self> {
        let http = Arc::new(ReqwestHttpClient::new(Some(
            config.home_assistant.token.clone(),
        )));
        let client = Arc::new(HomeAssistantClient::new(&config.home_assistant.url, http));

        let sink: Arc<dyn FeedbackSink> = match &config.feedback {
            FeedbackConfig::Console => Arc::new(ConsoleFeedbackSink),
            FeedbackConfig::HomeAssistantEvent { event_type } => Arc::new(
                EventFeedbackSink::new(Arc::clone(&client), event_type.clone()),
            ),
        };
        tracing::debug!("Feedback goes to '{}'", config.feedback.type_name());

        let mut registry = CardRegistry::new();
        registry.register(CardDescriptor::wolt_watch())?;

        let mut card = WatchCard::new(config.service.clone());
        card.set_config(config.card.clone());

        Ok(Self {
            client,
            sink,
            card,
            registry,
        })
    }

    /// Card types this instance has registered
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Notification devices currently known to the host
    pub async fn targets(&self) -> Result<Vec<NotificationTarget>> {
        fetch_targets(self.client.as_ref()).await
    }

    /// Fill in the card and press "Start Watching"
    pub async fn start_watch(
        &self,
        slug: &str,
        device: &str,
        duration: DurationSpec,
    ) -> StartOutcome {
        self.card.set_identifier(slug).await;
        self.card.set_recipient(device).await;
        self.card.set_duration(duration).await;
        self.card
            .start_watch(self.client.as_ref(), self.sink.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registers_watch_card_once() {
        let app = WoltWatch::new(&Config::default()).unwrap();

        let catalog = app.registry().catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0], CardDescriptor::wolt_watch());
        assert!(app.registry().get(card::CARD_TYPE).is_some());
    }

    #[test]
    fn new_applies_card_and_service_config() {
        let mut config = Config::default();
        config.card = serde_json::json!({"title": "Dinner"});
        config.service.action = "begin".to_string();

        let app = WoltWatch::new(&config).unwrap();

        assert_eq!(app.card.config()["title"], "Dinner");
        assert_eq!(app.card.service().to_string(), "wolt_watch.begin");
    }
}
