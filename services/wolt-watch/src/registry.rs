//! Card type registration and the custom card catalog

use serde::{Deserialize, Serialize};

use crate::card::CARD_TYPE;

/// Catalog entry advertising a card type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDescriptor {
    #[serde(rename = "type")]
    pub card_type: String,
    pub name: String,
    pub description: String,
    pub preview: bool,
}

impl CardDescriptor {
    /// Catalog entry for the watch card
    pub fn wolt_watch() -> Self {
        Self {
            card_type: CARD_TYPE.to_string(),
            name: "Wolt Watch Card".to_string(),
            description: "A card to watch Wolt restaurants and get notifications when they open"
                .to_string(),
            preview: true,
        }
    }
}

/// Known card types. Populated once by start-up code.
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardDescriptor>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: CardDescriptor) -> crate::Result<()> {
        if self.get(&descriptor.card_type).is_some() {
            return Err(crate::WoltWatchError::Registration(format!(
                "card type '{}' is already registered",
                descriptor.card_type
            )));
        }
        tracing::debug!("Registered card type '{}'", descriptor.card_type);
        self.cards.push(descriptor);
        Ok(())
    }

    pub fn get(&self, card_type: &str) -> Option<&CardDescriptor> {
        self.cards.iter().find(|c| c.card_type == card_type)
    }

    pub fn catalog(&self) -> &[CardDescriptor] {
        &self.cards
    }
}
