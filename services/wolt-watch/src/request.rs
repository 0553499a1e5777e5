//! Composing a watch request from raw user input

use crate::duration::{round_to_minutes, DurationSpec, SERVICE_MAX_TIMEOUT_MINUTES};
use crate::error::ValidationError;

/// A validated request. Only obtainable through [`WatchRequest::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRequest {
    identifier: String,
    timeout_minutes: u64,
    recipient: String,
}

impl WatchRequest {
    /// Validate the three inputs, reporting only the first problem found.
    ///
    /// Checks run in a fixed order: identifier, recipient, duration.
    pub fn build(
        raw_identifier: &str,
        raw_recipient: &str,
        duration: &DurationSpec,
    ) -> Result<Self, ValidationError> {
        let identifier = trim_input(raw_identifier);
        if identifier.is_empty() {
            return Err(ValidationError::MissingIdentifier);
        }

        if raw_recipient.is_empty() {
            return Err(ValidationError::MissingRecipient);
        }

        let total_seconds = duration.validate()?;
        let timeout_minutes = round_to_minutes(total_seconds);

        if timeout_minutes > SERVICE_MAX_TIMEOUT_MINUTES {
            tracing::warn!(
                "Requested {} minutes, above the {} minutes the watch service accepts",
                timeout_minutes,
                SERVICE_MAX_TIMEOUT_MINUTES
            );
        }

        Ok(Self {
            identifier: identifier.to_string(),
            timeout_minutes,
            recipient: raw_recipient.to_string(),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn timeout_minutes(&self) -> u64 {
        self.timeout_minutes
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Parameters for the watch service. The service names the identifier `slug`.
    pub fn to_params(&self) -> serde_json::Value {
        serde_json::json!({
            "slug": self.identifier,
            "timeout_m": self.timeout_minutes,
            "device": self.recipient,
        })
    }
}

/// Strip surrounding whitespace and byte order marks
fn trim_input(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}
