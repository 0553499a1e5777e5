//! User-visible feedback for submission attempts

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::service::SubmissionOutcome;

pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Wolt Watch integration not loaded. Please restart Home Assistant and try again.";

/// Severity of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

/// Payload of a host notification: `{message, level?}`.
/// Info severity is expressed by leaving `level` out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Severity>,
}

impl FeedbackEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: Some(Severity::Error),
        }
    }

    pub fn severity(&self) -> Severity {
        self.level.unwrap_or(Severity::Info)
    }

    /// Feedback for a finished submission
    pub fn for_outcome(outcome: &SubmissionOutcome, identifier: &str) -> Self {
        match outcome {
            SubmissionOutcome::Success => {
                Self::info(format!("Now watching {}...", humanize(identifier)))
            }
            SubmissionOutcome::ServiceUnavailable => Self::error(SERVICE_UNAVAILABLE_MESSAGE),
            SubmissionOutcome::CallFailed(message) => {
                Self::error(format!("Failed to start watching: {}", message))
            }
        }
    }

    pub fn for_validation(err: &ValidationError) -> Self {
        Self::error(err.to_string())
    }
}

/// Destination for feedback events
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait FeedbackSink: Send + Sync {
    async fn notify(&self, event: &FeedbackEvent) -> crate::Result<()>;
}

/// Deliver feedback. A sink failure is logged and otherwise ignored.
pub async fn emit(sink: &dyn FeedbackSink, event: FeedbackEvent) {
    tracing::debug!("Feedback ({:?}): {}", event.severity(), event.message);
    if let Err(e) = sink.notify(&event).await {
        tracing::warn!("Failed to deliver feedback '{}': {}", event.message, e);
    }
}

/// "mcdonalds-dizengoff" -> "Mcdonalds Dizengoff"
pub fn humanize(identifier: &str) -> String {
    let spaced = identifier.replace('-', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for c in spaced.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// Prints feedback on the terminal
#[derive(Debug, Default)]
pub struct ConsoleFeedbackSink;

#[async_trait]
impl FeedbackSink for ConsoleFeedbackSink {
    async fn notify(&self, event: &FeedbackEvent) -> crate::Result<()> {
        match event.severity() {
            Severity::Info => println!("{}", event.message),
            Severity::Error => eprintln!("error: {}", event.message),
        }
        Ok(())
    }
}
