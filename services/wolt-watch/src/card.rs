//! The watch card: input state and the submission workflow

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::duration::DurationSpec;
use crate::error::ValidationError;
use crate::feedback::{emit, FeedbackEvent, FeedbackSink};
use crate::request::WatchRequest;
use crate::service::{submit, ServiceInvoker, ServiceName, SubmissionOutcome};
use crate::targets::{fetch_targets, EntityStateProvider, NotificationTarget};

pub const CARD_TYPE: &str = "wolt-watch-card";
pub const CARD_HEADER: &str = "Watch Wolt Restaurant";

const CARD_SIZE: u32 = 3;

/// Transient form state, owned by the card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardInputs {
    pub identifier: String,
    pub recipient: String,
    pub duration: DurationSpec,
}

/// Render model handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardView {
    Loading,
    Ready {
        header: String,
        targets: Vec<NotificationTarget>,
        inputs: CardInputs,
    },
}

/// What happened to one press of "Start Watching"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Rejected(ValidationError),
    Busy,
    Submitted(SubmissionOutcome),
}

/// One card instance
pub struct WatchCard {
    config: serde_json::Value,
    service: ServiceName,
    inputs: RwLock<CardInputs>,
    submitting: AtomicBool,
}

impl std::fmt::Debug for WatchCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchCard")
            .field("service", &self.service)
            .field("submitting", &self.is_submitting())
            .finish()
    }
}

/// Clears the in-flight flag when the attempt ends, on every path
struct SubmissionGuard<'a>(&'a AtomicBool);

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl WatchCard {
    pub fn new(service: ServiceName) -> Self {
        Self {
            config: Self::stub_config(),
            service,
            inputs: RwLock::new(CardInputs::default()),
            submitting: AtomicBool::new(false),
        }
    }

    /// Configuration a freshly added card starts with
    pub fn stub_config() -> serde_json::Value {
        serde_json::json!({})
    }

    /// Layout hint for the host
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    /// Store the card configuration. Its contents are not interpreted.
    pub fn set_config(&mut self, config: serde_json::Value) {
        self.config = config;
    }

    pub fn config(&self) -> &serde_json::Value {
        &self.config
    }

    pub fn service(&self) -> &ServiceName {
        &self.service
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn inputs(&self) -> CardInputs {
        self.inputs.read().await.clone()
    }

    pub async fn set_identifier(&self, identifier: impl Into<String>) {
        self.inputs.write().await.identifier = identifier.into();
    }

    pub async fn set_recipient(&self, recipient: impl Into<String>) {
        self.inputs.write().await.recipient = recipient.into();
    }

    pub async fn set_duration(&self, duration: DurationSpec) {
        self.inputs.write().await.duration = duration;
    }

    /// Build the render model from the host's current state
    pub async fn view(&self, host: Option<&dyn EntityStateProvider>) -> crate::Result<CardView> {
        let Some(host) = host else {
            return Ok(CardView::Loading);
        };
        let targets = fetch_targets(host).await?;
        Ok(CardView::Ready {
            header: CARD_HEADER.to_string(),
            targets,
            inputs: self.inputs().await,
        })
    }

    /// Validate the current inputs, submit them and report the result.
    ///
    /// On success the identifier and recipient are cleared and the duration
    /// is kept. On any failure the inputs stay as they were.
    pub async fn start_watch(
        &self,
        invoker: &dyn ServiceInvoker,
        sink: &dyn FeedbackSink,
    ) -> StartOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Submission already in progress, ignoring");
            return StartOutcome::Busy;
        }
        let _guard = SubmissionGuard(&self.submitting);

        let inputs = self.inputs().await;
        let request = match WatchRequest::build(
            &inputs.identifier,
            &inputs.recipient,
            &inputs.duration,
        ) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Rejected watch input: {}", e);
                emit(sink, FeedbackEvent::for_validation(&e)).await;
                return StartOutcome::Rejected(e);
            }
        };

        let outcome = submit(&request, &self.service, invoker).await;
        emit(
            sink,
            FeedbackEvent::for_outcome(&outcome, request.identifier()),
        )
        .await;

        if outcome.is_success() {
            let mut inputs = self.inputs.write().await;
            inputs.identifier.clear();
            inputs.recipient.clear();
        }

        StartOutcome::Submitted(outcome)
    }
}

impl Default for WatchCard {
    fn default() -> Self {
        Self::new(ServiceName::default())
    }
}
