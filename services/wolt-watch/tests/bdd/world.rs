//! BDD test world for the wolt-watch control

use std::sync::Mutex;

use cucumber::World;
use wolt_watch::feedback::{FeedbackEvent, FeedbackSink};
use wolt_watch::service::ServiceInvoker;
use wolt_watch::targets::{EntityState, NotificationTarget};
use wolt_watch::{
    InvocationError, ServiceName, StartOutcome, ValidationError, WatchCard, WatchRequest,
};

/// Stand-in for the host service bus
#[derive(Debug, Default)]
pub struct FakeInvoker {
    pub registered: bool,
    pub failure: Option<String>,
    pub calls: Mutex<Vec<serde_json::Value>>,
}

impl FakeInvoker {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ServiceInvoker for FakeInvoker {
    async fn has_operation(&self, _service: &ServiceName) -> wolt_watch::Result<bool> {
        Ok(self.registered)
    }

    async fn invoke(
        &self,
        _service: &ServiceName,
        params: serde_json::Value,
    ) -> Result<(), InvocationError> {
        self.calls.lock().unwrap().push(params);
        match &self.failure {
            Some(message) => Err(InvocationError::new(message.clone())),
            None => Ok(()),
        }
    }
}

/// Collects every feedback event
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<FeedbackEvent>>,
}

impl RecordingSink {
    pub fn last(&self) -> Option<FeedbackEvent> {
        self.events.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl FeedbackSink for RecordingSink {
    async fn notify(&self, event: &FeedbackEvent) -> wolt_watch::Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[derive(Debug, Default, World)]
pub struct WoltWatchWorld {
    // Submission workflow
    pub card: WatchCard,
    pub invoker: FakeInvoker,
    pub sink: RecordingSink,
    pub outcome: Option<StartOutcome>,

    // Request building
    pub build_result: Option<Result<WatchRequest, ValidationError>>,

    // Target resolution
    pub entities: Vec<EntityState>,
    pub targets: Vec<NotificationTarget>,
}
