//! BDD step definitions for request building and submission

use cucumber::{given, then, when};

use wolt_watch::feedback::Severity;
use wolt_watch::{DurationSpec, StartOutcome, SubmissionOutcome, WatchRequest};

use crate::world::WoltWatchWorld;

fn parse_severity(s: &str) -> Severity {
    match s {
        "info" => Severity::Info,
        "error" => Severity::Error,
        other => panic!("Unknown severity: {}", other),
    }
}

#[given("the watch service is registered")]
fn service_registered(world: &mut WoltWatchWorld) {
    world.invoker.registered = true;
}

#[given("the watch service is not registered")]
fn service_not_registered(world: &mut WoltWatchWorld) {
    world.invoker.registered = false;
}

#[given(expr = "the watch service rejects calls with {string}")]
fn service_rejects(world: &mut WoltWatchWorld, message: String) {
    world.invoker.registered = true;
    world.invoker.failure = Some(message);
}

#[given(expr = "the slug {string}")]
async fn given_slug(world: &mut WoltWatchWorld, slug: String) {
    world.card.set_identifier(slug).await;
}

#[given(expr = "the device {string}")]
async fn given_device(world: &mut WoltWatchWorld, device: String) {
    world.card.set_recipient(device).await;
}

#[given(expr = "a duration of {int} hours {int} minutes {int} seconds")]
async fn given_duration(world: &mut WoltWatchWorld, hours: u64, minutes: u64, seconds: u64) {
    world
        .card
        .set_duration(DurationSpec::new(hours, minutes, seconds))
        .await;
}

#[when("the user starts watching")]
async fn start_watching(world: &mut WoltWatchWorld) {
    let outcome = world.card.start_watch(&world.invoker, &world.sink).await;
    world.outcome = Some(outcome);
}

#[when(expr = "a request is built from slug {string}, device {string} and {int} seconds")]
fn build_request(world: &mut WoltWatchWorld, slug: String, device: String, seconds: u64) {
    world.build_result = Some(WatchRequest::build(
        &slug,
        &device,
        &DurationSpec::new(0, 0, seconds),
    ));
}

#[then(expr = "the service should be called with slug {string}, timeout {int} and device {string}")]
fn service_called_with(world: &mut WoltWatchWorld, slug: String, timeout: u64, device: String) {
    let calls = world.invoker.calls.lock().unwrap();
    assert_eq!(calls.len(), 1, "expected exactly one service call");
    assert_eq!(
        calls[0],
        serde_json::json!({"slug": slug, "timeout_m": timeout, "device": device})
    );
}

#[then("the service should not be called")]
fn service_not_called(world: &mut WoltWatchWorld) {
    assert_eq!(world.invoker.call_count(), 0);
}

#[then(expr = "the feedback should be {string} at {word} level")]
fn feedback_is(world: &mut WoltWatchWorld, message: String, level: String) {
    let event = world.sink.last().expect("no feedback emitted");
    assert_eq!(event.message, message);
    assert_eq!(event.severity(), parse_severity(&level));
}

#[then(expr = "validation should fail with {string}")]
fn validation_fails(world: &mut WoltWatchWorld, message: String) {
    match world.outcome.as_ref().expect("no outcome") {
        StartOutcome::Rejected(err) => assert_eq!(err.to_string(), message),
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[then("the outcome should be success")]
fn outcome_success(world: &mut WoltWatchWorld) {
    assert_eq!(
        world.outcome,
        Some(StartOutcome::Submitted(SubmissionOutcome::Success))
    );
}

#[then("the outcome should be service unavailable")]
fn outcome_unavailable(world: &mut WoltWatchWorld) {
    assert_eq!(
        world.outcome,
        Some(StartOutcome::Submitted(SubmissionOutcome::ServiceUnavailable))
    );
}

#[then(expr = "the outcome should be a failed call with {string}")]
fn outcome_failed(world: &mut WoltWatchWorld, message: String) {
    assert_eq!(
        world.outcome,
        Some(StartOutcome::Submitted(SubmissionOutcome::CallFailed(
            message
        )))
    );
}

#[then("the slug and device inputs should be cleared")]
async fn inputs_cleared(world: &mut WoltWatchWorld) {
    let inputs = world.card.inputs().await;
    assert!(inputs.identifier.is_empty());
    assert!(inputs.recipient.is_empty());
}

#[then(expr = "the inputs should still hold slug {string} and device {string}")]
async fn inputs_kept(world: &mut WoltWatchWorld, slug: String, device: String) {
    let inputs = world.card.inputs().await;
    assert_eq!(inputs.identifier, slug);
    assert_eq!(inputs.recipient, device);
}

#[then(expr = "the duration should still be {int} hours {int} minutes {int} seconds")]
async fn duration_kept(world: &mut WoltWatchWorld, hours: u64, minutes: u64, seconds: u64) {
    let inputs = world.card.inputs().await;
    assert_eq!(inputs.duration, DurationSpec::new(hours, minutes, seconds));
}

#[then(expr = "the request timeout should be {int} minutes")]
fn request_timeout(world: &mut WoltWatchWorld, minutes: u64) {
    let request = world
        .build_result
        .as_ref()
        .expect("no request built")
        .as_ref()
        .expect("request was rejected");
    assert_eq!(request.timeout_minutes(), minutes);
}

#[then(expr = "building should fail with {string}")]
fn building_fails(world: &mut WoltWatchWorld, message: String) {
    let err = world
        .build_result
        .as_ref()
        .expect("no request built")
        .as_ref()
        .expect_err("request was accepted");
    assert_eq!(err.to_string(), message);
}
