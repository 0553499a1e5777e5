//! BDD step definitions for notification target resolution

use std::collections::HashMap;

use cucumber::{gherkin::Step, given, then, when};

use wolt_watch::targets::{resolve_targets, EntityState};

use crate::world::WoltWatchWorld;

#[given("the host has these entities:")]
fn host_entities(world: &mut WoltWatchWorld, step: &Step) {
    let table = step.table.as_ref().expect("entity table missing");
    for row in table.rows.iter().skip(1) {
        let mut attributes = HashMap::new();
        if let Some(name) = row.get(1).filter(|n| !n.is_empty()) {
            attributes.insert("friendly_name".to_string(), serde_json::json!(name));
        }
        world.entities.push(EntityState {
            entity_id: row[0].clone(),
            attributes,
        });
    }
}

#[when("the notification targets are resolved")]
fn resolve(world: &mut WoltWatchWorld) {
    world.targets = resolve_targets(&world.entities);
}

#[then(expr = "there should be {int} targets")]
fn target_count(world: &mut WoltWatchWorld, expected: usize) {
    assert_eq!(world.targets.len(), expected);
}

#[then(expr = "target {int} should be {string} shown as {string}")]
fn target_is(world: &mut WoltWatchWorld, index: usize, id: String, display_name: String) {
    let target = &world.targets[index - 1];
    assert_eq!(target.id, id);
    assert_eq!(target.display_name, display_name);
}
