//! BDD step definitions for the wolt-watch control

pub mod submission_steps;
pub mod target_steps;
