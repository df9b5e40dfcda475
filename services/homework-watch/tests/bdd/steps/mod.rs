//! BDD step definitions for homework-watch

pub mod notification_steps;
pub mod polling_steps;
pub mod status_steps;
