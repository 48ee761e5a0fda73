//! Combat Advisor - expected-value move advice for Sword/Shield/Spell fights

pub mod advisor;
pub mod client;
pub mod combat;
pub mod core;
pub mod history;
pub mod ui;
