//! Fight data model and the deterministic round step

pub mod counter;
pub mod damage;
pub mod economy;
pub mod state;
pub mod stats;
pub mod transition;

pub use damage::resolve_damage;
pub use economy::{MoveEconomy, MoveSlot};
pub use state::{FightState, MoveRecord, OutcomeRecord};
pub use stats::{EnemyProfile, StatBlock};
pub use transition::advance;
