//! Game service state source

pub mod api;
pub mod snapshot;

pub use api::GameClient;
pub use snapshot::{DungeonStateResponse, RunSnapshot};
