//! Move recommendation

pub mod scoring;

pub use scoring::{is_illegal, ExpectedValueEngine, MoveValues, ScoreWeights, ILLEGAL};
