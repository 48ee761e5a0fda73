//! Terminal presentation of a polling tick

pub mod display;

pub use display::{format_value, present, render_tick};
