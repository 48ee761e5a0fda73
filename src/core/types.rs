//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three cyclic combat actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    Sword,
    Shield,
    Spell,
}

impl MoveType {
    /// Every move, in the fixed iteration order used for scoring and tie-breaks
    pub const ALL: [MoveType; 3] = [MoveType::Sword, MoveType::Shield, MoveType::Spell];

    /// Position of this move in `ALL`
    pub fn index(self) -> usize {
        match self {
            MoveType::Sword => 0,
            MoveType::Shield => 1,
            MoveType::Spell => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MoveType::Sword => "Sword",
            MoveType::Shield => "Shield",
            MoveType::Spell => "Spell",
        }
    }

    /// Parse a move name as reported by the game service.
    ///
    /// The service speaks rock/paper/scissor; saved histories use the
    /// Sword/Shield/Spell names. Matching is case-insensitive. Returns
    /// `None` for anything else (including the empty string the service
    /// sends before the first round).
    pub fn from_wire(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sword" | "rock" => Some(MoveType::Sword),
            "shield" | "paper" => Some(MoveType::Shield),
            "spell" | "scissor" | "scissors" => Some(MoveType::Spell),
            _ => None,
        }
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two combatants in a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}
