//! Per-move charges and cooldowns
//!
//! A move is legal only while it has charges left and is off cooldown.

use crate::core::types::MoveType;
use serde::{Deserialize, Serialize};

/// Charges every move starts a fight with when the source reports nothing
pub const DEFAULT_CHARGES: u32 = 3;

/// Charge and cooldown state of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSlot {
    pub charges: u32,
    /// Turns until the move can be used again
    #[serde(default)]
    pub cooldown: u32,
    /// Charge ceiling as reported by the source; display only
    #[serde(default = "default_max_charges")]
    pub max_charges: u32,
}

fn default_max_charges() -> u32 {
    DEFAULT_CHARGES
}

impl Default for MoveSlot {
    fn default() -> Self {
        Self {
            charges: DEFAULT_CHARGES,
            cooldown: 0,
            max_charges: DEFAULT_CHARGES,
        }
    }
}

impl MoveSlot {
    pub fn new(charges: u32, cooldown: u32) -> Self {
        Self {
            charges,
            cooldown,
            max_charges: DEFAULT_CHARGES.max(charges),
        }
    }

    pub fn is_legal(&self) -> bool {
        self.cooldown == 0 && self.charges > 0
    }
}

/// Charge/cooldown bookkeeping for one side of a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveEconomy {
    #[serde(rename = "Sword")]
    pub sword: MoveSlot,
    #[serde(rename = "Shield")]
    pub shield: MoveSlot,
    #[serde(rename = "Spell")]
    pub spell: MoveSlot,
}

impl MoveEconomy {
    pub fn new(sword: MoveSlot, shield: MoveSlot, spell: MoveSlot) -> Self {
        Self {
            sword,
            shield,
            spell,
        }
    }

    /// Economy with the given charges and every cooldown at zero
    pub fn with_charges(sword: u32, shield: u32, spell: u32) -> Self {
        Self::new(
            MoveSlot::new(sword, 0),
            MoveSlot::new(shield, 0),
            MoveSlot::new(spell, 0),
        )
    }

    pub fn slot(&self, mv: MoveType) -> &MoveSlot {
        match mv {
            MoveType::Sword => &self.sword,
            MoveType::Shield => &self.shield,
            MoveType::Spell => &self.spell,
        }
    }

    /// Copy of this economy with one slot replaced
    pub fn with_slot(mut self, mv: MoveType, slot: MoveSlot) -> Self {
        match mv {
            MoveType::Sword => self.sword = slot,
            MoveType::Shield => self.shield = slot,
            MoveType::Spell => self.spell = slot,
        }
        self
    }

    pub fn charges(&self, mv: MoveType) -> u32 {
        self.slot(mv).charges
    }

    pub fn cooldown(&self, mv: MoveType) -> u32 {
        self.slot(mv).cooldown
    }

    pub fn is_legal(&self, mv: MoveType) -> bool {
        self.slot(mv).is_legal()
    }

    /// Legal moves in `MoveType::ALL` order
    pub fn legal_moves(&self) -> Vec<MoveType> {
        MoveType::ALL
            .into_iter()
            .filter(|&mv| self.is_legal(mv))
            .collect()
    }
}
