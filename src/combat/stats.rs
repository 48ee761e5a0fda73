//! Attack/defense values per move facet
//!
//! Facets are resolved through a `match` on [`MoveType`], never by building
//! field names at runtime.

use crate::core::types::MoveType;
use serde::{Deserialize, Serialize};

/// A combatant's attack and defense for each move, plus base health and armor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub sword_atk: u32,
    pub sword_def: u32,
    pub shield_atk: u32,
    pub shield_def: u32,
    pub spell_atk: u32,
    pub spell_def: u32,
    pub base_hp: u32,
    /// Shield ceiling
    pub base_armor: u32,
}

impl StatBlock {
    pub fn attack(&self, mv: MoveType) -> u32 {
        match mv {
            MoveType::Sword => self.sword_atk,
            MoveType::Shield => self.shield_atk,
            MoveType::Spell => self.spell_atk,
        }
    }

    pub fn defense(&self, mv: MoveType) -> u32 {
        match mv {
            MoveType::Sword => self.sword_def,
            MoveType::Shield => self.shield_def,
            MoveType::Spell => self.spell_def,
        }
    }

    /// Build a block from the six-slot layout
    /// `[sword_atk, sword_def, shield_atk, shield_def, spell_atk, spell_def]`.
    pub fn from_slots(slots: [u32; 6], base_hp: u32, base_armor: u32) -> Self {
        Self {
            sword_atk: slots[0],
            sword_def: slots[1],
            shield_atk: slots[2],
            shield_def: slots[3],
            spell_atk: slots[4],
            spell_def: slots[5],
            base_hp,
            base_armor,
        }
    }
}

/// What the advisor knows about the opponent of a fight.
///
/// The move pattern doubles as the opponent's stats: the service reports the
/// opponent's current attack/defense per move, and those six numbers are both
/// its stat block and the weights its move distribution is estimated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub name: String,
    /// `[sword_atk, sword_def, shield_atk, shield_def, spell_atk, spell_def]`
    pub move_pattern: [u32; 6],
}

impl EnemyProfile {
    pub fn new(name: impl Into<String>, move_pattern: [u32; 6]) -> Self {
        Self {
            name: name.into(),
            move_pattern,
        }
    }

    /// Opponent stats derived from the pattern
    pub fn stats(&self) -> StatBlock {
        StatBlock::from_slots(self.move_pattern, 0, 0)
    }

    /// Unnormalized weight of a move: its attack slot
    pub fn attack_weight(&self, mv: MoveType) -> u32 {
        self.move_pattern[mv.index() * 2]
    }

    /// Sum over all six slots, defense slots included
    pub fn pattern_total(&self) -> u64 {
        self.move_pattern.iter().map(|&v| v as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatBlock {
        StatBlock {
            sword_atk: 9,
            sword_def: 0,
            shield_atk: 0,
            shield_def: 4,
            spell_atk: 2,
            spell_def: 2,
            base_hp: 16,
            base_armor: 6,
        }
    }

    #[test]
    fn test_facet_lookup() {
        let stats = sample();
        assert_eq!(stats.attack(MoveType::Sword), 9);
        assert_eq!(stats.defense(MoveType::Shield), 4);
        assert_eq!(stats.attack(MoveType::Spell), 2);
        assert_eq!(stats.defense(MoveType::Sword), 0);
    }

    #[test]
    fn test_from_slots_layout() {
        let stats = StatBlock::from_slots([9, 0, 0, 4, 2, 2], 16, 6);
        assert_eq!(stats, sample());
    }

    #[test]
    fn test_enemy_profile_weights_use_attack_slots() {
        let enemy = EnemyProfile::new("goblin", [5, 1, 3, 2, 7, 4]);
        assert_eq!(enemy.attack_weight(MoveType::Sword), 5);
        assert_eq!(enemy.attack_weight(MoveType::Shield), 3);
        assert_eq!(enemy.attack_weight(MoveType::Spell), 7);
        assert_eq!(enemy.pattern_total(), 22);
    }

    #[test]
    fn test_enemy_stats_mirror_pattern() {
        let enemy = EnemyProfile::new("goblin", [5, 1, 3, 2, 7, 4]);
        let stats = enemy.stats();
        assert_eq!(stats.attack(MoveType::Spell), 7);
        assert_eq!(stats.defense(MoveType::Spell), 4);
        assert_eq!(stats.defense(MoveType::Sword), 1);
    }
}
