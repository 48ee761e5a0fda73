//! Per-round fight snapshot
//!
//! A `FightState` is never edited once built. Builders consume and return the
//! value; advancing a round (see [`crate::combat::transition::advance`])
//! produces a fresh snapshot with its own copies of history and economies.

use crate::combat::economy::MoveEconomy;
use crate::combat::stats::{EnemyProfile, StatBlock};
use crate::core::error::{AdvisorError, Result};
use crate::core::types::{MoveType, Side};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Moves played in one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player_move: MoveType,
    pub enemy_move: MoveType,
    pub round: u32,
}

/// Damage dealt in one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Damage the player dealt
    pub player_damage: u32,
    /// Damage the enemy dealt
    pub enemy_damage: u32,
    pub round: u32,
}

/// Snapshot of one round of a single fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightState {
    enemy_id: String,
    enemy_health: i32,
    #[serde(default)]
    enemy_shield: i32,
    player_health: i32,
    player_shield: i32,
    player_skills: StatBlock,
    enemy_stats: Option<EnemyProfile>,
    last_player_move: Option<MoveType>,
    last_enemy_move: Option<MoveType>,
    #[serde(default)]
    player_economy: MoveEconomy,
    #[serde(default)]
    enemy_economy: MoveEconomy,
    #[serde(default)]
    round_number: u32,
    #[serde(default)]
    move_history: Vec<MoveRecord>,
    #[serde(default)]
    move_outcomes: Vec<OutcomeRecord>,
    timestamp: f64,
}

/// Seconds since the Unix epoch
pub fn now_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

impl FightState {
    /// Initial, unplayed snapshot. Player health starts at the base values,
    /// the opponent at `enemy_health` with no shield, both economies at full
    /// default charges.
    pub fn new(enemy_id: impl Into<String>, player_skills: StatBlock, enemy_health: i32) -> Self {
        Self {
            enemy_id: enemy_id.into(),
            enemy_health,
            enemy_shield: 0,
            player_health: player_skills.base_hp as i32,
            player_shield: player_skills.base_armor as i32,
            player_skills,
            enemy_stats: None,
            last_player_move: None,
            last_enemy_move: None,
            player_economy: MoveEconomy::default(),
            enemy_economy: MoveEconomy::default(),
            round_number: 0,
            move_history: Vec::new(),
            move_outcomes: Vec::new(),
            timestamp: now_timestamp(),
        }
    }

    pub fn with_enemy(mut self, profile: EnemyProfile) -> Self {
        self.enemy_stats = Some(profile);
        self
    }

    pub fn with_enemy_health(mut self, health: i32, shield: i32) -> Self {
        self.enemy_health = health;
        self.enemy_shield = shield;
        self
    }

    pub fn with_player_health(mut self, health: i32, shield: i32) -> Self {
        self.player_health = health;
        self.player_shield = shield;
        self
    }

    pub fn with_player_economy(mut self, economy: MoveEconomy) -> Self {
        self.player_economy = economy;
        self
    }

    pub fn with_enemy_economy(mut self, economy: MoveEconomy) -> Self {
        self.enemy_economy = economy;
        self
    }

    pub fn with_last_moves(mut self, player: Option<MoveType>, enemy: Option<MoveType>) -> Self {
        self.last_player_move = player;
        self.last_enemy_move = enemy;
        self
    }

    /// Round counter for snapshots taken from an external source, which
    /// carries no per-round history of its own
    pub fn with_round_number(mut self, round: u32) -> Self {
        self.round_number = round;
        self
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Successor snapshot: moves and round recorded, health reduced by the
    /// given damage. Used by the state transition only.
    pub(crate) fn successor(
        &self,
        player_move: MoveType,
        enemy_move: MoveType,
        player_damage: u32,
        enemy_damage: u32,
    ) -> Self {
        let round = self.round_number + 1;
        let mut next = self.clone();
        next.last_player_move = Some(player_move);
        next.last_enemy_move = Some(enemy_move);
        next.round_number = round;
        next.enemy_health = self.enemy_health.saturating_sub_unsigned(player_damage);
        next.player_health = self.player_health.saturating_sub_unsigned(enemy_damage);
        next.move_history.push(MoveRecord {
            player_move,
            enemy_move,
            round,
        });
        next.move_outcomes.push(OutcomeRecord {
            player_damage,
            enemy_damage,
            round,
        });
        next.timestamp = now_timestamp();
        next
    }

    pub fn enemy_id(&self) -> &str {
        &self.enemy_id
    }

    pub fn enemy_health(&self) -> i32 {
        self.enemy_health
    }

    pub fn enemy_shield(&self) -> i32 {
        self.enemy_shield
    }

    pub fn player_health(&self) -> i32 {
        self.player_health
    }

    pub fn player_shield(&self) -> i32 {
        self.player_shield
    }

    pub fn player_skills(&self) -> &StatBlock {
        &self.player_skills
    }

    pub fn enemy_stats(&self) -> Option<&EnemyProfile> {
        self.enemy_stats.as_ref()
    }

    /// Opponent profile, or `MissingOpponentProfile` if none is known
    pub fn require_enemy(&self) -> Result<&EnemyProfile> {
        self.enemy_stats
            .as_ref()
            .ok_or_else(|| AdvisorError::MissingOpponentProfile {
                enemy_id: self.enemy_id.clone(),
            })
    }

    pub fn last_player_move(&self) -> Option<MoveType> {
        self.last_player_move
    }

    pub fn last_enemy_move(&self) -> Option<MoveType> {
        self.last_enemy_move
    }

    pub fn player_economy(&self) -> &MoveEconomy {
        &self.player_economy
    }

    pub fn enemy_economy(&self) -> &MoveEconomy {
        &self.enemy_economy
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn move_outcomes(&self) -> &[OutcomeRecord] {
        &self.move_outcomes
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Either side at or below zero health
    pub fn is_over(&self) -> bool {
        self.player_health <= 0 || self.enemy_health <= 0
    }

    /// Side left standing once the fight is over. A double knockout goes to
    /// nobody.
    pub fn winner(&self) -> Option<Side> {
        match (self.player_health <= 0, self.enemy_health <= 0) {
            (false, true) => Some(Side::Player),
            (true, false) => Some(Side::Enemy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> StatBlock {
        StatBlock::from_slots([9, 0, 0, 4, 2, 2], 16, 6)
    }

    #[test]
    fn test_new_state_is_round_zero() {
        let state = FightState::new("run-1", player(), 20);
        assert_eq!(state.round_number(), 0);
        assert!(state.move_history().is_empty());
        assert!(state.move_outcomes().is_empty());
        assert_eq!(state.last_player_move(), None);
        assert_eq!(state.player_health(), 16);
        assert_eq!(state.player_shield(), 6);
    }

    #[test]
    fn test_new_state_is_not_over() {
        let state = FightState::new("run-1", player(), 20);
        assert_eq!(state.enemy_health(), 20);
        assert_eq!(state.enemy_shield(), 0);
        assert!(!state.is_over());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_each_state_owns_fresh_collections() {
        let a = FightState::new("a", player(), 20);
        let b = FightState::new("b", player(), 20);
        let a2 = a.successor(MoveType::Sword, MoveType::Spell, 1, 0);
        assert_eq!(a2.move_history().len(), 1);
        assert!(a.move_history().is_empty());
        assert!(b.move_history().is_empty());
    }

    #[test]
    fn test_require_enemy_reports_missing_profile() {
        let state = FightState::new("run-7", player(), 20);
        match state.require_enemy() {
            Err(AdvisorError::MissingOpponentProfile { enemy_id }) => assert_eq!(enemy_id, "run-7"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_is_over_and_winner() {
        let state = FightState::new("run", player(), 10);
        assert!(!state.is_over());
        assert_eq!(state.winner(), None);

        let won = state.clone().with_enemy_health(-2, 0);
        assert!(won.is_over());
        assert_eq!(won.winner(), Some(Side::Player));

        let lost = state.with_player_health(0, 0);
        assert!(lost.is_over());
        assert_eq!(lost.winner(), Some(Side::Enemy));
    }

    #[test]
    fn test_json_roundtrip_preserves_fields() {
        let state = FightState::new("run", player(), 20)
            .with_enemy(EnemyProfile::new("Goblin", [3, 1, 2, 2, 4, 0]))
            .with_enemy_health(20, 3)
            .with_last_moves(Some(MoveType::Spell), None)
            .with_timestamp(1_700_000_000.5);

        let json = serde_json::to_string(&state).unwrap();
        let back: FightState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
