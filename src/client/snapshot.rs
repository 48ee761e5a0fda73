//! Wire format of the dungeon state endpoint and its conversion into a
//! [`FightState`]
//!
//! The service names the moves rock/paper/scissor; they map to
//! Sword/Shield/Spell in that order.

use crate::combat::economy::{MoveEconomy, MoveSlot, DEFAULT_CHARGES};
use crate::combat::state::FightState;
use crate::combat::stats::{EnemyProfile, StatBlock};
use crate::core::error::{AdvisorError, Result};
use crate::core::types::MoveType;
use serde::Deserialize;

/// Wallet-style ids mark the human player; everything else is an opponent
const PLAYER_ID_PREFIX: &str = "0x";

#[derive(Debug, Clone, Deserialize)]
pub struct DungeonStateResponse {
    #[serde(default)]
    pub data: Option<DungeonData>,
}

impl DungeonStateResponse {
    /// The active run, if the service reports one
    pub fn into_run(self) -> Option<RunData> {
        self.data.and_then(|d| d.run)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DungeonData {
    #[serde(default)]
    pub run: Option<RunData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub players: Vec<CombatantData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Gauge {
    pub current: i32,
}

/// Current values of one move for one combatant
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MoveFacet {
    #[serde(rename = "currentATK")]
    pub current_atk: u32,
    #[serde(rename = "currentDEF")]
    pub current_def: u32,
    #[serde(rename = "currentCharges", default)]
    pub current_charges: Option<u32>,
    #[serde(rename = "maxCharges", default)]
    pub max_charges: Option<u32>,
}

impl MoveFacet {
    fn slot(&self) -> MoveSlot {
        let charges = self.current_charges.unwrap_or(DEFAULT_CHARGES);
        MoveSlot {
            charges,
            cooldown: 0,
            max_charges: self.max_charges.unwrap_or(DEFAULT_CHARGES.max(charges)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombatantData {
    pub id: String,
    pub health: Gauge,
    pub shield: Gauge,
    pub rock: MoveFacet,
    pub paper: MoveFacet,
    pub scissor: MoveFacet,
    #[serde(rename = "lastMove", default)]
    pub last_move: Option<String>,
}

impl CombatantData {
    pub fn facet(&self, mv: MoveType) -> &MoveFacet {
        match mv {
            MoveType::Sword => &self.rock,
            MoveType::Shield => &self.paper,
            MoveType::Spell => &self.scissor,
        }
    }

    /// `[sword_atk, sword_def, shield_atk, shield_def, spell_atk, spell_def]`
    pub fn slots(&self) -> [u32; 6] {
        let mut slots = [0; 6];
        for mv in MoveType::ALL {
            let facet = self.facet(mv);
            slots[mv.index() * 2] = facet.current_atk;
            slots[mv.index() * 2 + 1] = facet.current_def;
        }
        slots
    }

    pub fn economy(&self) -> MoveEconomy {
        MoveEconomy::new(self.rock.slot(), self.paper.slot(), self.scissor.slot())
    }

    fn is_player(&self) -> bool {
        self.id.starts_with(PLAYER_ID_PREFIX)
    }
}

/// An active run split into the player and the opponent they are fighting
#[derive(Debug, Clone)]
pub struct RunSnapshot {
    pub run_id: String,
    pub player: CombatantData,
    pub enemy: CombatantData,
}

impl RunSnapshot {
    pub fn from_run(run: RunData) -> Result<Self> {
        let player = run
            .players
            .iter()
            .find(|p| p.is_player())
            .cloned()
            .ok_or_else(|| AdvisorError::MalformedSnapshot(format!("run {} has no player", run.id)))?;
        let enemy = run
            .players
            .iter()
            .find(|p| !p.is_player())
            .cloned()
            .ok_or_else(|| AdvisorError::MalformedSnapshot(format!("run {} has no opponent", run.id)))?;

        Ok(Self {
            run_id: run.id,
            player,
            enemy,
        })
    }

    /// Build the fight snapshot for `round`.
    ///
    /// The service reports charges but not cooldowns, so cooldowns are zero.
    /// The player's base health and armor are taken from the current values.
    pub fn to_fight_state(&self, round: u32) -> FightState {
        let player_skills = StatBlock::from_slots(
            self.player.slots(),
            self.player.health.current.max(0) as u32,
            self.player.shield.current.max(0) as u32,
        );
        let last_player_move = self.player.last_move.as_deref().and_then(MoveType::from_wire);

        FightState::new(self.run_id.clone(), player_skills, self.enemy.health.current)
            .with_player_health(self.player.health.current, self.player.shield.current)
            .with_enemy(EnemyProfile::new(self.enemy.id.clone(), self.enemy.slots()))
            .with_enemy_health(self.enemy.health.current, self.enemy.shield.current)
            .with_player_economy(self.player.economy())
            .with_enemy_economy(self.enemy.economy())
            .with_last_moves(last_player_move, None)
            .with_round_number(round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVE_RUN: &str = r#"{
        "data": {
            "run": {
                "_id": "run-42",
                "players": [
                    {
                        "id": "0xabc",
                        "health": {"current": 16, "starting": 16},
                        "shield": {"current": 6, "starting": 6},
                        "rock": {"currentATK": 9, "currentDEF": 0, "currentCharges": 2, "maxCharges": 3},
                        "paper": {"currentATK": 0, "currentDEF": 4, "currentCharges": 3, "maxCharges": 3},
                        "scissor": {"currentATK": 2, "currentDEF": 2, "currentCharges": 0, "maxCharges": 3},
                        "lastMove": "rock"
                    },
                    {
                        "id": "Goblin",
                        "health": {"current": 12},
                        "shield": {"current": 2},
                        "rock": {"currentATK": 4, "currentDEF": 1, "currentCharges": 3, "maxCharges": 3},
                        "paper": {"currentATK": 2, "currentDEF": 3, "currentCharges": 1, "maxCharges": 3},
                        "scissor": {"currentATK": 5, "currentDEF": 0, "currentCharges": 3, "maxCharges": 3}
                    }
                ]
            }
        }
    }"#;

    fn parse(json: &str) -> Option<RunData> {
        serde_json::from_str::<DungeonStateResponse>(json).unwrap().into_run()
    }

    #[test]
    fn test_active_run_converts() {
        let snapshot = RunSnapshot::from_run(parse(ACTIVE_RUN).unwrap()).unwrap();
        let state = snapshot.to_fight_state(5);

        assert_eq!(state.enemy_id(), "run-42");
        assert_eq!(state.round_number(), 5);
        assert_eq!(state.player_health(), 16);
        assert_eq!(state.player_shield(), 6);
        assert_eq!(state.player_skills().attack(MoveType::Sword), 9);
        assert_eq!(state.player_skills().defense(MoveType::Shield), 4);
        assert_eq!(state.player_economy().charges(MoveType::Sword), 2);
        assert!(!state.player_economy().is_legal(MoveType::Spell));
        assert_eq!(state.last_player_move(), Some(MoveType::Sword));
        assert_eq!(state.last_enemy_move(), None);

        let enemy = state.enemy_stats().unwrap();
        assert_eq!(enemy.name, "Goblin");
        assert_eq!(enemy.move_pattern, [4, 1, 2, 3, 5, 0]);
        assert_eq!(state.enemy_health(), 12);
        assert_eq!(state.enemy_shield(), 2);
        assert_eq!(state.enemy_economy().charges(MoveType::Shield), 1);
    }

    #[test]
    fn test_null_run_means_no_fight() {
        assert!(parse(r#"{"data": {"run": null}}"#).is_none());
        assert!(parse(r#"{"data": null}"#).is_none());
        assert!(parse(r#"{}"#).is_none());
    }

    #[test]
    fn test_run_without_opponent_is_malformed() {
        let run = parse(
            r#"{"data": {"run": {"_id": "r", "players": [{
                "id": "0x1", "health": {"current": 1}, "shield": {"current": 0},
                "rock": {"currentATK": 1, "currentDEF": 1},
                "paper": {"currentATK": 1, "currentDEF": 1},
                "scissor": {"currentATK": 1, "currentDEF": 1}
            }]}}}"#,
        )
        .unwrap();
        assert!(matches!(
            RunSnapshot::from_run(run),
            Err(AdvisorError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn test_missing_charges_default_to_full() {
        let facet: MoveFacet = serde_json::from_str(r#"{"currentATK": 1, "currentDEF": 2}"#).unwrap();
        let slot = facet.slot();
        assert_eq!(slot.charges, 3);
        assert_eq!(slot.cooldown, 0);
        assert!(slot.is_legal());
    }

    #[test]
    fn test_unknown_last_move_is_ignored() {
        let mut run = parse(ACTIVE_RUN).unwrap();
        run.players[0].last_move = Some(String::new());
        let state = RunSnapshot::from_run(run).unwrap().to_fight_state(0);
        assert_eq!(state.last_player_move(), None);
    }
}
