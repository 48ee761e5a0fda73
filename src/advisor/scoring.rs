//! Expected-value scoring of candidate moves
//!
//! A move's value is the probability-weighted sum, over the opponent's
//! possible replies, of damage dealt and shield repaired when the move
//! counters the reply, minus damage taken when the reply counters the move.
//! Mirror matches contribute nothing.

use crate::combat::state::FightState;
use crate::core::error::{AdvisorError, Result};
use crate::core::types::MoveType;
use serde::{Deserialize, Serialize};

/// Score of a move that cannot be played (no charges or on cooldown)
pub const ILLEGAL: f64 = f64::NEG_INFINITY;

/// True for the illegal-move sentinel
pub fn is_illegal(value: f64) -> bool {
    value == ILLEGAL
}

/// Weights and thresholds of the scoring formula.
///
/// The defaults are the tuned values the advisor ships with; a config file
/// may override any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Multiplier on damage dealt when our move counters the reply
    pub damage_dealt_weight: f64,
    /// Multiplier on damage taken when the reply counters our move
    pub damage_taken_weight: f64,
    /// Shield value repairs are capped against
    pub shield_cap: i64,
    /// Opponent health at or below which the finishing bonus applies
    pub finisher_health_threshold: i32,
    /// Flat bonus for Sword when the opponent is nearly dead
    pub finisher_bonus: f64,
    /// Charges are scaled as `charges / charge_denominator`
    pub charge_denominator: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            damage_dealt_weight: 2.0,
            damage_taken_weight: 2.0,
            shield_cap: 100,
            finisher_health_threshold: 4,
            finisher_bonus: 5.0,
            charge_denominator: 3.0,
        }
    }
}

/// Scores of all three moves, in `MoveType::ALL` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveValues {
    values: [f64; 3],
}

impl MoveValues {
    pub fn get(&self, mv: MoveType) -> f64 {
        self.values[mv.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MoveType, f64)> + '_ {
        MoveType::ALL.into_iter().map(|mv| (mv, self.get(mv)))
    }

    /// Highest-scoring legal move. The first maximal value in iteration order
    /// wins ties. `None` when every move is illegal.
    pub fn best(&self) -> Option<(MoveType, f64)> {
        let mut best: Option<(MoveType, f64)> = None;
        for (mv, value) in self.iter() {
            if is_illegal(value) {
                continue;
            }
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((mv, value)),
            }
        }
        best
    }
}

/// Scores moves for the player side of a fight
#[derive(Debug, Clone, Default)]
pub struct ExpectedValueEngine {
    weights: ScoreWeights,
}

impl ExpectedValueEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Expected value of playing `mv` this round.
    ///
    /// Returns [`ILLEGAL`] for a move without charges or on cooldown, before
    /// looking at anything else. Otherwise fails if the opponent profile is
    /// missing or its pattern sums to zero.
    pub fn score(&self, mv: MoveType, state: &FightState) -> Result<f64> {
        let economy = state.player_economy();
        if !economy.is_legal(mv) {
            return Ok(ILLEGAL);
        }

        let enemy = state.require_enemy()?;
        let total = enemy.pattern_total();
        if total == 0 {
            return Err(AdvisorError::MalformedPattern {
                enemy_id: state.enemy_id().to_string(),
            });
        }

        let w = &self.weights;
        let skills = state.player_skills();
        let player_atk = skills.attack(mv) as i64;
        let player_def = skills.defense(mv) as i64;
        let enemy_health = state.enemy_health() as i64;
        let player_health = state.player_health() as i64;
        let player_shield = state.player_shield() as i64;

        let mut value = 0.0;

        for reply in MoveType::ALL {
            // Unavailable replies drop out; their weight is not redistributed
            if !state.enemy_economy().is_legal(reply) {
                continue;
            }

            let probability = enemy.attack_weight(reply) as f64 / total as f64;
            let enemy_power = enemy.stats().attack(reply) as i64;

            if mv.counters(reply) {
                let damage_dealt = enemy_health.min(enemy_power.saturating_mul(player_atk.max(1)));
                let shield_repair = w
                    .shield_cap
                    .saturating_sub(player_shield)
                    .min((enemy_power / 2).saturating_mul(player_def.max(1)));
                value += probability * (damage_dealt as f64 * w.damage_dealt_weight + shield_repair as f64);
            } else if reply.counters(mv) {
                let damage_taken = player_health.min(enemy_power / player_def.max(1));
                value -= probability * damage_taken as f64 * w.damage_taken_weight;
            }
        }

        if state.enemy_health() <= w.finisher_health_threshold && mv == MoveType::Sword && player_atk > 0 {
            value += w.finisher_bonus;
        }

        value *= economy.charges(mv) as f64 / w.charge_denominator;

        tracing::trace!(%mv, value, "scored move");
        Ok(value)
    }

    /// Scores for all three moves
    pub fn score_all(&self, state: &FightState) -> Result<MoveValues> {
        state.require_enemy()?;
        let mut values = [ILLEGAL; 3];
        for mv in MoveType::ALL {
            values[mv.index()] = self.score(mv, state)?;
        }
        Ok(MoveValues { values })
    }

    /// Highest-scoring legal move and its value.
    ///
    /// Fails with `NoLegalMove` rather than returning the illegal sentinel
    /// when nothing can be played.
    pub fn best_move(&self, state: &FightState) -> Result<(MoveType, f64)> {
        let values = self.score_all(state)?;
        let best = values.best().ok_or(AdvisorError::NoLegalMove)?;
        tracing::debug!(best_move = %best.0, value = best.1, round = state.round_number(), "picked move");
        Ok(best)
    }
}
