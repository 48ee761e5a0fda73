use crate::combat::state::FightState;
use crate::core::error::Result;
use crate::core::types::MoveType;

/// Damage `attack_move` deals against `defense_move`.
///
/// Both powers are read from the attack move's facet. Attack power comes from
/// the player's block when the player's last recorded move was `attack_move`,
/// otherwise from the opponent's. Defense power comes from the player's block
/// when the opponent's last recorded move was `defense_move`, otherwise from
/// the opponent's. The same function serves both directions of an exchange by
/// swapping the arguments.
///
/// Never negative; clamping against remaining health is up to the caller.
pub fn resolve_damage(attack_move: MoveType, defense_move: MoveType, state: &FightState) -> Result<u32> {
    let player = state.player_skills();
    let enemy = state.require_enemy()?.stats();

    let attack_power = if state.last_player_move() == Some(attack_move) {
        player.attack(attack_move)
    } else {
        enemy.attack(attack_move)
    };

    let defense_power = if state.last_enemy_move() == Some(defense_move) {
        player.defense(attack_move)
    } else {
        enemy.defense(attack_move)
    };

    let damage = attack_power.saturating_sub(defense_power);
    tracing::trace!(%attack_move, %defense_move, attack_power, defense_power, damage, "resolved damage");
    Ok(damage)
}
