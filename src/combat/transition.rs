use crate::combat::damage::resolve_damage;
use crate::combat::state::FightState;
use crate::core::error::Result;
use crate::core::types::MoveType;

/// Play one round and return the next snapshot.
///
/// Damage for both directions is resolved against `state` as it was before
/// the round. Health may go negative. Charges and cooldowns are carried over
/// unchanged; the game service owns that bookkeeping and reports it in the
/// next snapshot. `state` itself is not modified.
pub fn advance(state: &FightState, player_move: MoveType, enemy_move: MoveType) -> Result<FightState> {
    let player_damage = resolve_damage(player_move, enemy_move, state)?;
    let enemy_damage = resolve_damage(enemy_move, player_move, state)?;

    let next = state.successor(player_move, enemy_move, player_damage, enemy_damage);
    tracing::debug!(
        round = next.round_number(),
        %player_move,
        %enemy_move,
        player_damage,
        enemy_damage,
        player_health = next.player_health(),
        enemy_health = next.enemy_health(),
        "advanced fight"
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::stats::{EnemyProfile, StatBlock};

    fn state() -> FightState {
        FightState::new("run", StatBlock::from_slots([9, 0, 0, 4, 2, 2], 16, 6), 30)
            .with_enemy(EnemyProfile::new("Goblin", [5, 1, 3, 6, 4, 2]))
    }

    #[test]
    fn test_advance_records_round() {
        let before = state();
        let after = advance(&before, MoveType::Sword, MoveType::Spell).unwrap();

        assert_eq!(after.round_number(), 1);
        assert_eq!(after.last_player_move(), Some(MoveType::Sword));
        assert_eq!(after.last_enemy_move(), Some(MoveType::Spell));
        assert_eq!(after.move_history().len(), 1);
        assert_eq!(after.move_outcomes().len(), 1);
        assert_eq!(after.move_history()[0].round, 1);
    }

    #[test]
    fn test_advance_applies_damage_from_previous_state() {
        let before = state();
        let after = advance(&before, MoveType::Sword, MoveType::Spell).unwrap();

        // Player sword: 5 - 1 = 4; enemy spell: 4 - 2 = 2
        assert_eq!(after.move_outcomes()[0].player_damage, 4);
        assert_eq!(after.move_outcomes()[0].enemy_damage, 2);
        assert_eq!(after.enemy_health(), 26);
        assert_eq!(after.player_health(), 14);
    }

    #[test]
    fn test_advance_leaves_input_untouched() {
        let before = state();
        let snapshot = before.clone();
        let _ = advance(&before, MoveType::Shield, MoveType::Sword).unwrap();
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_health_can_go_negative() {
        let before = state().with_enemy_health(1, 0);
        let after = advance(&before, MoveType::Sword, MoveType::Shield).unwrap();
        assert_eq!(after.enemy_health(), -3);
        assert!(after.is_over());
    }

    #[test]
    fn test_history_length_tracks_rounds() {
        let mut current = state().with_enemy_health(500, 0).with_player_health(500, 0);
        for (i, mv) in MoveType::ALL.iter().cycle().take(7).enumerate() {
            current = advance(&current, *mv, mv.beats()).unwrap();
            assert_eq!(current.round_number() as usize, i + 1);
            assert_eq!(current.move_history().len(), i + 1);
            assert_eq!(current.move_outcomes().len(), i + 1);
        }
    }
}
