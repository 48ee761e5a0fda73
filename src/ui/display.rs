use crate::advisor::scoring::{is_illegal, MoveValues};
use crate::combat::state::FightState;
use crate::core::error::Result;
use crate::core::types::MoveType;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Expected value to two decimals, or the unavailable marker for the
/// illegal-move sentinel
pub fn format_value(value: f64) -> String {
    if is_illegal(value) {
        "UNAVAILABLE (cooldown or no charges)".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Text panel for one tick
pub fn render_tick(state: &FightState, values: &MoveValues, best: Option<(MoveType, f64)>) -> String {
    let mut out = String::new();
    let skills = state.player_skills();
    let economy = state.player_economy();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Current Game State (Round {}):", state.round_number());
    let _ = writeln!(out, "Player Stats:");
    let _ = writeln!(out, "  Health: {}", state.player_health());
    let _ = writeln!(out, "  Shield: {}", state.player_shield());
    for mv in MoveType::ALL {
        let slot = economy.slot(mv);
        let _ = writeln!(
            out,
            "  {} ATK: {}, DEF: {}, Charges: {}/{}",
            mv,
            skills.attack(mv),
            skills.defense(mv),
            slot.charges,
            slot.max_charges
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Enemy Stats:");
    match state.enemy_stats() {
        Some(enemy) => {
            let stats = enemy.stats();
            let _ = writeln!(out, "  Name: {}", enemy.name);
            let _ = writeln!(out, "  Health: {}", state.enemy_health());
            let _ = writeln!(out, "  Shield: {}", state.enemy_shield());
            for mv in MoveType::ALL {
                let _ = writeln!(out, "  {} ATK: {}, DEF: {}", mv, stats.attack(mv), stats.defense(mv));
            }
        }
        None => {
            let _ = writeln!(out, "  Unknown opponent");
            let _ = writeln!(out, "  Health: {}", state.enemy_health());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Expected value for each move:");
    for (mv, value) in values.iter() {
        if is_illegal(value) {
            let _ = writeln!(out, "  {}: {}", mv, format_value(value));
        } else {
            let _ = writeln!(
                out,
                "  {}: {} (Charges left: {})",
                mv,
                format_value(value),
                economy.charges(mv)
            );
        }
    }

    let _ = writeln!(out);
    match best {
        Some((mv, value)) => {
            let _ = writeln!(out, "Best move: {}", mv);
            let _ = writeln!(out, "Expected value: {:.2}", value);
        }
        None => {
            let _ = writeln!(out, "Best move: none (no legal move)");
        }
    }
    out
}

/// Clear the terminal and print the panel for this tick
pub fn present(state: &FightState, values: &MoveValues, best: Option<(MoveType, f64)>) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(stdout, "{}", render_tick(state, values, best))?;
    writeln!(stdout, "\nPress Ctrl+C to exit")?;
    stdout.flush()?;
    Ok(())
}
