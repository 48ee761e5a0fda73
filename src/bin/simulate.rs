//! Headless Fight Simulator
//!
//! Plays a fight offline: the advisor picks the player's move each round and
//! the opponent's move is drawn from its pattern. Outputs a JSON or text
//! summary.

use combat_advisor::advisor::ExpectedValueEngine;
use combat_advisor::combat::{advance, EnemyProfile, FightState, MoveEconomy, StatBlock};
use combat_advisor::core::error::{AdvisorError, Result};
use combat_advisor::core::types::{MoveType, Side};
use clap::Parser;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Six comma-separated stat slots: sword atk/def, shield atk/def, spell atk/def
#[derive(Debug, Clone, Copy)]
struct Slots([u32; 6]);

fn parse_slots(raw: &str) -> std::result::Result<Slots, String> {
    let values: Vec<u32> = raw
        .split(',')
        .map(|v| v.trim().parse::<u32>().map_err(|e| format!("'{}': {}", v.trim(), e)))
        .collect::<std::result::Result<_, _>>()?;
    let slots: [u32; 6] = values
        .try_into()
        .map_err(|v: Vec<u32>| format!("expected 6 values, got {}", v.len()))?;
    Ok(Slots(slots))
}

/// Headless Fight Simulator - advisor vs pattern-driven opponent
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Simulate a fight with the advisor choosing the player's moves")]
struct Args {
    /// Player stats
    #[arg(long, default_value = "9,0,0,4,2,2", value_parser = parse_slots)]
    player: Slots,

    #[arg(long, default_value_t = 16)]
    player_health: i32,

    #[arg(long, default_value_t = 6)]
    player_shield: i32,

    /// Opponent stats, also used as its move pattern
    #[arg(long, default_value = "3,3,3,3,3,3", value_parser = parse_slots)]
    enemy: Slots,

    #[arg(long, default_value = "Training Dummy")]
    enemy_name: String,

    #[arg(long, default_value_t = 20)]
    enemy_health: i32,

    /// Maximum rounds before the fight is called a draw
    #[arg(long, default_value_t = 50)]
    max_rounds: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct RoundLog {
    round: u32,
    player_move: MoveType,
    enemy_move: MoveType,
    expected_value: f64,
    player_damage: u32,
    enemy_damage: u32,
    player_health: i32,
    enemy_health: i32,
}

/// JSON output structure
#[derive(Serialize)]
struct SimulationResult {
    outcome: String,
    rounds: u32,
    winner: Option<Side>,
    player_health: i32,
    enemy_health: i32,
    seed: u64,
    history: Vec<RoundLog>,
}

/// Draw the opponent's move from the attack weights of its legal moves.
/// Falls back to a uniform pick when every legal weight is zero.
fn sample_enemy_move(state: &FightState, rng: &mut StdRng) -> Result<Option<MoveType>> {
    let enemy = state.require_enemy()?;
    let legal = state.enemy_economy().legal_moves();
    if legal.is_empty() {
        return Ok(None);
    }

    let weights: Vec<u32> = legal.iter().map(|&mv| enemy.attack_weight(mv)).collect();
    match WeightedIndex::new(&weights) {
        Ok(dist) => Ok(Some(legal[dist.sample(rng)])),
        Err(_) => Ok(legal.choose(rng).copied()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let player = StatBlock::from_slots(
        args.player.0,
        args.player_health.max(0) as u32,
        args.player_shield.max(0) as u32,
    );
    let mut state = FightState::new("simulation", player, args.enemy_health)
        .with_player_health(args.player_health, args.player_shield)
        .with_enemy(EnemyProfile::new(args.enemy_name.clone(), args.enemy.0))
        .with_player_economy(MoveEconomy::default())
        .with_enemy_economy(MoveEconomy::default());

    let engine = ExpectedValueEngine::default();
    let mut history = Vec::new();

    let outcome = loop {
        if state.is_over() {
            break "finished";
        }
        if state.round_number() >= args.max_rounds {
            break "timeout";
        }

        let (player_move, expected_value) = match engine.best_move(&state) {
            Ok(best) => best,
            Err(AdvisorError::NoLegalMove) => break "player stuck",
            Err(e) => return Err(e),
        };
        let Some(enemy_move) = sample_enemy_move(&state, &mut rng)? else {
            break "enemy stuck";
        };

        state = advance(&state, player_move, enemy_move)?;
        if let Some(outcome) = state.move_outcomes().last() {
            history.push(RoundLog {
                round: outcome.round,
                player_move,
                enemy_move,
                expected_value,
                player_damage: outcome.player_damage,
                enemy_damage: outcome.enemy_damage,
                player_health: state.player_health(),
                enemy_health: state.enemy_health(),
            });
        }
    };

    let result = SimulationResult {
        outcome: outcome.to_string(),
        rounds: state.round_number(),
        winner: state.winner(),
        player_health: state.player_health(),
        enemy_health: state.enemy_health(),
        seed,
        history,
    };

    match args.format.as_str() {
        "text" => {
            println!("Fight Result");
            println!("============");
            println!("Opponent: {}", args.enemy_name);
            println!("Outcome: {} after {} rounds", result.outcome, result.rounds);
            match result.winner {
                Some(side) => println!("Winner: {:?}", side),
                None => println!("Winner: none"),
            }
            println!("Player health: {}", result.player_health);
            println!("Enemy health: {}", result.enemy_health);
            println!();
            for round in &result.history {
                println!(
                    "  [{}] {} (EV {:.2}) vs {}: dealt {}, took {}",
                    round.round,
                    round.player_move,
                    round.expected_value,
                    round.enemy_move,
                    round.player_damage,
                    round.enemy_damage
                );
            }
            println!();
            println!("Seed: {}", result.seed);
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
