//! Combat Advisor - Entry Point
//!
//! Polls the game service every few seconds, scores the three moves for the
//! current fight and prints the recommendation. Every polled snapshot is kept
//! and written to the history file when the fight ends or on Ctrl+C.

use combat_advisor::advisor::ExpectedValueEngine;
use combat_advisor::client::GameClient;
use combat_advisor::core::config::AdvisorConfig;
use combat_advisor::core::error::Result;
use combat_advisor::history::HistoryLog;
use combat_advisor::ui;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Live move advisor for dungeon fights
#[derive(Parser, Debug)]
#[command(name = "combat-advisor")]
#[command(about = "Recommend the best Sword/Shield/Spell move for the current fight")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides the config file)
    #[arg(long)]
    interval: Option<u64>,

    /// History file (overrides the config file)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Poll a single time, save and exit
    #[arg(long)]
    once: bool,
}

/// What a single poll found
enum Tick {
    Advised,
    FightOver,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("combat_advisor=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };
    if let Some(interval) = args.interval {
        config.poll.interval_secs = interval;
    }
    if let Some(history) = args.history {
        config.history.path = history;
    }
    config.api = config.api.with_env_token();
    config.validate()?;

    let client = GameClient::new(config.api.clone());
    if !client.is_authenticated() {
        tracing::warn!("no bearer token configured - requests are unauthenticated");
    }

    let engine = ExpectedValueEngine::new(config.scoring.clone());
    let mut history = HistoryLog::load(config.history.path.clone());

    tracing::info!(
        interval_secs = config.poll.interval_secs,
        history = %history.path().display(),
        "combat advisor starting"
    );

    let rt = Runtime::new()?;
    rt.block_on(run(&client, &engine, &mut history, &config, args.once))
}

async fn run(
    client: &GameClient,
    engine: &ExpectedValueEngine,
    history: &mut HistoryLog,
    config: &AdvisorConfig,
    once: bool,
) -> Result<()> {
    let interval = Duration::from_secs(config.poll.interval_secs);
    let backoff = Duration::from_secs(config.poll.error_backoff_secs);

    loop {
        let outcome = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nExiting...");
                break;
            }
            outcome = poll(client, engine, history) => outcome,
        };

        let wait = match outcome {
            Ok(Tick::FightOver) => {
                println!("\nGame Over - Player has died or game has ended");
                tracing::info!(snapshots = history.len(), "fight over");
                break;
            }
            Ok(Tick::Advised) => interval,
            Err(e) => {
                tracing::warn!(error = %e, "failed to update game state");
                backoff
            }
        };

        if once {
            break;
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nExiting...");
                break;
            }
            _ = tokio::time::sleep(wait) => {}
        }
    }

    history.save()
}

async fn poll(client: &GameClient, engine: &ExpectedValueEngine, history: &mut HistoryLog) -> Result<Tick> {
    let Some(snapshot) = client.fetch_run().await? else {
        return Ok(Tick::FightOver);
    };

    let state = snapshot.to_fight_state(history.next_round());
    history.record(state.clone());

    let values = engine.score_all(&state)?;
    let best = values.best();
    ui::present(&state, &values, best)?;

    if let Some((mv, value)) = best {
        tracing::debug!(round = state.round_number(), best_move = %mv, value, "advised");
    }
    Ok(Tick::Advised)
}
