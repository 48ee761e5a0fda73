//! Re-score every snapshot of a saved history file

use combat_advisor::advisor::{ExpectedValueEngine, MoveValues};
use combat_advisor::core::config::AdvisorConfig;
use combat_advisor::core::error::Result;
use combat_advisor::history::HistoryLog;
use combat_advisor::ui::format_value;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "replay")]
#[command(about = "Print the advisor's scores for each saved snapshot")]
struct Args {
    /// History file written by the advisor
    #[arg(default_value = "game_history.json")]
    history: PathBuf,

    /// TOML configuration file (only the [scoring] section is used)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };
    config.validate()?;

    let engine = ExpectedValueEngine::new(config.scoring);
    let entries = HistoryLog::read_entries(&args.history)?;

    println!("{} snapshots in {}", entries.len(), args.history.display());
    for state in &entries {
        let opponent = state.enemy_stats().map(|e| e.name.as_str()).unwrap_or("?");
        match engine.score_all(state) {
            Ok(values) => println!(
                "round {:>3} vs {:<16} {}",
                state.round_number(),
                opponent,
                summarize(&values)
            ),
            Err(e) => println!("round {:>3} vs {:<16} error: {}", state.round_number(), opponent, e),
        }
    }
    Ok(())
}

fn summarize(values: &MoveValues) -> String {
    let scores: Vec<String> = values
        .iter()
        .map(|(mv, value)| format!("{}={}", mv, format_value(value)))
        .collect();
    let best = match values.best() {
        Some((mv, _)) => mv.to_string(),
        None => "none".to_string(),
    };
    format!("{}  best={}", scores.join(" "), best)
}
