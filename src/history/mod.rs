//! Session history persisted as a JSON array of fight snapshots

use crate::combat::state::FightState;
use crate::core::error::Result;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Snapshots recorded this session, plus whatever the file held before
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    entries: Vec<FightState>,
}

impl HistoryLog {
    /// Empty log that will be written to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Continue the log stored at `path`.
    ///
    /// A missing or unreadable file starts an empty log.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable history file");
                }
                Vec::new()
            }
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded history");
        Self { path, entries }
    }

    /// Parse a history file, failing on any IO or format error
    pub fn read_entries(path: &Path) -> Result<Vec<FightState>> {
        let contents = fs::read_to_string(path)?;
        let entries: Vec<FightState> = serde_json::from_str(&contents)?;
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&mut self, state: FightState) {
        self.entries.push(state);
    }

    pub fn entries(&self) -> &[FightState] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Round number for the next recorded snapshot
    pub fn next_round(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Write every entry to the log's path, replacing the file
    pub fn save(&self) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.flush()?;
        tracing::info!(path = %self.path.display(), entries = self.entries.len(), "saved history");
        Ok(())
    }
}
