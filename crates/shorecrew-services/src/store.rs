//! Slot-based persistence for roster and stats.
//!
//! One JSON document with two named slots, written as a whole on every save.
//! Loads never fail: a missing file, an unreadable file, or a corrupt slot
//! each degrade to that slot's default. Saves are best-effort; a write
//! failure is logged and swallowed so a full disk never breaks the session.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::roster::CrewMember;
use crate::stats::Stats;

const STATE_FILE: &str = "state.json";
const CREW_SLOT: &str = "crew";
const STATS_SLOT: &str = "stats";

/// The two persisted slots, materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredState {
    pub crew: Vec<CrewMember>,
    pub stats: Stats,
}

/// Local slot store for the session state document.
#[derive(Debug)]
pub struct SlotStore {
    path: PathBuf,
}

impl SlotStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STATE_FILE),
        }
    }

    /// Load both slots, degrading per slot on corruption.
    ///
    /// `stats.crew_members` and `stats.beaches` are re-derived after load,
    /// so the invariants hold even against a tampered snapshot.
    pub fn load(&self) -> StoredState {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!("no saved state at {} ({}), starting fresh", self.path.display(), e);
                return StoredState::default();
            }
        };

        let doc: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("saved state unparseable, starting fresh: {}", e);
                return StoredState::default();
            }
        };

        let crew = match doc.get(CREW_SLOT) {
            Some(slot) => match serde_json::from_value(slot.clone()) {
                Ok(crew) => crew,
                Err(e) => {
                    tracing::warn!("crew slot corrupt, using empty roster: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let stats = match doc.get(STATS_SLOT) {
            Some(slot) => match serde_json::from_value(slot.clone()) {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::warn!("stats slot corrupt, using zeroed stats: {}", e);
                    Stats::default()
                }
            },
            None => Stats::default(),
        };

        let mut state = StoredState { crew, stats };
        state.stats.rederive(state.crew.len());
        state
    }

    /// Persist both slots. Best-effort: failures are logged, never surfaced.
    pub fn save(&self, crew: &[CrewMember], stats: &Stats) {
        if let Err(e) = self.try_save(crew, stats) {
            tracing::warn!("failed to persist state, continuing: {:#}", e);
        }
    }

    fn try_save(&self, crew: &[CrewMember], stats: &Stats) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let doc = serde_json::json!({
            CREW_SLOT: crew,
            STATS_SLOT: stats,
        });

        let contents =
            serde_json::to_string_pretty(&doc).context("Failed to serialize state")?;
        std::fs::write(&self.path, contents).context("Failed to write state file")?;

        tracing::debug!("persisted {} crew member(s) to {}", crew.len(), self.path.display());
        Ok(())
    }
}
