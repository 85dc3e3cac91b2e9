//! Save/load of the breakout snapshot
//!
//! Features:
//! - Versioned JSON schema, readable from unversioned `gameState` saves
//! - Shape and range validation on load, failing closed
//! - Whole-snapshot overwrite, no merging

pub mod schema;

pub use schema::{SNAPSHOT_VERSION, Snapshot};

use anyhow::{Context, Result};

use crate::platform::Storage;
use crate::sim::BreakoutState;

/// Storage slot holding the saved breakout game
pub const SAVE_KEY: &str = "gameState";

/// Outcome of a load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    NoSave,
}

impl LoadOutcome {
    /// Message shown to the player
    pub fn message(&self) -> &'static str {
        match self {
            LoadOutcome::Loaded => "Game Loaded!",
            LoadOutcome::NoSave => "No saved game found.",
        }
    }
}

/// Overwrite the save slot with the current world
pub fn save(storage: &mut dyn Storage, state: &BreakoutState) -> Result<()> {
    let json = Snapshot::capture(state).to_json()?;
    storage
        .set_item(SAVE_KEY, &json)
        .context("writing saved game")?;
    log::info!("Game saved (level {}, score {})", state.level, state.score);
    Ok(())
}

/// Read and parse the saved snapshot, if any
pub fn load_snapshot(storage: &dyn Storage) -> Result<Option<Snapshot>> {
    let Some(json) = storage.get_item(SAVE_KEY).context("reading saved game")? else {
        return Ok(None);
    };
    Snapshot::from_json(&json).map(Some)
}

/// Replace the world with the saved game. A corrupt save is an error and
/// leaves `state` as it was.
pub fn load(storage: &dyn Storage, state: &mut BreakoutState) -> Result<LoadOutcome> {
    let Some(snapshot) = load_snapshot(storage)? else {
        log::info!("No saved game found");
        return Ok(LoadOutcome::NoSave);
    };
    snapshot
        .restore(state)
        .context("saved game failed validation")?;
    log::info!("Game loaded (level {}, score {})", state.level, state.score);
    Ok(LoadOutcome::Loaded)
}

/// Forget the saved game
pub fn clear(storage: &mut dyn Storage) -> Result<()> {
    storage.remove_item(SAVE_KEY).context("clearing saved game")?;
    log::info!("Saved game cleared");
    Ok(())
}
