//! On-disk snapshot of everything rota keeps in memory.
//!
//! The core never touches disk for entity data; the CLI loads the whole
//! directory, fork store and activity log from one JSON file and writes it back.

use std::path::Path;

use anyhow::{Context, Result};
use rota_core::{ActivityLog, Directory, ForkStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub directory: Directory,
    #[serde(default)]
    pub store: ForkStore,
    #[serde(default)]
    pub activity: ActivityLog,
}

impl State {
    /// Load from `path`, or start empty if the file doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No data file yet, starting empty");
            return Ok(State::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("Could not parse {}", path.display()))?;

        Ok(state)
    }

    /// Write atomically: temp file, then rename over the old one.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, path)?;

        debug!(path = %path.display(), "Saved data file");
        Ok(())
    }
}
