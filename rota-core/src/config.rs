//! Global rota configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TASK_HORIZON_DAYS, DEFAULT_VIEW_DAYS};
use crate::error::{RotaError, RotaResult};

static DEFAULT_DATA_FILE: &str = "~/rota/rota.json";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_view_days() -> i64 {
    DEFAULT_VIEW_DAYS
}

fn default_task_horizon_days() -> i64 {
    DEFAULT_TASK_HORIZON_DAYS
}

/// Global configuration at ~/.config/rota/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RotaConfig {
    /// Snapshot of people, groups, events and forks kept by the host
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// E-mail addresses that resolve to administrators
    #[serde(default)]
    pub admin_emails: Vec<String>,

    #[serde(default = "default_view_days")]
    pub view_days: i64,

    #[serde(default = "default_task_horizon_days")]
    pub task_horizon_days: i64,
}

impl Default for RotaConfig {
    fn default() -> Self {
        RotaConfig {
            data_file: default_data_file(),
            admin_emails: Vec::new(),
            view_days: DEFAULT_VIEW_DAYS,
            task_horizon_days: DEFAULT_TASK_HORIZON_DAYS,
        }
    }
}

impl RotaConfig {
    pub fn config_path() -> RotaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RotaError::Config("Could not determine config directory".into()))?
            .join("rota");

        Ok(config_dir.join("config.toml"))
    }

    /// Write the config back to `path`.
    pub fn save(&self, path: &Path) -> RotaResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RotaError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| RotaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RotaResult<()> {
        let contents = format!(
            "\
# rota configuration

# Where people, groups, events and forks are stored:
# data_file = \"{}\"

# Identities with these e-mail addresses may edit everything:
# admin_emails = [\"admin@example.org\"]

# Default number of days shown by `rota instances`:
# view_days = {}

# How far ahead `rota tasks` looks:
# task_horizon_days = {}
",
            DEFAULT_DATA_FILE, DEFAULT_VIEW_DAYS, DEFAULT_TASK_HORIZON_DAYS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RotaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RotaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
