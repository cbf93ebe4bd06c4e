//! Loaded configuration and resolved paths.

use std::path::{Path, PathBuf};

use config::{Config, File};
use tracing::debug;

use crate::config::RotaConfig;
use crate::error::{RotaError, RotaResult};

#[derive(Debug, Clone)]
pub struct Rota {
    config: RotaConfig,
    config_path: PathBuf,
}

impl Rota {
    /// Load the global config, creating a commented default on first use.
    pub fn load() -> RotaResult<Self> {
        Self::load_from(&RotaConfig::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> RotaResult<Self> {
        if !config_path.exists() {
            RotaConfig::create_default_config(config_path)?;
        }

        let config: RotaConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| RotaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RotaError::Config(e.to_string()))?;

        debug!(path = %config_path.display(), "Loaded config");

        Ok(Rota {
            config,
            config_path: config_path.to_path_buf(),
        })
    }

    pub fn config(&self) -> &RotaConfig {
        &self.config
    }

    /// Data file path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Data file path in display-friendly form, keeping `~`.
    pub fn display_path(&self) -> &Path {
        &self.config.data_file
    }

    pub fn admin_emails(&self) -> &[String] {
        &self.config.admin_emails
    }

    /// Add an administrator e-mail and persist the config.
    /// Returns false if the address was already listed.
    pub fn add_admin_email(&mut self, email: &str) -> RotaResult<bool> {
        if self
            .config
            .admin_emails
            .iter()
            .any(|e| e.eq_ignore_ascii_case(email))
        {
            return Ok(false);
        }
        self.config.admin_emails.push(email.to_string());
        self.config.save(&self.config_path)?;
        Ok(true)
    }
}
