//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DEFAULT_SHUFFLE_ROUNDS};

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Shuffled verification runs after the ordered one
    pub shuffle_rounds: u32,
    /// Seed for reproducible shuffles (random when unset)
    pub seed: Option<u64>,
    /// Default roster file for `show` and `stringify`
    pub roster: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shuffle_rounds: DEFAULT_SHUFFLE_ROUNDS,
            seed: None,
            roster: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub shuffle_rounds: Option<u32>,
    pub seed: Option<u64>,
    pub roster: Option<PathBuf>,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the roster path.
    fn expand_paths(&mut self) {
        if let Some(roster) = &self.roster {
            self.roster = Some(PathBuf::from(expand_env_vars(
                roster.to_string_lossy().as_ref(),
            )));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            shuffle_rounds: overlay.shuffle_rounds.unwrap_or(self.shuffle_rounds),
            seed: overlay.seed.or(self.seed),
            roster: overlay.roster.clone().or_else(|| self.roster.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// `config_file` must exist if given; the global file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ORGTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<u32>("shuffle_rounds") {
            settings.shuffle_rounds = val;
        }
        if let Ok(val) = config.get::<u64>("seed") {
            settings.seed = Some(val);
        }
        if let Ok(val) = config.get_string("roster") {
            settings.roster = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/orgtree/orgtree.toml
#   File:   --config <file>
#   Env:    ORGTREE_* environment variables

# Shuffled verification runs after the ordered one
# shuffle_rounds = 10

# Fixed seed for reproducible shuffles
# seed = 42

# Roster used by `show` and `stringify` when --roster is not given
# roster = "~/org/roster.toml"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
