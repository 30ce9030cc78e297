//! Configuration management
//!
//! Manages where learner records are stored, the simulated tutor and code-run
//! latency, and how much XP a finished lesson is worth.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage location
    #[serde(default)]
    pub storage: StorageConfig,
    /// Simulated latency
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Progress rewards
    #[serde(default)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON records (defaults to the platform data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// How long the tutor "thinks" before replying
    #[serde(default = "default_reply_delay")]
    pub tutor_reply_delay_ms: u64,
    /// How long "Run Code" takes
    #[serde(default = "default_run_delay")]
    pub code_run_delay_ms: u64,
}

fn default_reply_delay() -> u64 {
    1500
}

fn default_run_delay() -> u64 {
    1500
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tutor_reply_delay_ms: default_reply_delay(),
            code_run_delay_ms: default_run_delay(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressConfig {
    /// XP credited when a lesson is completed from the dashboard
    #[serde(default = "default_xp_per_lesson")]
    pub xp_per_lesson: u32,
}

fn default_xp_per_lesson() -> u32 {
    100
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            xp_per_lesson: default_xp_per_lesson(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Directory for learner records
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(data_dir()?.join("storage")),
        }
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "codementor", "codementor")
        .context("Failed to get project directories")
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    let storage = config.storage_dir()?;
    println!("Configuration:");
    println!("  storage dir:        {}", storage.display());
    println!("  tutor reply delay:  {} ms", config.simulation.tutor_reply_delay_ms);
    println!("  code run delay:     {} ms", config.simulation.code_run_delay_ms);
    println!("  xp per lesson:      {}", config.progress.xp_per_lesson);
    Ok(())
}

/// Reset configuration to defaults
pub fn reset_config(path: &Path) -> Result<()> {
    Config::default().save_to(path)?;
    println!("Configuration reset to defaults.");
    Ok(())
}

/// Get default configuration as TOML string
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| "# Default configuration\n".to_string())
}
