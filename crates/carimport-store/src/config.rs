//! # Store Configuration
//!
//! Where the database lives, the chassis duplicate policy, and the settings
//! used when storage holds none yet.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CARIMPORT_DB_PATH=/data/carimport.db                               │
//! │     CARIMPORT_DUPLICATE_CHASSIS=reject                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tracker/carimport.toml (Linux)                           │
//! │     ~/Library/Application Support/com.carimport.tracker/carimport.toml │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     platform data dir / carimport.db, duplicates allowed               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! database_path = "/home/user/carimport.db"
//! duplicate_chassis = "reject"   # allow | reject
//!
//! [defaults]
//! originCurrencyRate = 1.05
//! intlCurrencyRate = 110.0
//! auctionFeePercent = 4.0
//! agentCommissionPercent = 3.0
//! ```

use carimport_core::{DuplicateChassisPolicy, Settings};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::pool::DbConfig;

/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "CARIMPORT_DB_PATH";

/// Environment variable overriding the chassis duplicate policy.
pub const ENV_DUPLICATE_CHASSIS: &str = "CARIMPORT_DUPLICATE_CHASSIS";

const CONFIG_FILE_NAME: &str = "carimport.toml";
const DATABASE_FILE_NAME: &str = "carimport.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "carimport", "tracker")
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE_NAME))
}

/// Complete store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Whether two cars may share a chassis number.
    #[serde(default)]
    pub duplicate_chassis: DuplicateChassisPolicy,

    /// Settings used until the user saves their own.
    #[serde(default)]
    pub defaults: Settings,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            database_path: default_database_path(),
            duplicate_chassis: DuplicateChassisPolicy::default(),
            defaults: Settings::default(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (carimport.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Checks the path is set and the default settings are usable.
    pub fn validate(&self) -> StoreResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(StoreError::Config("database_path must not be empty".into()));
        }

        if self.defaults != self.defaults.sanitized() {
            return Err(StoreError::Config(
                "default rates and percentages must be positive numbers".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`StoreConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = PathBuf::from(path);
        }

        if let Some(policy) = lookup(ENV_DUPLICATE_CHASSIS) {
            match policy.parse::<DuplicateChassisPolicy>() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding duplicate chassis policy from environment");
                    self.duplicate_chassis = parsed;
                }
                Err(_) => warn!(policy = %policy, "Unknown duplicate chassis policy in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Pool configuration for the configured database file.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
    }
}
