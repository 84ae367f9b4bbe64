//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the document store
    pub vault_root: PathBuf,
    /// Folder (relative to the root) holding workout documents
    pub workout_folder: String,
    /// Reconcile frontmatter with the body after manual edits
    pub enable_auto_sync: bool,
    /// Quiet period after the last edit before reconciling (milliseconds)
    pub auto_sync_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_root: PathBuf::from("."),
            workout_folder: "Workouts".to_string(),
            enable_auto_sync: true,
            auto_sync_delay_ms: 2000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        Ok(Self {
            vault_root: env::var("WORKOUT_VAULT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.vault_root),
            workout_folder: env::var("WORKOUT_FOLDER")
                .map(|v| v.trim().trim_matches('/').to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.workout_folder),
            enable_auto_sync: match env::var("WORKOUT_AUTO_SYNC") {
                Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("WORKOUT_AUTO_SYNC", v))?,
                Err(_) => defaults.enable_auto_sync,
            },
            auto_sync_delay_ms: match env::var("WORKOUT_AUTO_SYNC_DELAY_MS") {
                Ok(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("WORKOUT_AUTO_SYNC_DELAY_MS", v))?,
                Err(_) => defaults.auto_sync_delay_ms,
            },
        })
    }

    /// Debounce delay as a `Duration`.
    pub fn auto_sync_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.auto_sync_delay_ms)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
