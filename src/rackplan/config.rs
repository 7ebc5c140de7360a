use crate::commands::grid::{check_width, parse_width};
use crate::error::{RackError, Result};
use crate::store::fs::FileStore;
use crate::store::{load_json, save_json};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Stored next to the layout keys, so it lands in `<data dir>/config.json`.
const CONFIG_KEY: &str = "config";
pub const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_REVERT_MS: u64 = 100;

/// Configuration for rackplan, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RackplanConfig {
    /// Width in pixels of the surface the grid is laid out on
    #[serde(default = "default_width")]
    pub available_width: f64,

    /// Duration of the snap-back animation after a rejected drop
    #[serde(default = "default_revert_ms")]
    pub revert_ms: u64,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_revert_ms() -> u64 {
    DEFAULT_REVERT_MS
}

impl Default for RackplanConfig {
    fn default() -> Self {
        Self {
            available_width: DEFAULT_WIDTH,
            revert_ms: DEFAULT_REVERT_MS,
        }
    }
}

impl RackplanConfig {
    /// Config from `config_dir`. A missing or unreadable file gives the
    /// defaults, and an unusable width falls back to [`DEFAULT_WIDTH`].
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Self {
        let store = FileStore::new(config_dir.as_ref().to_path_buf());
        let mut config: Self = load_json(&store, CONFIG_KEY).unwrap_or_default();
        if check_width(config.available_width).is_err() {
            warn!(width = config.available_width, "configured width is invalid, using default");
            config.available_width = DEFAULT_WIDTH;
        }
        config
    }

    /// Writes the config atomically, creating the directory if needed.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let mut store = FileStore::new(config_dir.as_ref().to_path_buf());
        save_json(&mut store, CONFIG_KEY, self)
    }

    pub fn revert_duration(&self) -> Duration {
        Duration::from_millis(self.revert_ms)
    }

    pub fn set_available_width(&mut self, raw: &str) -> Result<()> {
        self.available_width = parse_width(raw)?;
        Ok(())
    }

    pub fn set_revert_ms(&mut self, raw: &str) -> Result<()> {
        self.revert_ms = raw
            .trim()
            .parse()
            .map_err(|_| RackError::Api(format!("Invalid duration in ms: {}", raw)))?;
        Ok(())
    }
}
