//! Application configuration.
//!
//! Loaded from a TOML file; every field has a default, so a partial file (or
//! none at all) is valid.
//!
//! ```toml
//! [refresh]
//! min_interval_ms = 5000
//! settle_delay_ms = 2000
//!
//! [paths]
//! preferences = "preferences.json"
//! snapshot = "memory-snapshot.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub refresh: RefreshConfig,
    pub paths: PathsConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Minimum time between two collection refreshes
    pub min_interval_ms: u64,
    /// Wait after a scene change before reading memory
    pub settle_delay_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 5000,
            settle_delay_ms: 2000,
        }
    }
}

impl RefreshConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// File locations; relative paths are resolved against the data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub preferences: PathBuf,
    pub collection_cache: PathBuf,
    pub snapshot: PathBuf,
    pub scene: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            preferences: PathBuf::from("preferences.json"),
            collection_cache: PathBuf::from("mercenaries-collection.json"),
            snapshot: PathBuf::from("memory-snapshot.json"),
            scene: PathBuf::from("scene.txt"),
        }
    }
}

impl PathsConfig {
    pub fn resolve(&self, base_dir: &Path) -> Self {
        Self {
            preferences: base_dir.join(&self.preferences),
            collection_cache: base_dir.join(&self.collection_cache),
            snapshot: base_dir.join(&self.snapshot),
            scene: base_dir.join(&self.scene),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Interval between two reads of the scene file
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
        }
    }
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Whole milliseconds of `duration`, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Builder for Config
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    min_interval: Option<Duration>,
    settle_delay: Option<Duration>,
    poll_interval: Option<Duration>,
    paths: Option<PathsConfig>,
}

impl ConfigBuilder {
    pub fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn paths(mut self, paths: PathsConfig) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn build(self) -> Config {
        let default = Config::default();
        Config {
            refresh: RefreshConfig {
                min_interval_ms: self
                    .min_interval
                    .map(millis)
                    .unwrap_or(default.refresh.min_interval_ms),
                settle_delay_ms: self
                    .settle_delay
                    .map(millis)
                    .unwrap_or(default.refresh.settle_delay_ms),
            },
            paths: self.paths.unwrap_or(default.paths),
            watch: WatchConfig {
                poll_interval_ms: self
                    .poll_interval
                    .map(millis)
                    .unwrap_or(default.watch.poll_interval_ms),
            },
        }
    }
}
