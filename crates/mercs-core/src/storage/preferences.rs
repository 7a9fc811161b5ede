use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::game::VisitorRecord;
use crate::game::null_as_empty;

/// Preference key holding the persisted visitor progress
pub const VISITORS_PROGRESS_KEY: &str = "mercenariesVisitorsProgress";

/// Persisted user preferences.
///
/// Only the visitor progress is interpreted here. Every other field is kept
/// as-is so writes never clobber preferences owned by other components.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mercenaries_visitors_progress: Vec<VisitorRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single-field preference change
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceUpdate {
    MercenariesVisitorsProgress(Vec<VisitorRecord>),
    Field { name: String, value: Value },
}

impl Preferences {
    pub fn apply(&mut self, update: PreferenceUpdate) -> Result<()> {
        match update {
            PreferenceUpdate::MercenariesVisitorsProgress(visitors) => {
                self.mercenaries_visitors_progress = visitors;
            }
            PreferenceUpdate::Field { name, value } if name == VISITORS_PROGRESS_KEY => {
                self.mercenaries_visitors_progress = if value.is_null() {
                    Vec::new()
                } else {
                    serde_json::from_value(value)?
                };
            }
            PreferenceUpdate::Field { name, value } => {
                self.extra.insert(name, value);
            }
        }
        Ok(())
    }
}

/// Key-value preference storage.
///
/// Implementations must be shareable across threads: writes are issued from
/// a background thread.
pub trait PreferenceStore: Send + Sync {
    fn get(&self) -> Result<Preferences>;

    fn update(&self, update: PreferenceUpdate) -> Result<()>;
}

/// Preferences stored as a JSON document on disk
pub struct JsonPreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonPreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Preferences> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) => {
                let err = Error::from(e);
                if err.is_not_found() {
                    debug!("No preferences at {}, using defaults", self.path.display());
                    Ok(Preferences::default())
                } else {
                    Err(err)
                }
            }
        }
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self) -> Result<Preferences> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read()
    }

    fn update(&self, update: PreferenceUpdate) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut prefs = self.read()?;
        prefs.apply(update)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        info!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

/// Preferences held in memory only
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    prefs: Mutex<Preferences>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            prefs: Mutex::new(prefs),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self) -> Result<Preferences> {
        Ok(self
            .prefs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn update(&self, update: PreferenceUpdate) -> Result<()> {
        self.prefs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(update)
    }
}
