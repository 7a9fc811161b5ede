//! # mercs-core
//!
//! Core library for the Mercenaries companion cache.
//!
//! This crate provides:
//! - Game data structures (visitor tasks, collection snapshot, scenes)
//! - Visitor-progress reconciliation against persisted preferences
//! - Scene-change gating and rate limiting for memory refreshes
//! - Preference and local snapshot storage

pub mod cache;
pub mod config;
pub mod error;
pub mod game;
pub mod gate;
pub mod memory;
pub mod reconcile;
pub mod storage;

pub use cache::{MercenariesMemoryCache, Refresh};
pub use config::{Config, ConfigBuilder, PathsConfig, RefreshConfig, WatchConfig};
pub use error::{Error, Result};
pub use game::{MercenariesCollectionInfo, Mercenary, SceneMode, TaskStatus, VisitorRecord};
pub use gate::{DEFAULT_MIN_INTERVAL, RELEVANT_SCENES, RefreshGate};
pub use memory::{CollectionInfoProvider, SnapshotFileProvider, read_scene};
pub use reconcile::{PendingWrite, VisitorReconciler, reconcile};
pub use storage::{
    CachedCollection, CollectionCache, JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore,
    PreferenceUpdate, Preferences, VISITORS_PROGRESS_KEY,
};
