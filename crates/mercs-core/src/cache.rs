//! Mercenaries memory cache.
//!
//! Keeps the Mercenaries collection (and in particular the visitor task
//! progress) up to date as the player moves between scenes:
//!
//! 1. A scene change goes through the [`RefreshGate`]
//! 2. After a settle delay, the snapshot is read from the provider, falling
//!    back to the locally cached one
//! 3. The snapshot is cached locally and its visitors are reconciled with the
//!    persisted progress, which is then updated in the background

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::RefreshConfig;
use crate::error::Result;
use crate::game::{MercenariesCollectionInfo, SceneMode};
use crate::gate::RefreshGate;
use crate::memory::CollectionInfoProvider;
use crate::reconcile::{PendingWrite, VisitorReconciler};
use crate::storage::{CollectionCache, PreferenceStore};

/// Outcome of a refresh
pub struct Refresh {
    /// Snapshot with its visitors replaced by the reconciled list
    pub info: MercenariesCollectionInfo,
    /// Background write of the reconciled visitors
    pub pending_write: PendingWrite,
}

pub struct MercenariesMemoryCache<P, S>
where
    P: CollectionInfoProvider,
    S: PreferenceStore + 'static,
{
    provider: P,
    reconciler: VisitorReconciler<S>,
    local_cache: CollectionCache,
    gate: RefreshGate,
    settle_delay: Duration,
}

impl<P, S> MercenariesMemoryCache<P, S>
where
    P: CollectionInfoProvider,
    S: PreferenceStore + 'static,
{
    pub fn new(provider: P, store: Arc<S>, local_cache: CollectionCache) -> Self {
        Self::with_config(provider, store, local_cache, &RefreshConfig::default())
    }

    pub fn with_config(
        provider: P,
        store: Arc<S>,
        local_cache: CollectionCache,
        config: &RefreshConfig,
    ) -> Self {
        Self {
            provider,
            reconciler: VisitorReconciler::new(store),
            local_cache,
            gate: RefreshGate::new(config.min_interval()),
            settle_delay: config.settle_delay(),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn gate(&self) -> &RefreshGate {
        &self.gate
    }

    /// Whether a scene change should lead to a refresh.
    ///
    /// Callers that need an interruptible settle delay use this together with
    /// [`refresh`](Self::refresh) instead of [`on_scene_changed`](Self::on_scene_changed).
    pub fn accept_scene(&mut self, scene: SceneMode) -> bool {
        let accepted = self.gate.should_refresh(scene);
        if accepted {
            debug!("Scene changed to {}, refreshing mercenaries info", scene);
        }
        accepted
    }

    /// Handle a scene change, blocking for the settle delay when a refresh is due
    pub fn on_scene_changed(&mut self, scene: SceneMode) -> Result<Option<Refresh>> {
        if !self.accept_scene(scene) {
            return Ok(None);
        }
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
        self.refresh()
    }

    /// Read the current collection and reconcile its visitors with the saved progress
    pub fn refresh(&self) -> Result<Option<Refresh>> {
        let info = match self.read_collection_info() {
            Some(info) => info,
            None => {
                debug!("No mercenaries collection info available");
                return Ok(None);
            }
        };

        if let Err(e) = self.local_cache.save(&info) {
            warn!("Failed to save collection cache: {}", e);
        }

        // Reconcile against the latest progress, not one still being written
        self.reconciler.flush()?;
        let prefs = self.reconciler.store().get()?;
        let saved = &prefs.mercenaries_visitors_progress;
        debug!(
            "Saved visitors: {}, visitors from memory: {}",
            saved.len(),
            info.visitors.len()
        );

        let (visitors, pending_write) = self.reconciler.reconcile_and_persist(&info.visitors, saved);
        info!(
            "Refreshed mercenaries info: {} mercenaries, {} visitors",
            info.mercenaries.len(),
            visitors.len()
        );

        Ok(Some(Refresh {
            info: info.with_visitors(visitors),
            pending_write,
        }))
    }

    fn read_collection_info(&self) -> Option<MercenariesCollectionInfo> {
        match self.provider.collection_info() {
            Ok(Some(info)) => return Some(info),
            Ok(None) => debug!("Memory has no collection info, using local cache"),
            Err(e) => warn!("Failed to read collection info: {}, using local cache", e),
        }
        self.local_cache.load()
    }
}
