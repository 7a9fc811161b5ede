//! Watch mode: follow scene changes published by the memory plugin.

use anyhow::Result;
use mercs_core::{PendingWrite, SceneMode, read_scene};
use tracing::{debug, error, info, warn};

use super::AppContext;
use crate::display::summarize;
use crate::shutdown::ShutdownSignal;

/// Join the writes that have completed, logging failures
fn collect_finished(pending: &mut Vec<PendingWrite>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        pending.drain(..).partition(PendingWrite::is_finished);
    *pending = running;

    for write in finished {
        if let Err(e) = write.wait() {
            error!("Failed to save visitor progress: {}", e);
        }
    }
}

pub fn run(ctx: &AppContext) -> Result<()> {
    let shutdown = ShutdownSignal::on_ctrl_c()?;
    let mut cache = ctx.memory_cache();
    let poll_interval = ctx.config.watch.poll_interval();

    let mut last_scene: Option<SceneMode> = None;
    let mut pending: Vec<PendingWrite> = Vec::new();

    println!(
        "Watching {} for scene changes... (Press Ctrl+C to quit)",
        ctx.paths.scene.display()
    );

    while !shutdown.is_shutdown() {
        collect_finished(&mut pending);

        match read_scene(&ctx.paths.scene) {
            Ok(Some(scene)) if last_scene != Some(scene) => {
                debug!("Scene changed: {:?} -> {}", last_scene, scene);
                last_scene = Some(scene);

                if cache.accept_scene(scene) {
                    // Give the game time to populate the collection
                    if shutdown.wait(cache.settle_delay()) {
                        break;
                    }
                    match cache.refresh() {
                        Ok(Some(refresh)) => {
                            info!("Visitors: {}", summarize(&refresh.info.visitors));
                            pending.push(refresh.pending_write);
                        }
                        Ok(None) => debug!("Nothing to refresh"),
                        Err(e) => error!("Refresh failed: {}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to read current scene: {}", e),
        }

        if shutdown.wait(poll_interval) {
            break;
        }
    }

    for write in pending {
        if let Err(e) = write.wait() {
            error!("Failed to save visitor progress: {}", e);
        }
    }

    info!("Stopped watching");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercs_core::{
        Error, MemoryPreferenceStore, PreferenceStore, PreferenceUpdate, Preferences,
        VisitorReconciler,
    };
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::{Arc, Mutex};

    /// Store whose writes block until released
    struct HeldStore {
        release: Mutex<Receiver<()>>,
    }

    impl HeldStore {
        fn new() -> (Self, Sender<()>) {
            let (tx, rx) = mpsc::channel();
            (
                Self {
                    release: Mutex::new(rx),
                },
                tx,
            )
        }
    }

    impl PreferenceStore for HeldStore {
        fn get(&self) -> mercs_core::Result<Preferences> {
            Ok(Preferences::default())
        }

        fn update(&self, _update: PreferenceUpdate) -> mercs_core::Result<()> {
            let _ = self.release.lock().unwrap().recv();
            Ok(())
        }
    }

    struct RejectingStore;

    impl PreferenceStore for RejectingStore {
        fn get(&self) -> mercs_core::Result<Preferences> {
            Ok(Preferences::default())
        }

        fn update(&self, _update: PreferenceUpdate) -> mercs_core::Result<()> {
            Err(Error::WriterStopped)
        }
    }

    #[test]
    fn test_collect_finished_keeps_running_writes() {
        let saved = VisitorReconciler::new(Arc::new(MemoryPreferenceStore::new()));
        let (_, written) = saved.reconcile_and_persist(&[], &[]);
        saved.flush().unwrap();

        let rejected = VisitorReconciler::new(Arc::new(RejectingStore));
        let (_, failed) = rejected.reconcile_and_persist(&[], &[]);
        rejected.flush().unwrap();

        let (store, release) = HeldStore::new();
        let held = VisitorReconciler::new(Arc::new(store));
        let (_, running) = held.reconcile_and_persist(&[], &[]);

        let mut pending = vec![written, running, failed];
        collect_finished(&mut pending);
        assert_eq!(pending.len(), 1);
        assert!(!pending[0].is_finished());

        release.send(()).unwrap();
        held.flush().unwrap();
        collect_finished(&mut pending);
        assert!(pending.is_empty());
    }

    #[test]
    fn test_collect_finished_empty() {
        let mut pending = Vec::new();
        collect_finished(&mut pending);
        assert!(pending.is_empty());
    }
}
