use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use tracing::info;

#[derive(Default)]
struct State {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// Cloneable stop flag for the watch loop.
///
/// Every clone observes the same flag; `wait` returns early once any clone
/// triggers it.
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    state: Arc<State>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal triggered by Ctrl+C
    pub fn on_ctrl_c() -> anyhow::Result<Self> {
        let signal = Self::new();
        let handler = signal.clone();
        ctrlc::set_handler(move || {
            info!("Received shutdown signal, stopping...");
            handler.trigger();
        })?;
        Ok(signal)
    }

    pub fn trigger(&self) {
        *self.stopped() = true;
        self.state.wake.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        *self.stopped()
    }

    /// Sleep for `duration` unless shutdown comes first.
    ///
    /// Returns `true` if shutdown was triggered.
    pub fn wait(&self, duration: Duration) -> bool {
        let (stopped, _) = self
            .state
            .wake
            .wait_timeout_while(self.stopped(), duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *stopped
    }

    fn stopped(&self) -> std::sync::MutexGuard<'_, bool> {
        self.state
            .stopped
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
