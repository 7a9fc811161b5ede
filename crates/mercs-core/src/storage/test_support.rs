//! Preference stores for exercising failure and timing paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::storage::{MemoryPreferenceStore, PreferenceStore, PreferenceUpdate, Preferences};

/// Store whose writes always fail
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    inner: MemoryPreferenceStore,
}

impl PreferenceStore for ReadOnlyStore {
    fn get(&self) -> Result<Preferences> {
        self.inner.get()
    }

    fn update(&self, _update: PreferenceUpdate) -> Result<()> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "preference store is read-only",
        )))
    }
}

/// In-memory store whose first write takes `delay`
#[derive(Debug)]
pub struct SlowFirstWriteStore {
    inner: MemoryPreferenceStore,
    delay: Duration,
    first_done: AtomicBool,
}

impl SlowFirstWriteStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryPreferenceStore::new(),
            delay,
            first_done: AtomicBool::new(false),
        }
    }
}

impl PreferenceStore for SlowFirstWriteStore {
    fn get(&self) -> Result<Preferences> {
        self.inner.get()
    }

    fn update(&self, update: PreferenceUpdate) -> Result<()> {
        if !self.first_done.swap(true, Ordering::SeqCst) {
            thread::sleep(self.delay);
        }
        self.inner.update(update)
    }
}
