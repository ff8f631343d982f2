//! Named exclusive change lock
//!
//! Guards the form library against overlapping sync passes. Acquisition is
//! fail-fast and non-reentrant: `try_acquire` either hands back a guard
//! immediately or reports the lock as held, and release is guaranteed when
//! the guard drops — there is no blocking path.

use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Exclusive lock identified by name.
///
/// Clones share the same underlying lock; holders of different
/// `ChangeLock::new` instances never contend.
#[derive(Clone)]
pub struct ChangeLock {
    name: Arc<str>,
    inner: Arc<Mutex<()>>,
}

impl ChangeLock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            inner: Arc::new(Mutex::new(())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Try to take the lock without waiting.
    ///
    /// Returns `None` when another holder has it; the caller is expected to
    /// skip its critical section entirely in that case.
    pub fn try_acquire(&self) -> Option<ChangeLockGuard> {
        match self.inner.clone().try_lock_owned() {
            Ok(guard) => {
                debug!(lock = %self.name, "Acquired change lock");
                Some(ChangeLockGuard {
                    name: self.name.clone(),
                    _guard: guard,
                })
            }
            Err(_) => {
                debug!(lock = %self.name, "Change lock already held");
                None
            }
        }
    }

    /// Whether some guard currently holds the lock.
    pub fn is_held(&self) -> bool {
        self.inner.try_lock().is_err()
    }
}

/// RAII guard; dropping it releases the lock.
pub struct ChangeLockGuard {
    name: Arc<str>,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for ChangeLockGuard {
    fn drop(&mut self) {
        debug!(lock = %self.name, "Released change lock");
    }
}
