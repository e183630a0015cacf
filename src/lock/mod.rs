use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ModelError;

/// Non-waiting busy flag for a model.
///
/// Acquiring an already held lock fails immediately with
/// [`ModelError::Locked`] instead of blocking.
#[derive(Debug, Default)]
pub struct ModelLock {
    locked: AtomicBool,
}

impl ModelLock {
    pub fn new() -> Self {
        ModelLock {
            locked: AtomicBool::new(false),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Take the lock for `operation`. It is released when the guard drops.
    pub fn try_acquire(&self, operation: &'static str) -> Result<ModelLockGuard<'_>, ModelError> {
        self.locked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ModelError::Locked(operation))?;
        Ok(ModelLockGuard { lock: self })
    }
}

/// Releases the owning [`ModelLock`] on drop.
#[derive(Debug)]
pub struct ModelLockGuard<'a> {
    lock: &'a ModelLock,
}

impl Drop for ModelLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}
