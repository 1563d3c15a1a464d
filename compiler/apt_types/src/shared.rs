//! A pool shared between threads.
//!
//! Describing several APIs concurrently into one pool is only safe if every
//! registration goes through one lock. `SharedPool` is that lock. Prefer a
//! separate [`Pool`] per description when the APIs do not share types.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Pool;

/// Reference-counted, lock-protected pool.
#[derive(Clone, Default)]
pub struct SharedPool(Arc<RwLock<Pool>>);

impl SharedPool {
    pub fn new(pool: Pool) -> Self {
        Self(Arc::new(RwLock::new(pool)))
    }

    /// Shared access for traversal and emission.
    pub fn read(&self) -> RwLockReadGuard<'_, Pool> {
        self.0.read()
    }

    /// Exclusive access for registration.
    pub fn write(&self) -> RwLockWriteGuard<'_, Pool> {
        self.0.write()
    }

    /// Run `f` with exclusive access, so a multi-step description (a struct
    /// and the pointers to it) is registered atomically.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pool) -> R) -> R {
        f(&mut self.0.write())
    }
}

impl std::fmt::Debug for SharedPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPool")
            .field("len", &self.read().len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use unwrap/expect to fail fast on malformed fixtures"
)]
