//! A digest computation that can be driven from several threads.

use super::Digest;
use crate::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Serializes access to a single computation behind a mutex.
///
/// Clones share the same underlying computation.
#[derive(Clone)]
pub struct SharedDigest {
    inner: Arc<Mutex<Box<dyn Digest>>>,
}

impl SharedDigest {
    /// Share an existing computation
    pub fn new(digest: Box<dyn Digest>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(digest)),
        }
    }

    // A panic while holding the lock leaves the computation in a consistent
    // state between calls, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Box<dyn Digest>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Algorithm name of the shared computation
    pub fn name(&self) -> String {
        self.lock().name()
    }

    /// Feed more input
    pub fn update(&self, data: &[u8]) -> Result<()> {
        self.lock().update(data)
    }

    /// Produce the digest
    pub fn finalize(&self) -> Result<Vec<u8>> {
        self.lock().finalize()
    }

    /// Restart the computation
    pub fn reset(&self) {
        self.lock().reset();
    }
}

impl std::fmt::Debug for SharedDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedDigest").field("name", &self.name()).finish()
    }
}
