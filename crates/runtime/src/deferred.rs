//! One-shot deferred values.
//!
//! A [`Deferred`] is a value that is not available yet: it is assigned at
//! most once, and any number of observers can wait for it. It backs the two
//! suspension points of the runtime - the loaded provider namespace and
//! per-player readiness. There is no cancellation and no rejection; a
//! deferred that is never resolved simply keeps its observers pending.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

struct Inner<T> {
    value: Mutex<Option<T>>,
    resolved: Notify,
}

/// A single-assignment future value with multiple observers.
///
/// Cloning a `Deferred` clones the handle, not the value: all clones observe
/// the same resolution.
pub struct Deferred<T> {
    inner: Arc<Inner<T>>,
}

impl<T: Clone> Deferred<T> {
    /// Creates an unresolved deferred value.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(None),
                resolved: Notify::new(),
            }),
        }
    }

    /// Assigns the value, waking all current and future observers.
    ///
    /// Only the first call performs the assignment; returns whether this
    /// call was the one that resolved.
    pub fn resolve(&self, value: T) -> bool {
        {
            let mut slot = self.inner.value.lock();
            if slot.is_some() {
                return false;
            }
            *slot = Some(value);
        }
        self.inner.resolved.notify_waiters();
        true
    }

    /// Reads the value without waiting.
    pub fn peek(&self) -> Option<T> {
        self.inner.value.lock().clone()
    }

    /// Returns true once the value has been assigned.
    pub fn is_resolved(&self) -> bool {
        self.inner.value.lock().is_some()
    }

    /// Waits until the value is assigned and returns a clone of it.
    pub async fn wait(&self) -> T {
        loop {
            // Arm the notification before checking, so a resolve between the
            // check and the await cannot be missed.
            let notified = self.inner.resolved.notified();
            if let Some(value) = self.peek() {
                return value;
            }
            notified.await;
        }
    }
}

impl<T: Clone> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("resolved", &self.inner.value.lock().is_some())
            .finish()
    }
}
