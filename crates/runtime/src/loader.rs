//! Provider loading.
//!
//! The provider script is injected into the host document at most once per
//! process. The loader owns that side effect: the first
//! [`ensure_loaded`](ProviderLoader::ensure_loaded) call triggers the host
//! load and memoizes a deferred handle to the provider namespace; every
//! later call returns the same handle untouched.
//!
//! The loader is an explicit service injected into the player factory
//! rather than ambient module state, so tests can instrument the load and
//! alternative hosts can supply their own bootstrap.

use crate::deferred::Deferred;
use crate::provider::{HostEnvironment, Provider};
use parking_lot::Mutex;
use std::sync::Arc;

/// Idempotent, memoizing loader for the provider namespace.
pub struct ProviderLoader {
    host: Arc<dyn HostEnvironment>,
    handle: Mutex<Option<Deferred<Arc<dyn Provider>>>>,
}

impl ProviderLoader {
    /// Creates a loader over the given host environment.
    ///
    /// Nothing is loaded until the first [`ensure_loaded`] call.
    ///
    /// [`ensure_loaded`]: ProviderLoader::ensure_loaded
    pub fn new(host: Arc<dyn HostEnvironment>) -> Self {
        Self {
            host,
            handle: Mutex::new(None),
        }
    }

    /// The host environment this loader bootstraps against.
    pub fn host(&self) -> &Arc<dyn HostEnvironment> {
        &self.host
    }

    /// Returns the deferred provider handle, triggering the host load on
    /// first use.
    ///
    /// The first call spawns the host's `load_provider` exactly once and
    /// resolves the returned handle with the namespace it produces. Every
    /// subsequent call returns the same handle without re-triggering the
    /// load. If the host cannot load the provider the failure is logged and
    /// the handle stays pending; a host that cannot inject scripts is an
    /// environmental precondition, not a recoverable error here.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn ensure_loaded(&self) -> Deferred<Arc<dyn Provider>> {
        let handle = {
            let mut slot = self.handle.lock();
            if let Some(handle) = slot.as_ref() {
                return handle.clone();
            }
            let handle = Deferred::new();
            *slot = Some(handle.clone());
            handle
        };

        tracing::debug!("triggering provider script load");

        let host = Arc::clone(&self.host);
        let resolve = handle.clone();
        tokio::spawn(async move {
            match host.load_provider().await {
                Ok(namespace) => {
                    tracing::debug!("provider namespace ready");
                    resolve.resolve(namespace);
                }
                Err(e) => {
                    tracing::error!("provider script failed to load: {e}");
                }
            }
        });

        handle
    }

    /// Returns true once the load side effect has been triggered.
    pub fn is_triggered(&self) -> bool {
        self.handle.lock().is_some()
    }
}

impl std::fmt::Debug for ProviderLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderLoader")
            .field("triggered", &self.is_triggered())
            .finish()
    }
}
