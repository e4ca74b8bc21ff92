//! The seam to the host-provided widget runtime.
//!
//! Script injection, element lookup, and the provider's constructor entry
//! point are host-specific. These traits keep the core independent of any
//! particular host: a webview bridge or wasm shim implements them for real
//! pages, tests implement them with recording mocks.

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use ytp_protocol::ElementTarget;

/// Type alias for the boxed futures returned by seam trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Handler slots passed to the provider constructor.
///
/// Keys are slot names (`onReady`, `onStateChange`, ...); the provider
/// invokes a slot with the event payload whenever the matching event fires.
pub type EventSlots = HashMap<String, Arc<dyn Fn(Value) + Send + Sync>>;

/// A constructed player object inside the provider.
///
/// The facade never holds the real player directly; every operation goes
/// through [`call`](PlayerHandle::call) by method name, which keeps the
/// method surface catalog-driven.
pub trait PlayerHandle: Send + Sync {
    /// Invokes a named method on the real player with the given arguments.
    fn call(&self, method: &str, args: Vec<Value>) -> BoxFuture<'_, Result<Value>>;
}

/// The provider's global namespace.
///
/// Exposes the single constructor-style entry point the core consumes.
pub trait Provider: Send + Sync {
    /// Constructs a player mounted at `target`, configured with `config`,
    /// reporting events through `slots`.
    fn create_player(
        &self,
        target: ElementTarget,
        config: Value,
        slots: EventSlots,
    ) -> BoxFuture<'_, Result<Arc<dyn PlayerHandle>>>;
}

/// The host document and script-loading environment.
pub trait HostEnvironment: Send + Sync {
    /// Returns true if an element with `id` exists in the host document.
    fn element_exists(&self, id: &str) -> bool;

    /// Injects the provider script and resolves once the provider signals
    /// global readiness.
    ///
    /// Called at most once per [`ProviderLoader`]; idempotence across
    /// repeated facade constructions is the loader's responsibility, not
    /// the host's.
    ///
    /// [`ProviderLoader`]: crate::loader::ProviderLoader
    fn load_provider(&self) -> BoxFuture<'_, Result<Arc<dyn Provider>>>;
}
