//! Event bus for provider events.
//!
//! Provides the publish/subscribe surface the facade exposes and the
//! one-shot waiter the factory uses for readiness:
//!
//! - **Handlers**: Registered via [`EventBus::on`], invoked synchronously on
//!   every matching [`emit`](EventBus::emit), in registration order
//! - **Waiters**: Registered via [`EventBus::once`], consumed by the first
//!   matching emission
//!
//! Waiters are delivered first during `emit`, ensuring guaranteed delivery
//! for readiness even when no handler is registered.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;

type Handler = Arc<dyn Fn(&Value) + Send + Sync>;

/// Name-keyed synchronous event dispatcher.
#[derive(Default)]
pub struct EventBus {
    handlers: Mutex<HashMap<String, Vec<Handler>>>,
    waiters: Mutex<HashMap<String, Vec<oneshot::Sender<Value>>>>,
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for every future emission of `event`.
    ///
    /// Handlers for one event run in the order they were registered.
    pub fn on<F>(&self, event: &str, handler: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(Arc::new(handler));
    }

    /// Registers a one-shot waiter for the next emission of `event`.
    ///
    /// Returns a [`oneshot::Receiver`] that completes with the payload of
    /// the first subsequent emission. Emissions after the first do not reach
    /// the waiter.
    ///
    /// [`oneshot::Receiver`]: tokio::sync::oneshot::Receiver
    pub fn once(&self, event: &str) -> oneshot::Receiver<Value> {
        let (tx, rx) = oneshot::channel();
        self.waiters
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(tx);
        rx
    }

    /// Emits `event` with `payload`, synchronously.
    ///
    /// Pending waiters for the name receive the payload first and are
    /// removed; handlers then run in registration order on the calling
    /// thread. Handlers registered during an emission do not observe that
    /// emission.
    pub fn emit(&self, event: &str, payload: &Value) {
        tracing::debug!(event, "emitting player event");

        if let Some(waiters) = self.waiters.lock().remove(event) {
            for waiter in waiters {
                let _ = waiter.send(payload.clone());
            }
        }

        // Snapshot outside the lock so handlers may re-enter the bus.
        let handlers: Vec<Handler> = self
            .handlers
            .lock()
            .get(event)
            .map(|list| list.to_vec())
            .unwrap_or_default();

        for handler in handlers {
            handler(payload);
        }
    }

    /// Returns the number of handlers registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.lock().get(event).map_or(0, Vec::len)
    }

    /// Returns the number of pending waiters for `event`.
    pub fn waiter_count(&self, event: &str) -> usize {
        self.waiters.lock().get(event).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.handlers.lock().len())
            .finish()
    }
}
