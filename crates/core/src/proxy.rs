// Copyright 2024 Paul Adamson
// Licensed under the Apache License, Version 2.0

//! Event and method proxies.
//!
//! Two generated surfaces sit between callers and the real player:
//!
//! - [`proxy_events`] builds the handler-slot map handed to the provider
//!   constructor; each slot re-emits its event on the internal bus under
//!   the original event name.
//! - The call queue captures facade method calls synchronously and forwards
//!   them to the real player once readiness resolves, preserving call
//!   order. [`CallFuture`] is the per-call result observer.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use ytp_protocol::{Catalog, handler_slot};
use ytp_runtime::{Deferred, Error, EventBus, EventSlots, PlayerHandle, Result};

/// Builds one handler slot per cataloged event.
///
/// Slot names follow the provider's convention: `"on"` plus the event name
/// with its first character upper-cased. Invoking a slot re-emits the
/// payload on `bus` under the original event name, synchronously, with no
/// payload transformation.
pub fn proxy_events(bus: Arc<EventBus>, catalog: &Catalog) -> EventSlots {
    let mut slots = EventSlots::new();

    for event in catalog.events() {
        let bus = Arc::clone(&bus);
        let name = event.clone();
        let handler: Arc<dyn Fn(Value) + Send + Sync> = Arc::new(move |payload: Value| {
            bus.emit(&name, &payload);
        });
        slots.insert(handler_slot(event), handler);
    }

    slots
}

/// A facade call captured before forwarding.
pub(crate) struct QueuedCall {
    pub method: String,
    pub args: Vec<Value>,
    pub reply: oneshot::Sender<Result<Value>>,
}

/// Spawns the dispatch task for one facade.
///
/// The task waits for readiness, then drains the queue one call at a time:
/// calls captured before readiness execute after it, in capture order, and
/// a failed forward rejects only its own reply channel.
pub(crate) fn spawn_dispatch(
    ready: Deferred<Arc<dyn PlayerHandle>>,
    mut calls: mpsc::UnboundedReceiver<QueuedCall>,
) {
    tokio::spawn(async move {
        let player = ready.wait().await;

        while let Some(call) = calls.recv().await {
            tracing::debug!(method = %call.method, "forwarding player call");
            let result = player.call(&call.method, call.args).await;
            let _ = call.reply.send(result);
        }
    });
}

/// Future returned by facade method calls.
///
/// The call's method name and arguments were captured when the future was
/// created; awaiting only observes the forwarded result. If readiness never
/// resolves the future pends indefinitely.
pub struct CallFuture {
    rx: oneshot::Receiver<Result<Value>>,
}

impl CallFuture {
    pub(crate) fn new(rx: oneshot::Receiver<Result<Value>>) -> Self {
        Self { rx }
    }

    /// A future that resolves immediately with `err`.
    pub(crate) fn failed(err: Error) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(err));
        Self { rx }
    }
}

impl Future for CallFuture {
    type Output = Result<Value>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(result) => {
                Poll::Ready(result.map_err(|_| Error::ChannelClosed).and_then(|r| r))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl std::fmt::Debug for CallFuture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallFuture").finish()
    }
}
