// Copyright 2024 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Player factory - validates configuration, wires the proxies, and hands
// back a facade without waiting for the provider.

use crate::player::Player;
use crate::proxy::{proxy_events, spawn_dispatch};
use std::sync::Arc;
use tokio::sync::mpsc;
use ytp_protocol::{Catalog, ElementTarget, PlayerOptions};
use ytp_runtime::{Deferred, Error, EventBus, HostEnvironment, ProviderLoader, Result};

/// Produces [`Player`] facades over a shared provider loader.
///
/// The factory owns the two process-wide pieces of state: the loader (and
/// through it the one-time script-injection side effect) and the name
/// catalog. Each [`create`](PlayerFactory::create) call builds an
/// independent facade with its own event bus and readiness deferred.
pub struct PlayerFactory {
    loader: Arc<ProviderLoader>,
    catalog: Arc<Catalog>,
}

impl PlayerFactory {
    /// Creates a factory over the given host environment with the default
    /// catalog.
    pub fn new(host: Arc<dyn HostEnvironment>) -> Self {
        Self::with_loader(Arc::new(ProviderLoader::new(host)))
    }

    /// Creates a factory over an existing loader.
    ///
    /// Useful when several factories (or other components) must share the
    /// single per-process load side effect.
    pub fn with_loader(loader: Arc<ProviderLoader>) -> Self {
        Self {
            loader,
            catalog: Arc::new(Catalog::default()),
        }
    }

    /// Replaces the default name catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// The loader backing this factory.
    pub fn loader(&self) -> &Arc<ProviderLoader> {
        &self.loader
    }

    /// Constructs a player facade mounted at `target`.
    ///
    /// Validation is synchronous and happens before any asynchronous work:
    /// a configuration that already carries an events map fails with
    /// [`Error::EventsOverride`], and an element identifier that does not
    /// exist in the host document fails with [`Error::ElementNotFound`]
    /// without triggering the provider load.
    ///
    /// On success the facade is returned immediately; the real player is
    /// constructed in the background once the provider namespace is
    /// available, and the facade's readiness resolves on the provider's
    /// first `ready` event. Construction never blocks on readiness.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn create(
        &self,
        target: impl Into<ElementTarget>,
        options: PlayerOptions,
    ) -> Result<Player> {
        if options.events.is_some() {
            return Err(Error::EventsOverride);
        }

        let target = target.into();
        if let Some(id) = target.id() {
            if !self.loader.host().element_exists(id) {
                return Err(Error::ElementNotFound(id.to_string()));
            }
        }

        let namespace = self.loader.ensure_loaded();

        let bus = Arc::new(EventBus::new());
        let slots = proxy_events(Arc::clone(&bus), &self.catalog);
        let config = serde_json::to_value(&options)?;

        // Register the readiness waiter before any asynchronous work so a
        // provider that reports ready during construction is not missed.
        // Only the first `ready` resolves; re-fired ready events leave the
        // facade bound to the original player.
        let ready: Deferred<_> = Deferred::new();
        let first_ready = bus.once("ready");

        let (calls_tx, calls_rx) = mpsc::unbounded_channel();
        spawn_dispatch(ready.clone(), calls_rx);

        let resolve = ready.clone();
        tokio::spawn(async move {
            let provider = namespace.wait().await;

            match provider.create_player(target, config, slots).await {
                Ok(handle) => {
                    if first_ready.await.is_ok() {
                        resolve.resolve(handle);
                        tracing::debug!("player ready");
                    } else {
                        tracing::debug!("event bus dropped before ready");
                    }
                }
                Err(e) => {
                    // Readiness stays pending, matching a provider that
                    // never reports ready.
                    tracing::error!("player construction failed: {e}");
                }
            }
        });

        Ok(Player::new(bus, Arc::clone(&self.catalog), calls_tx))
    }
}

impl std::fmt::Debug for PlayerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerFactory")
            .field("loader", &self.loader)
            .finish()
    }
}
